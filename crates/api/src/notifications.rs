// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The caller's notification inbox.

use shiftdesk_domain::Notification;
use shiftdesk_persistence::SqlitePersistence;
use tracing::debug;

use crate::auth::AuthenticatedActor;
use crate::error::ApiError;
use crate::request_response::{ListNotificationsResponse, NotificationInfo};
use crate::views::notification_info;

/// Number of notifications returned when no limit is given.
pub const DEFAULT_NOTIFICATION_LIMIT: i64 = 50;

/// Largest number of notifications returned at once.
pub const MAX_NOTIFICATION_LIMIT: i64 = 200;

/// Lists the actor's notifications, newest first.
///
/// A limit outside `1..=200` falls back to the default of 50.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_notifications(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    unread_only: bool,
    limit: Option<i64>,
) -> Result<ListNotificationsResponse, ApiError> {
    let limit: i64 = limit
        .filter(|l| (1..=MAX_NOTIFICATION_LIMIT).contains(l))
        .unwrap_or(DEFAULT_NOTIFICATION_LIMIT);
    let notifications: Vec<Notification> =
        persistence.list_notifications(actor.user_id(), unread_only, limit)?;
    debug!(
        user_id = actor.user_id(),
        unread_only,
        limit,
        count = notifications.len(),
        "Listed notifications"
    );

    let items: Vec<NotificationInfo> = notifications
        .iter()
        .map(notification_info)
        .collect::<Result<_, _>>()?;
    Ok(ListNotificationsResponse { items })
}

/// Marks one of the actor's notifications as read.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the notification does not exist or
/// belongs to another user.
pub fn mark_read(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    notification_id: i64,
) -> Result<(), ApiError> {
    persistence.mark_notification_read(notification_id, actor.user_id())?;
    Ok(())
}
