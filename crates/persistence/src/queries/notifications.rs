// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftdesk_domain::Notification;

use crate::data_models::NotificationRow;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Lists a user's notifications newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The recipient
/// * `unread_only` - Skip notifications already read
/// * `limit` - Maximum rows returned
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_notifications(
    conn: &mut SqliteConnection,
    user_id: i64,
    unread_only: bool,
    limit: i64,
) -> Result<Vec<Notification>, PersistenceError> {
    let mut query = notifications::table
        .filter(notifications::user_id.eq(user_id))
        .select(NotificationRow::as_select())
        .into_boxed();
    if unread_only {
        query = query.filter(notifications::is_read.eq(0));
    }

    let rows: Vec<NotificationRow> = query
        .order((
            notifications::created_at.desc(),
            notifications::notification_id.desc(),
        ))
        .limit(limit)
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_notifications: {e}")))?;

    rows.into_iter().map(Notification::try_from).collect()
}
