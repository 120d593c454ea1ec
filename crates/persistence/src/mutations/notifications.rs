// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftdesk_domain::RefType;
use time::OffsetDateTime;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewNotificationRow;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Inserts an unread notification.
///
/// # Returns
///
/// The assigned notification id.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_notification(
    conn: &mut SqliteConnection,
    user_id: i64,
    title: &str,
    body: &str,
    ref_type: RefType,
    ref_id: Option<i64>,
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(notifications::table)
        .values(NewNotificationRow {
            user_id,
            title,
            body,
            ref_type: ref_type.as_str(),
            ref_id,
            is_read: 0,
            created_at: now.unix_timestamp(),
        })
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_notification: {e}")))?;
    get_last_insert_rowid(conn)
}

/// Marks one of a user's notifications as read.
///
/// # Returns
///
/// The number of rows updated (0 if the notification does not exist or
/// belongs to someone else).
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn mark_read(
    conn: &mut SqliteConnection,
    notification_id: i64,
    user_id: i64,
) -> Result<usize, PersistenceError> {
    diesel::update(
        notifications::table
            .filter(notifications::notification_id.eq(notification_id))
            .filter(notifications::user_id.eq(user_id)),
    )
    .set(notifications::is_read.eq(1))
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("mark_read: {e}")))
}
