// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftdesk_domain::RoleName;
use time::OffsetDateTime;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewUserRow;
use crate::diesel_schema::{user_roles, users};
use crate::error::PersistenceError;

/// Inserts a user and their roles.
///
/// The email is expected to be normalized already.
///
/// # Returns
///
/// The assigned user id.
///
/// # Errors
///
/// Returns an error if either insert fails.
pub fn insert_user(
    conn: &mut SqliteConnection,
    full_name: &str,
    email: &str,
    roles: &[RoleName],
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(users::table)
        .values(NewUserRow {
            full_name,
            email,
            is_active: 1,
            created_at: now.unix_timestamp(),
        })
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_user: {e}")))?;
    let user_id: i64 = get_last_insert_rowid(conn)?;

    for role in roles {
        diesel::insert_into(user_roles::table)
            .values((
                user_roles::user_id.eq(user_id),
                user_roles::role_name.eq(role.as_str()),
            ))
            .execute(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("insert user role: {e}")))?;
    }

    info!(user_id, roles = roles.len(), "Created user");
    Ok(user_id)
}
