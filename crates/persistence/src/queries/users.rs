// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User directory queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftdesk_domain::{RoleName, User};
use tracing::warn;

use crate::data_models::UserRow;
use crate::diesel_schema::{user_roles, users};
use crate::error::PersistenceError;

fn attach_roles(
    conn: &mut SqliteConnection,
    rows: Vec<UserRow>,
) -> Result<Vec<User>, PersistenceError> {
    let ids: Vec<i64> = rows.iter().map(|row| row.user_id).collect();
    let role_rows: Vec<(i64, String)> = user_roles::table
        .filter(user_roles::user_id.eq_any(&ids))
        .select((user_roles::user_id, user_roles::role_name))
        .order((user_roles::user_id.asc(), user_roles::role_name.asc()))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load user roles: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let roles: Vec<RoleName> = role_rows
                .iter()
                .filter(|(user_id, _)| *user_id == row.user_id)
                .filter_map(|(user_id, name)| match name.parse::<RoleName>() {
                    Ok(role) => Some(role),
                    Err(e) => {
                        warn!(user_id, role = %name, error = %e, "Skipping unknown stored role");
                        None
                    }
                })
                .collect();
            User {
                user_id: row.user_id,
                full_name: row.full_name,
                email: row.email,
                active: row.is_active != 0,
                roles,
            }
        })
        .collect())
}

/// Retrieves a user and their roles by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user does not exist.
pub fn find_user(conn: &mut SqliteConnection, user_id: i64) -> Result<Option<User>, PersistenceError> {
    let row: Option<UserRow> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_user: {e}")))?;

    match row {
        Some(row) => Ok(attach_roles(conn, vec![row])?.into_iter().next()),
        None => Ok(None),
    }
}

/// Returns whether an email is already registered.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn email_exists(conn: &mut SqliteConnection, email: &str) -> Result<bool, PersistenceError> {
    let hit: Option<i64> = users::table
        .filter(users::email.eq(email))
        .select(users::user_id)
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("email_exists: {e}")))?;
    Ok(hit.is_some())
}

/// Counts every user in the directory.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    users::table
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_users: {e}")))
}

/// Lists every user ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order((users::full_name.asc(), users::user_id.asc()))
        .select(UserRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_users: {e}")))?;
    attach_roles(conn, rows)
}

/// Lists the ids of active users holding any backoffice role.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn backoffice_user_ids(conn: &mut SqliteConnection) -> Result<Vec<i64>, PersistenceError> {
    user_roles::table
        .inner_join(users::table)
        .filter(user_roles::role_name.ne(RoleName::Agent.as_str()))
        .filter(users::is_active.eq(1))
        .select(user_roles::user_id)
        .distinct()
        .order(user_roles::user_id.asc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("backoffice_user_ids: {e}")))
}

/// Looks up display names for a set of users.
///
/// Unknown ids are absent from the result.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn user_names(
    conn: &mut SqliteConnection,
    user_ids: &[i64],
) -> Result<Vec<(i64, String)>, PersistenceError> {
    users::table
        .filter(users::user_id.eq_any(user_ids))
        .select((users::user_id, users::full_name))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("user_names: {e}")))
}
