// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftdesk_domain::SwapRequest;
use time::OffsetDateTime;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewSwapRequestRow;
use crate::diesel_schema::swap_requests;
use crate::error::PersistenceError;

/// Inserts a new swap request.
///
/// # Returns
///
/// The assigned swap id.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_swap_request(
    conn: &mut SqliteConnection,
    request: &SwapRequest,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(swap_requests::table)
        .values(NewSwapRequestRow::from(request))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_swap_request: {e}")))?;

    let swap_id: i64 = get_last_insert_rowid(conn)?;
    info!(swap_id, requester_id = request.requester_id, "Created swap request");
    Ok(swap_id)
}

/// Writes the status, counterparty, and approval time of a swap request.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_swap_status(
    conn: &mut SqliteConnection,
    swap_id: i64,
    request: &SwapRequest,
) -> Result<usize, PersistenceError> {
    diesel::update(swap_requests::table.filter(swap_requests::swap_id.eq(swap_id)))
        .set((
            swap_requests::status.eq(request.status.as_str()),
            swap_requests::counterparty_id.eq(request.counterparty_id),
            swap_requests::approved_at.eq(request.approved_at.map(OffsetDateTime::unix_timestamp)),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("update_swap_status: {e}")))
}
