// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftdesk_domain::HolidaySwap;
use time::OffsetDateTime;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewHolidaySwapRow;
use crate::diesel_schema::holiday_swaps;
use crate::error::PersistenceError;

/// Inserts a new holiday swap.
///
/// # Returns
///
/// The assigned holiday swap id.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_holiday_swap(
    conn: &mut SqliteConnection,
    request: &HolidaySwap,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(holiday_swaps::table)
        .values(NewHolidaySwapRow::from(request))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_holiday_swap: {e}")))?;

    let holiday_swap_id: i64 = get_last_insert_rowid(conn)?;
    info!(
        holiday_swap_id,
        requester_id = request.requester_id,
        target_user_id = request.target_user_id,
        "Created holiday swap"
    );
    Ok(holiday_swap_id)
}

/// Writes the status, approval time, and created schedule of a holiday swap.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_holiday_swap_status(
    conn: &mut SqliteConnection,
    holiday_swap_id: i64,
    request: &HolidaySwap,
) -> Result<usize, PersistenceError> {
    diesel::update(
        holiday_swaps::table.filter(holiday_swaps::holiday_swap_id.eq(holiday_swap_id)),
    )
    .set((
        holiday_swaps::status.eq(request.status.as_str()),
        holiday_swaps::approved_at.eq(request.approved_at.map(OffsetDateTime::unix_timestamp)),
        holiday_swaps::created_schedule_id.eq(request.created_schedule_id),
    ))
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("update_holiday_swap_status: {e}")))
}
