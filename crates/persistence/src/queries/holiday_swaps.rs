// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftdesk_domain::HolidaySwap;

use super::PageRequest;
use crate::data_models::HolidaySwapRow;
use crate::diesel_schema::holiday_swaps;
use crate::error::PersistenceError;

/// Retrieves a holiday swap by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the holiday swap does not exist.
pub fn find_holiday_swap(
    conn: &mut SqliteConnection,
    holiday_swap_id: i64,
) -> Result<Option<HolidaySwap>, PersistenceError> {
    holiday_swaps::table
        .filter(holiday_swaps::holiday_swap_id.eq(holiday_swap_id))
        .select(HolidaySwapRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_holiday_swap: {e}")))?
        .map(HolidaySwap::try_from)
        .transpose()
}

/// Lists holiday swaps newest first.
///
/// When `viewer` is given, only swaps where the viewer is the requester or
/// the target are returned.
///
/// # Returns
///
/// The page of holiday swaps and the total number of visible rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_holiday_swaps(
    conn: &mut SqliteConnection,
    page: PageRequest,
    viewer: Option<i64>,
) -> Result<(Vec<HolidaySwap>, i64), PersistenceError> {
    let mut rows_query = holiday_swaps::table
        .select(HolidaySwapRow::as_select())
        .into_boxed();
    let mut count_query = holiday_swaps::table.count().into_boxed();

    if let Some(user_id) = viewer {
        rows_query = rows_query.filter(
            holiday_swaps::requester_id
                .eq(user_id)
                .or(holiday_swaps::target_user_id.eq(user_id)),
        );
        count_query = count_query.filter(
            holiday_swaps::requester_id
                .eq(user_id)
                .or(holiday_swaps::target_user_id.eq(user_id)),
        );
    }

    let total: i64 = count_query
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_holiday_swaps count: {e}")))?;
    let rows: Vec<HolidaySwapRow> = rows_query
        .order((
            holiday_swaps::created_at.desc(),
            holiday_swaps::holiday_swap_id.desc(),
        ))
        .limit(page.size())
        .offset(page.offset())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_holiday_swaps: {e}")))?;

    let swaps: Vec<HolidaySwap> = rows
        .into_iter()
        .map(HolidaySwap::try_from)
        .collect::<Result<_, _>>()?;
    Ok((swaps, total))
}
