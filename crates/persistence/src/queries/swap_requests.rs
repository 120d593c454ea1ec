// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftdesk_domain::SwapRequest;

use super::PageRequest;
use crate::data_models::SwapRequestRow;
use crate::diesel_schema::swap_requests;
use crate::error::PersistenceError;

/// Retrieves a swap request by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the request does not exist.
pub fn find_swap_request(
    conn: &mut SqliteConnection,
    swap_id: i64,
) -> Result<Option<SwapRequest>, PersistenceError> {
    swap_requests::table
        .filter(swap_requests::swap_id.eq(swap_id))
        .select(SwapRequestRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_swap_request: {e}")))?
        .map(SwapRequest::try_from)
        .transpose()
}

/// Lists swap requests newest first.
///
/// When `viewer` is given, only requests the viewer opened, requests
/// addressed to the viewer, and broadcast requests are returned.
///
/// # Returns
///
/// The page of requests and the total number of visible requests.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_swap_requests(
    conn: &mut SqliteConnection,
    page: PageRequest,
    viewer: Option<i64>,
) -> Result<(Vec<SwapRequest>, i64), PersistenceError> {
    let mut rows_query = swap_requests::table
        .select(SwapRequestRow::as_select())
        .into_boxed();
    let mut count_query = swap_requests::table.count().into_boxed();

    if let Some(user_id) = viewer {
        rows_query = rows_query.filter(
            swap_requests::requester_id
                .eq(user_id)
                .or(swap_requests::target_user_id.is_null())
                .or(swap_requests::target_user_id.eq(user_id)),
        );
        count_query = count_query.filter(
            swap_requests::requester_id
                .eq(user_id)
                .or(swap_requests::target_user_id.is_null())
                .or(swap_requests::target_user_id.eq(user_id)),
        );
    }

    let total: i64 = count_query
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_swap_requests count: {e}")))?;
    let rows: Vec<SwapRequestRow> = rows_query
        .order((
            swap_requests::created_at.desc(),
            swap_requests::swap_id.desc(),
        ))
        .limit(page.size())
        .offset(page.offset())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_swap_requests: {e}")))?;

    let requests: Vec<SwapRequest> = rows
        .into_iter()
        .map(SwapRequest::try_from)
        .collect::<Result<_, _>>()?;
    Ok((requests, total))
}
