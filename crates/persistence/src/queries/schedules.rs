// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule queries: the overlap and lookup engine.
//!
//! Two windows overlap iff `NOT(existing.end <= start OR existing.start >= end)`,
//! expressed here as `existing.end > start AND existing.start < end`.
//! Windows that merely touch do not overlap.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftdesk_domain::{Channel, LookupTier, Schedule, TimeWindow};
use tracing::debug;

use crate::data_models::ScheduleRow;
use crate::diesel_schema::schedules;
use crate::error::PersistenceError;

fn into_schedules(rows: Vec<ScheduleRow>) -> Result<Vec<Schedule>, PersistenceError> {
    rows.into_iter().map(Schedule::try_from).collect()
}

/// Retrieves a schedule by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the schedule does not exist.
pub fn find_schedule(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<Option<Schedule>, PersistenceError> {
    schedules::table
        .filter(schedules::schedule_id.eq(schedule_id))
        .select(ScheduleRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_schedule: {e}")))?
        .map(Schedule::try_from)
        .transpose()
}

/// Returns whether the user holds a schedule overlapping the window.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The schedule owner
/// * `window` - The window to test
/// * `exclude_id` - A schedule to ignore, typically the one being modified
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn exists_overlap(
    conn: &mut SqliteConnection,
    user_id: i64,
    window: &TimeWindow,
    exclude_id: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = schedules::table
        .select(schedules::schedule_id)
        .filter(schedules::user_id.eq(user_id))
        .filter(schedules::end_at.gt(window.start().unix_timestamp()))
        .filter(schedules::start_at.lt(window.end().unix_timestamp()))
        .into_boxed();
    if let Some(excluded) = exclude_id {
        query = query.filter(schedules::schedule_id.ne(excluded));
    }

    let hit: Option<i64> = query
        .first::<i64>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("exists_overlap: {e}")))?;
    Ok(hit.is_some())
}

/// Returns the earliest schedule of the user intersecting the window.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_overlapping(
    conn: &mut SqliteConnection,
    user_id: i64,
    window: &TimeWindow,
) -> Result<Option<Schedule>, PersistenceError> {
    schedules::table
        .filter(schedules::user_id.eq(user_id))
        .filter(schedules::end_at.gt(window.start().unix_timestamp()))
        .filter(schedules::start_at.lt(window.end().unix_timestamp()))
        .order((schedules::start_at.asc(), schedules::schedule_id.asc()))
        .select(ScheduleRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_overlapping: {e}")))?
        .map(Schedule::try_from)
        .transpose()
}

/// Returns the user's schedule with exactly this window, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_exact_window(
    conn: &mut SqliteConnection,
    user_id: i64,
    window: &TimeWindow,
) -> Result<Option<Schedule>, PersistenceError> {
    schedules::table
        .filter(schedules::user_id.eq(user_id))
        .filter(schedules::start_at.eq(window.start().unix_timestamp()))
        .filter(schedules::end_at.eq(window.end().unix_timestamp()))
        .order(schedules::schedule_id.asc())
        .select(ScheduleRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_exact_window: {e}")))?
        .map(Schedule::try_from)
        .transpose()
}

/// Locates the requester's schedule for a swap window.
///
/// Strategies are tried in order: overlap, exact window, then any schedule
/// intersecting the local day of the window start. The first hit wins.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The schedule owner
/// * `window` - The requested swap window
/// * `day` - The local calendar day containing the window start
///
/// # Errors
///
/// Returns an error if any database query fails.
pub fn locate_shift(
    conn: &mut SqliteConnection,
    user_id: i64,
    window: &TimeWindow,
    day: &TimeWindow,
) -> Result<Option<(Schedule, LookupTier)>, PersistenceError> {
    if let Some(schedule) = find_overlapping(conn, user_id, window)? {
        return Ok(Some((schedule, LookupTier::Overlap)));
    }
    if let Some(schedule) = find_exact_window(conn, user_id, window)? {
        return Ok(Some((schedule, LookupTier::ExactWindow)));
    }
    if let Some(schedule) = find_overlapping(conn, user_id, day)? {
        return Ok(Some((schedule, LookupTier::SameDay)));
    }
    debug!(user_id, "No schedule located for swap window");
    Ok(None)
}

/// Lists schedules intersecting a range, optionally for one user, ordered by start.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_intersecting(
    conn: &mut SqliteConnection,
    user_id: Option<i64>,
    range: &TimeWindow,
) -> Result<Vec<Schedule>, PersistenceError> {
    let mut query = schedules::table
        .filter(schedules::end_at.gt(range.start().unix_timestamp()))
        .filter(schedules::start_at.lt(range.end().unix_timestamp()))
        .select(ScheduleRow::as_select())
        .into_boxed();
    if let Some(owner) = user_id {
        query = query.filter(schedules::user_id.eq(owner));
    }

    let rows: Vec<ScheduleRow> = query
        .order((schedules::start_at.asc(), schedules::schedule_id.asc()))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_intersecting: {e}")))?;
    into_schedules(rows)
}

/// Lists schedules on a channel that overlap the window, across all users.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_on_channel(
    conn: &mut SqliteConnection,
    channel: Channel,
    window: &TimeWindow,
) -> Result<Vec<Schedule>, PersistenceError> {
    let rows: Vec<ScheduleRow> = schedules::table
        .filter(schedules::channel.eq(channel.as_str()))
        .filter(schedules::end_at.gt(window.start().unix_timestamp()))
        .filter(schedules::start_at.lt(window.end().unix_timestamp()))
        .order((schedules::start_at.asc(), schedules::schedule_id.asc()))
        .select(ScheduleRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_on_channel: {e}")))?;
    into_schedules(rows)
}
