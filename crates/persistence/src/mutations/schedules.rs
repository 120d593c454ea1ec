// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftdesk_domain::{Schedule, ScheduleDraft, TimeWindow};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewScheduleRow;
use crate::diesel_schema::schedules;
use crate::error::PersistenceError;

/// Inserts a schedule without checking for overlap.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_schedule(
    conn: &mut SqliteConnection,
    draft: &ScheduleDraft,
    now: OffsetDateTime,
) -> Result<Schedule, PersistenceError> {
    let row: NewScheduleRow<'_> = NewScheduleRow {
        user_id: draft.user_id,
        start_at: draft.window.start().unix_timestamp(),
        end_at: draft.window.end().unix_timestamp(),
        channel: draft.channel.as_str(),
        shift_name: draft.shift_name.as_deref(),
        notes: draft.notes.as_deref(),
        created_at: now.unix_timestamp(),
        updated_at: now.unix_timestamp(),
    };
    diesel::insert_into(schedules::table)
        .values(&row)
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_schedule: {e}")))?;

    let schedule_id: i64 = get_last_insert_rowid(conn)?;
    info!(schedule_id, user_id = draft.user_id, "Created schedule");

    Ok(Schedule {
        schedule_id,
        user_id: draft.user_id,
        window: draft.window,
        channel: draft.channel,
        shift_name: draft.shift_name.clone(),
        notes: draft.notes.clone(),
    })
}

/// Overwrites every field of a schedule.
///
/// # Returns
///
/// The number of rows updated (0 if the schedule does not exist).
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_schedule(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    draft: &ScheduleDraft,
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    diesel::update(schedules::table.filter(schedules::schedule_id.eq(schedule_id)))
        .set((
            schedules::user_id.eq(draft.user_id),
            schedules::start_at.eq(draft.window.start().unix_timestamp()),
            schedules::end_at.eq(draft.window.end().unix_timestamp()),
            schedules::channel.eq(draft.channel.as_str()),
            schedules::shift_name.eq(draft.shift_name.as_deref()),
            schedules::notes.eq(draft.notes.as_deref()),
            schedules::updated_at.eq(now.unix_timestamp()),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("update_schedule: {e}")))
}

/// Moves a schedule to a new owner, leaving its window unchanged.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn reassign_owner(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    new_owner: i64,
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    debug!(schedule_id, new_owner, "Reassigning schedule owner");
    diesel::update(schedules::table.filter(schedules::schedule_id.eq(schedule_id)))
        .set((
            schedules::user_id.eq(new_owner),
            schedules::updated_at.eq(now.unix_timestamp()),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("reassign_owner: {e}")))
}

/// Deletes a schedule. Deleting an absent schedule is not an error.
///
/// # Returns
///
/// The number of rows deleted.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_schedule(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<usize, PersistenceError> {
    diesel::delete(schedules::table.filter(schedules::schedule_id.eq(schedule_id)))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("delete_schedule: {e}")))
}

/// Deletes every schedule of a user intersecting the range.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_intersecting(
    conn: &mut SqliteConnection,
    user_id: i64,
    range: &TimeWindow,
) -> Result<usize, PersistenceError> {
    diesel::delete(
        schedules::table
            .filter(schedules::user_id.eq(user_id))
            .filter(schedules::end_at.gt(range.start().unix_timestamp()))
            .filter(schedules::start_at.lt(range.end().unix_timestamp())),
    )
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("delete_intersecting: {e}")))
}

/// Deletes every schedule of a user starting inside the range.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_starting_within(
    conn: &mut SqliteConnection,
    user_id: i64,
    range: &TimeWindow,
) -> Result<usize, PersistenceError> {
    diesel::delete(
        schedules::table
            .filter(schedules::user_id.eq(user_id))
            .filter(schedules::start_at.ge(range.start().unix_timestamp()))
            .filter(schedules::start_at.lt(range.end().unix_timestamp())),
    )
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("delete_starting_within: {e}")))
}
