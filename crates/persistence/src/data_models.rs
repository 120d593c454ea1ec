// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to domain types.
//!
//! Instants are stored as UTC unix seconds and dates as `YYYY-MM-DD` text.
//! A row that cannot be converted back is reported as a corrupt record
//! rather than silently skipped.

use diesel::prelude::*;
use shiftdesk_domain::{
    Channel, HolidaySwap, HolidaySwapStatus, Notification, RefType, Schedule, SwapRequest,
    SwapStatus, TimeWindow, format_date, parse_date,
};
use time::OffsetDateTime;

use crate::diesel_schema::{holiday_swaps, notifications, schedules, swap_requests, users};
use crate::error::PersistenceError;

/// Converts stored unix seconds to an instant.
pub(crate) fn to_instant(seconds: i64) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|e| PersistenceError::CorruptRecord(format!("timestamp {seconds}: {e}")))
}

fn to_window(start_at: i64, end_at: i64) -> Result<TimeWindow, PersistenceError> {
    TimeWindow::new(to_instant(start_at)?, to_instant(end_at)?)
        .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))
}

fn corrupt<E: std::fmt::Display>(e: E) -> PersistenceError {
    PersistenceError::CorruptRecord(e.to_string())
}

/// Diesel Queryable struct for schedule rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = schedules)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ScheduleRow {
    pub schedule_id: i64,
    pub user_id: i64,
    pub start_at: i64,
    pub end_at: i64,
    pub channel: String,
    pub shift_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TryFrom<ScheduleRow> for Schedule {
    type Error = PersistenceError;

    fn try_from(row: ScheduleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            schedule_id: row.schedule_id,
            user_id: row.user_id,
            window: to_window(row.start_at, row.end_at)?,
            channel: row.channel.parse::<Channel>().map_err(corrupt)?,
            shift_name: row.shift_name,
            notes: row.notes,
        })
    }
}

/// Insertable struct for new schedules.
#[derive(Insertable)]
#[diesel(table_name = schedules)]
pub struct NewScheduleRow<'a> {
    pub user_id: i64,
    pub start_at: i64,
    pub end_at: i64,
    pub channel: &'a str,
    pub shift_name: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Diesel Queryable struct for swap request rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = swap_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SwapRequestRow {
    pub swap_id: i64,
    pub requester_id: i64,
    pub start_at: i64,
    pub end_at: i64,
    pub reason: String,
    pub status: String,
    pub counterparty_id: Option<i64>,
    pub target_user_id: Option<i64>,
    pub approved_at: Option<i64>,
    pub created_at: i64,
}

impl TryFrom<SwapRequestRow> for SwapRequest {
    type Error = PersistenceError;

    fn try_from(row: SwapRequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            swap_id: Some(row.swap_id),
            requester_id: row.requester_id,
            window: to_window(row.start_at, row.end_at)?,
            reason: row.reason,
            status: row.status.parse::<SwapStatus>().map_err(corrupt)?,
            counterparty_id: row.counterparty_id,
            target_user_id: row.target_user_id,
            approved_at: row.approved_at.map(to_instant).transpose()?,
            created_at: to_instant(row.created_at)?,
        })
    }
}

/// Insertable struct for new swap requests.
#[derive(Insertable)]
#[diesel(table_name = swap_requests)]
pub struct NewSwapRequestRow<'a> {
    pub requester_id: i64,
    pub start_at: i64,
    pub end_at: i64,
    pub reason: &'a str,
    pub status: &'a str,
    pub counterparty_id: Option<i64>,
    pub target_user_id: Option<i64>,
    pub approved_at: Option<i64>,
    pub created_at: i64,
}

impl<'a> From<&'a SwapRequest> for NewSwapRequestRow<'a> {
    fn from(request: &'a SwapRequest) -> Self {
        Self {
            requester_id: request.requester_id,
            start_at: request.window.start().unix_timestamp(),
            end_at: request.window.end().unix_timestamp(),
            reason: &request.reason,
            status: request.status.as_str(),
            counterparty_id: request.counterparty_id,
            target_user_id: request.target_user_id,
            approved_at: request.approved_at.map(OffsetDateTime::unix_timestamp),
            created_at: request.created_at.unix_timestamp(),
        }
    }
}

/// Diesel Queryable struct for holiday swap rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = holiday_swaps)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HolidaySwapRow {
    pub holiday_swap_id: i64,
    pub requester_id: i64,
    pub target_user_id: i64,
    pub off_date: String,
    pub reason: String,
    pub status: String,
    pub approved_at: Option<i64>,
    pub created_schedule_id: Option<i64>,
    pub created_at: i64,
}

impl TryFrom<HolidaySwapRow> for HolidaySwap {
    type Error = PersistenceError;

    fn try_from(row: HolidaySwapRow) -> Result<Self, Self::Error> {
        Ok(Self {
            holiday_swap_id: Some(row.holiday_swap_id),
            requester_id: row.requester_id,
            target_user_id: row.target_user_id,
            off_date: parse_date(&row.off_date).map_err(corrupt)?,
            reason: row.reason,
            status: row.status.parse::<HolidaySwapStatus>().map_err(corrupt)?,
            approved_at: row.approved_at.map(to_instant).transpose()?,
            created_schedule_id: row.created_schedule_id,
            created_at: to_instant(row.created_at)?,
        })
    }
}

/// Insertable struct for new holiday swaps.
#[derive(Insertable)]
#[diesel(table_name = holiday_swaps)]
pub struct NewHolidaySwapRow<'a> {
    pub requester_id: i64,
    pub target_user_id: i64,
    pub off_date: String,
    pub reason: &'a str,
    pub status: &'a str,
    pub approved_at: Option<i64>,
    pub created_schedule_id: Option<i64>,
    pub created_at: i64,
}

impl<'a> From<&'a HolidaySwap> for NewHolidaySwapRow<'a> {
    fn from(request: &'a HolidaySwap) -> Self {
        Self {
            requester_id: request.requester_id,
            target_user_id: request.target_user_id,
            off_date: format_date(request.off_date),
            reason: &request.reason,
            status: request.status.as_str(),
            approved_at: request.approved_at.map(OffsetDateTime::unix_timestamp),
            created_schedule_id: request.created_schedule_id,
            created_at: request.created_at.unix_timestamp(),
        }
    }
}

/// Diesel Queryable struct for user rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub is_active: i32,
    pub created_at: i64,
}

/// Insertable struct for new users.
#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub is_active: i32,
    pub created_at: i64,
}

/// Diesel Queryable struct for notification rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationRow {
    pub notification_id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub ref_type: String,
    pub ref_id: Option<i64>,
    pub is_read: i32,
    pub created_at: i64,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = PersistenceError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            notification_id: row.notification_id,
            user_id: row.user_id,
            title: row.title,
            body: row.body,
            ref_type: row.ref_type.parse::<RefType>().map_err(corrupt)?,
            ref_id: row.ref_id,
            is_read: row.is_read != 0,
            created_at: to_instant(row.created_at)?,
        })
    }
}

/// Insertable struct for new notifications.
#[derive(Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotificationRow<'a> {
    pub user_id: i64,
    pub title: &'a str,
    pub body: &'a str,
    pub ref_type: &'a str,
    pub ref_id: Option<i64>,
    pub is_read: i32,
    pub created_at: i64,
}
