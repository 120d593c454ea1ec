// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversions from domain values to response DTOs.

use num_traits::cast::ToPrimitive;
use shiftdesk_domain::{Notification, Schedule, User};
use time::{OffsetDateTime, UtcOffset};
use time::format_description::well_known::Rfc3339;

use crate::error::ApiError;
use crate::request_response::{NotificationInfo, ScheduleInfo, UserInfo};

/// Formats an instant as RFC 3339 in UTC.
///
/// # Errors
///
/// Returns an error if the instant cannot be represented in RFC 3339.
pub fn format_instant(instant: OffsetDateTime) -> Result<String, ApiError> {
    instant.to_offset(UtcOffset::UTC).format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format instant {instant}: {e}"),
    })
}

/// Converts a stored row count to the unsigned count the API reports.
///
/// # Errors
///
/// Returns an error if the count is negative.
pub fn to_count(total: i64) -> Result<u64, ApiError> {
    total.to_u64().ok_or_else(|| ApiError::Internal {
        message: format!("Invalid row count {total}"),
    })
}

/// Builds the API view of a schedule.
///
/// # Errors
///
/// Returns an error if an instant cannot be formatted.
pub fn schedule_info(schedule: &Schedule) -> Result<ScheduleInfo, ApiError> {
    Ok(ScheduleInfo {
        schedule_id: schedule.schedule_id,
        user_id: schedule.user_id,
        start_at: format_instant(schedule.window.start())?,
        end_at: format_instant(schedule.window.end())?,
        channel: schedule.channel.to_string(),
        shift_name: schedule.shift_name.clone(),
        notes: schedule.notes.clone(),
    })
}

#[must_use]
pub fn user_info(user: &User) -> UserInfo {
    UserInfo {
        user_id: user.user_id,
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        active: user.active,
        roles: user.roles.iter().map(ToString::to_string).collect(),
    }
}

/// # Errors
///
/// Returns an error if the creation instant cannot be formatted.
pub fn notification_info(notification: &Notification) -> Result<NotificationInfo, ApiError> {
    Ok(NotificationInfo {
        notification_id: notification.notification_id,
        title: notification.title.clone(),
        body: notification.body.clone(),
        ref_type: notification.ref_type.as_str().to_string(),
        ref_id: notification.ref_id,
        is_read: notification.is_read,
        created_at: format_instant(notification.created_at)?,
    })
}
