// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::holiday_swap::HolidaySwapStatus;
use crate::swap_request::SwapStatus;
use time::{Date, OffsetDateTime};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A time window whose end does not come after its start.
    InvalidTimeRange {
        /// The window start.
        start: OffsetDateTime,
        /// The window end.
        end: OffsetDateTime,
    },
    /// Channel value is not one of the known channels.
    InvalidChannel(String),
    /// Role value is not one of the known roles.
    InvalidRole(String),
    /// A timestamp string could not be parsed.
    InvalidTimestamp {
        /// The rejected input.
        value: String,
        /// The parser message.
        error: String,
    },
    /// A wall-clock time string (`HH:mm`) could not be parsed.
    InvalidClockTime(String),
    /// A calendar date string (`YYYY-MM-DD`) could not be parsed.
    InvalidDate(String),
    /// A month string (`YYYY-MM`) could not be parsed.
    InvalidMonth(String),
    /// The configured site time zone is unknown.
    InvalidTimezone(String),
    /// A local wall-clock time does not exist (or is ambiguous) in the site time zone.
    UnresolvableLocalTime {
        /// Description of the local time that failed.
        reason: String,
    },
    /// A user identifier is missing or zero.
    MissingUserId {
        /// The field that carried the identifier.
        field: &'static str,
    },
    /// A request names the same user on both sides.
    SelfReference {
        /// The user identifier that appeared twice.
        user_id: i64,
    },
    /// User name is empty or invalid.
    InvalidName(String),
    /// Email is empty or malformed.
    InvalidEmail(String),
    /// Email already belongs to another user.
    DuplicateEmail(String),
    /// The user directory already has users, so bootstrap is closed.
    DirectoryNotEmpty,
    /// A user was created without any role.
    NoRolesAssigned,
    /// Schedule does not exist.
    ScheduleNotFound(i64),
    /// Swap request does not exist.
    SwapRequestNotFound(i64),
    /// Holiday swap does not exist.
    HolidaySwapNotFound(i64),
    /// User does not exist.
    UserNotFound(i64),
    /// Notification does not exist for the caller.
    NotificationNotFound(i64),
    /// No schedule of the requester could be located for a swap window.
    RequesterShiftNotFound {
        /// The requester.
        user_id: i64,
        /// The requested window start.
        start: OffsetDateTime,
    },
    /// The requester holds no schedule at the requested window and the
    /// site policy requires one.
    RequesterHasNoShift {
        /// The requester.
        user_id: i64,
        /// The requested window start.
        start: OffsetDateTime,
    },
    /// Only the requester may perform this action.
    NotRequester {
        /// The request identifier.
        request_id: i64,
        /// The caller that attempted the action.
        caller_id: i64,
    },
    /// Only the named target may perform this action.
    NotTarget {
        /// The request identifier.
        request_id: i64,
        /// The caller that attempted the action.
        caller_id: i64,
    },
    /// A swap request cannot take the attempted transition from its current status.
    InvalidSwapTransition {
        /// The current status.
        from: SwapStatus,
        /// The attempted action.
        action: &'static str,
    },
    /// A holiday swap cannot take the attempted transition from its current status.
    InvalidHolidaySwapTransition {
        /// The current status.
        from: HolidaySwapStatus,
        /// The attempted action.
        action: &'static str,
    },
    /// The holiday swap target is working on the requested off-date.
    TargetNotOff {
        /// The target user.
        user_id: i64,
        /// The local off-date.
        off_date: Date,
    },
    /// An approved shift would start outside the off-date.
    StartOutsideOffDate {
        /// The resolved start.
        start: OffsetDateTime,
        /// The local off-date.
        off_date: Date,
    },
    /// The user already holds a schedule overlapping the window.
    ScheduleOverlap {
        /// The user whose schedules conflict.
        user_id: i64,
        /// The conflicting window start.
        start: OffsetDateTime,
        /// The conflicting window end.
        end: OffsetDateTime,
    },
    /// Two schedules with identical windows cannot be exchanged.
    IdenticalWindows {
        /// First schedule.
        first_schedule_id: i64,
        /// Second schedule.
        second_schedule_id: i64,
    },
    /// A schedule is not owned by the expected user.
    OwnershipMismatch {
        /// The schedule being exchanged.
        schedule_id: i64,
        /// The owner the caller expected.
        expected_owner: i64,
        /// The owner on record.
        actual_owner: i64,
    },
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeRange { start, end } => {
                write!(f, "Invalid time range: end {end} must be after start {start}")
            }
            Self::InvalidChannel(value) => {
                write!(f, "Invalid channel '{value}': expected VOICE or SOSMED")
            }
            Self::InvalidRole(value) => write!(f, "Invalid role: {value}"),
            Self::InvalidTimestamp { value, error } => {
                write!(f, "Invalid timestamp '{value}': {error}")
            }
            Self::InvalidClockTime(value) => {
                write!(f, "Invalid clock time '{value}': expected HH:mm")
            }
            Self::InvalidDate(value) => write!(f, "Invalid date '{value}': expected YYYY-MM-DD"),
            Self::InvalidMonth(value) => write!(f, "Invalid month '{value}': expected YYYY-MM"),
            Self::InvalidTimezone(value) => write!(f, "Invalid timezone: {value}"),
            Self::UnresolvableLocalTime { reason } => {
                write!(f, "Local time cannot be resolved: {reason}")
            }
            Self::MissingUserId { field } => write!(f, "Missing user id in '{field}'"),
            Self::SelfReference { user_id } => {
                write!(f, "User {user_id} cannot be on both sides of a request")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::DuplicateEmail(email) => write!(f, "Email '{email}' is already registered"),
            Self::DirectoryNotEmpty => {
                write!(f, "Bootstrap is only allowed while no users exist")
            }
            Self::NoRolesAssigned => write!(f, "A user must hold at least one role"),
            Self::ScheduleNotFound(id) => write!(f, "Schedule {id} not found"),
            Self::SwapRequestNotFound(id) => write!(f, "Swap request {id} not found"),
            Self::HolidaySwapNotFound(id) => write!(f, "Holiday swap {id} not found"),
            Self::UserNotFound(id) => write!(f, "User {id} not found"),
            Self::NotificationNotFound(id) => write!(f, "Notification {id} not found"),
            Self::RequesterShiftNotFound { user_id, start } => {
                write!(f, "No schedule of user {user_id} found near {start}")
            }
            Self::RequesterHasNoShift { user_id, start } => {
                write!(f, "User {user_id} holds no schedule at {start}")
            }
            Self::NotRequester {
                request_id,
                caller_id,
            } => write!(
                f,
                "User {caller_id} is not the requester of request {request_id}"
            ),
            Self::NotTarget {
                request_id,
                caller_id,
            } => write!(
                f,
                "User {caller_id} is not the target of request {request_id}"
            ),
            Self::InvalidSwapTransition { from, action } => {
                write!(f, "Cannot {action} a swap request that is {from}")
            }
            Self::InvalidHolidaySwapTransition { from, action } => {
                write!(f, "Cannot {action} a holiday swap that is {from}")
            }
            Self::TargetNotOff { user_id, off_date } => {
                write!(f, "User {user_id} is not off on {off_date}")
            }
            Self::StartOutsideOffDate { start, off_date } => {
                write!(f, "Start {start} is outside the off-date {off_date}")
            }
            Self::ScheduleOverlap {
                user_id,
                start,
                end,
            } => write!(
                f,
                "User {user_id} already has a schedule overlapping {start} - {end}"
            ),
            Self::IdenticalWindows {
                first_schedule_id,
                second_schedule_id,
            } => write!(
                f,
                "Schedules {first_schedule_id} and {second_schedule_id} cover the same window"
            ),
            Self::OwnershipMismatch {
                schedule_id,
                expected_owner,
                actual_owner,
            } => write!(
                f,
                "Schedule {schedule_id} belongs to user {actual_owner}, not {expected_owner}"
            ),
        }
    }
}

impl std::error::Error for DomainError {}
