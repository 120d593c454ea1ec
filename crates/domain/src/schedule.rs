// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedules and the time windows they occupy.
//!
//! ## Invariants
//!
//! - A window is half-open: `[start, end)` with `end > start`
//! - Two windows overlap iff `NOT(a.end <= b.start OR a.start >= b.end)`,
//!   so windows that merely touch do not overlap
//! - No two schedules of one user overlap (enforced by the store)

use crate::error::DomainError;
use crate::types::Channel;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Length of a standard shift.
pub const SHIFT_LENGTH: Duration = Duration::hours(8);

/// A half-open interval `[start, end)` of absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl TimeWindow {
    /// Creates a window, rejecting empty or inverted ranges.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeRange` if `end <= start`.
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a standard-length shift window beginning at `start`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if the shift would end past
    /// the last representable instant.
    pub fn shift_from(start: OffsetDateTime) -> Result<Self, DomainError> {
        let end: OffsetDateTime = start.checked_add(SHIFT_LENGTH).ok_or_else(|| {
            DomainError::InvalidTimestamp {
                value: start.to_string(),
                error: String::from("an eight-hour shift from this start is out of range"),
            }
        })?;
        Ok(Self { start, end })
    }

    /// Returns the inclusive start.
    #[must_use]
    pub const fn start(&self) -> OffsetDateTime {
        self.start
    }

    /// Returns the exclusive end.
    #[must_use]
    pub const fn end(&self) -> OffsetDateTime {
        self.end
    }

    /// Returns whether two windows share any instant.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }

    /// Returns whether `instant` lies inside the window.
    #[must_use]
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// A schedule that has not been stored yet, or the new contents of a stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDraft {
    /// The owner.
    pub user_id: i64,
    /// The occupied window.
    pub window: TimeWindow,
    /// The staffed channel.
    pub channel: Channel,
    /// Optional shift label.
    pub shift_name: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
}

impl ScheduleDraft {
    /// Validates and builds a draft from raw parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the user id is zero, the range is inverted,
    /// or the channel is unknown.
    pub fn new(
        user_id: i64,
        start: OffsetDateTime,
        end: OffsetDateTime,
        channel: &str,
        shift_name: Option<String>,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        if user_id == 0 {
            return Err(DomainError::MissingUserId { field: "user_id" });
        }
        let window: TimeWindow = TimeWindow::new(start, end)?;
        let channel: Channel = channel.parse()?;
        Ok(Self {
            user_id,
            window,
            channel,
            shift_name: normalize_label(shift_name),
            notes: normalize_label(notes),
        })
    }
}

fn normalize_label(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A stored schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// The canonical schedule identifier.
    pub schedule_id: i64,
    /// The owner.
    pub user_id: i64,
    /// The occupied window.
    pub window: TimeWindow,
    /// The staffed channel.
    pub channel: Channel,
    /// Optional shift label.
    pub shift_name: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
}

/// Which lookup strategy located a requester's schedule.
///
/// Strategies are tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupTier {
    /// A schedule intersecting the requested window.
    Overlap,
    /// A schedule with exactly the requested window.
    ExactWindow,
    /// Any schedule on the local calendar day of the requested start.
    SameDay,
}

impl LookupTier {
    /// Returns a stable label for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Overlap => "overlap",
            Self::ExactWindow => "exact_window",
            Self::SameDay => "same_day",
        }
    }
}

/// Checks the ownership preconditions of exchanging two schedules.
///
/// Overlap with each new owner's remaining schedules is checked by the store,
/// inside the same transaction as the write.
///
/// # Errors
///
/// - `OwnershipMismatch` if either schedule is not held by the expected owner
/// - `IdenticalWindows` if both schedules cover the same window
pub fn validate_ownership_exchange(
    first: &Schedule,
    second: &Schedule,
    first_owner: i64,
    second_owner: i64,
) -> Result<(), DomainError> {
    if first.user_id != first_owner {
        return Err(DomainError::OwnershipMismatch {
            schedule_id: first.schedule_id,
            expected_owner: first_owner,
            actual_owner: first.user_id,
        });
    }
    if second.user_id != second_owner {
        return Err(DomainError::OwnershipMismatch {
            schedule_id: second.schedule_id,
            expected_owner: second_owner,
            actual_owner: second.user_id,
        });
    }
    if first.window == second.window {
        return Err(DomainError::IdenticalWindows {
            first_schedule_id: first.schedule_id,
            second_schedule_id: second.schedule_id,
        });
    }
    Ok(())
}
