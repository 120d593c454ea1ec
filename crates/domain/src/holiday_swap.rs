// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Lifecycle of a holiday swap.
///
/// The forward path is `PendingTarget → PendingBackoffice → Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HolidaySwapStatus {
    /// Waiting for the target to consent.
    #[default]
    #[serde(rename = "PENDING_TARGET")]
    PendingTarget,
    /// Target consented; waiting for backoffice approval.
    #[serde(rename = "PENDING_BO")]
    PendingBackoffice,
    /// Approved; the target's shift was created.
    #[serde(rename = "APPROVED")]
    Approved,
    /// Declined by the target.
    #[serde(rename = "REJECTED")]
    Rejected,
    /// Withdrawn by the requester.
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

impl FromStr for HolidaySwapStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING_TARGET" => Ok(Self::PendingTarget),
            "PENDING_BO" => Ok(Self::PendingBackoffice),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidName(format!(
                "unknown holiday swap status: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for HolidaySwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl HolidaySwapStatus {
    /// Converts this status to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingTarget => "PENDING_TARGET",
            Self::PendingBackoffice => "PENDING_BO",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - `PendingTarget` → `PendingBackoffice` (target accepts)
    /// - `PendingTarget` → `Rejected` (target rejects)
    /// - `PendingBackoffice` → `Approved` (backoffice approves)
    /// - `PendingTarget` | `PendingBackoffice` → `Cancelled` (requester cancels)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::PendingTarget,
                Self::PendingBackoffice | Self::Rejected | Self::Cancelled
            ) | (Self::PendingBackoffice, Self::Approved | Self::Cancelled)
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Cancelled)
    }
}

/// A request for the target to work the requester's shift on a day the
/// target is off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidaySwap {
    /// The canonical holiday swap identifier.
    /// `None` indicates the request has not been persisted yet.
    pub holiday_swap_id: Option<i64>,
    /// The agent asking for cover.
    pub requester_id: i64,
    /// The agent asked to cover.
    pub target_user_id: i64,
    /// The local calendar date being covered.
    pub off_date: Date,
    /// Free-text reason.
    pub reason: String,
    /// Current status.
    pub status: HolidaySwapStatus,
    /// When backoffice approved.
    pub approved_at: Option<OffsetDateTime>,
    /// The target schedule created on approval.
    pub created_schedule_id: Option<i64>,
    /// When the request was created.
    pub created_at: OffsetDateTime,
}

impl HolidaySwap {
    /// Returns whether `user_id` is the requester or the target.
    #[must_use]
    pub const fn involves(&self, user_id: i64) -> bool {
        self.requester_id == user_id || self.target_user_id == user_id
    }
}
