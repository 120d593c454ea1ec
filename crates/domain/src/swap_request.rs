// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::schedule::TimeWindow;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle of a shift swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapStatus {
    /// Waiting for a counterparty.
    #[default]
    Pending,
    /// Schedules were exchanged.
    Approved,
    /// Withdrawn by the requester.
    Cancelled,
}

impl FromStr for SwapStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidName(format!("unknown swap status: {s}"))),
        }
    }
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SwapStatus {
    /// Converts this status to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Only `PENDING → APPROVED` and `PENDING → CANCELLED` exist.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Cancelled)
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Cancelled)
    }
}

/// How a new swap request reaches potential counterparties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Addressed to one named colleague.
    Direct {
        /// The addressed user.
        target_user_id: i64,
    },
    /// Offered to everyone on the requester's channel during the window.
    Broadcast,
}

/// A request to hand an eight-hour window to a colleague.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// The canonical request identifier.
    /// `None` indicates the request has not been persisted yet.
    pub swap_id: Option<i64>,
    /// The agent giving up the window.
    pub requester_id: i64,
    /// The window on offer.
    pub window: TimeWindow,
    /// Free-text reason.
    pub reason: String,
    /// Current status.
    pub status: SwapStatus,
    /// The colleague who took the swap, set on approval.
    pub counterparty_id: Option<i64>,
    /// The colleague the request was addressed to, if any.
    pub target_user_id: Option<i64>,
    /// When the swap was approved.
    pub approved_at: Option<OffsetDateTime>,
    /// When the request was created.
    pub created_at: OffsetDateTime,
}

impl SwapRequest {
    /// Resolves the delivery mode from the addressed target.
    #[must_use]
    pub const fn delivery_mode(&self) -> DeliveryMode {
        match self.target_user_id {
            Some(target_user_id) => DeliveryMode::Direct { target_user_id },
            None => DeliveryMode::Broadcast,
        }
    }

    /// Returns whether `user_id` may see this request in a listing.
    ///
    /// Non-backoffice users see their own requests, requests addressed to
    /// them, and broadcast requests.
    #[must_use]
    pub fn is_visible_to(&self, user_id: i64) -> bool {
        self.requester_id == user_id
            || self.target_user_id.is_none_or(|target| target == user_id)
    }
}
