// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, OffsetDateTime};

/// Intent to open a new shift swap request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapProposal {
    /// The agent giving up the window.
    pub requester_id: i64,
    /// Start of the eight-hour window on offer.
    pub start: OffsetDateTime,
    /// Free-text reason.
    pub reason: String,
    /// The colleague addressed directly, if any.
    pub target_user_id: Option<i64>,
}

/// A command against an existing swap request.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapCommand {
    /// A colleague takes the swap.
    Accept {
        /// The colleague taking the requester's window.
        counterparty_id: i64,
        /// When the exchange is recorded.
        approved_at: OffsetDateTime,
    },
    /// The requester withdraws the request.
    Cancel {
        /// The user attempting the cancellation.
        caller_id: i64,
    },
}

/// Intent to open a new holiday swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidaySwapProposal {
    /// The agent asking for cover.
    pub requester_id: i64,
    /// The agent asked to cover.
    pub target_user_id: i64,
    /// The local date to be covered.
    pub off_date: Date,
    /// Free-text reason.
    pub reason: String,
}

/// A command against an existing holiday swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidaySwapCommand {
    /// The target consents.
    TargetAccept {
        /// The user attempting the action.
        caller_id: i64,
    },
    /// The target declines.
    TargetReject {
        /// The user attempting the action.
        caller_id: i64,
    },
    /// Backoffice approves. The approver's role is checked by the caller.
    Approve {
        /// When the approval is recorded.
        approved_at: OffsetDateTime,
    },
    /// The requester withdraws the request.
    Cancel {
        /// The user attempting the cancellation.
        caller_id: i64,
    },
}
