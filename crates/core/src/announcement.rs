// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Who hears about each workflow transition.
//!
//! Announcements name audiences, not users. The API layer resolves each
//! audience against the directory and the schedule store, renders the
//! message, and dispatches it best-effort after the transition commits.

use shiftdesk_domain::{DeliveryMode, RefType};

/// A group of users to notify about a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    /// The user who opened the request.
    Requester,
    /// The user a holiday swap or direct swap was addressed to.
    Target,
    /// The colleague who accepted a swap.
    Counterparty,
    /// Every backoffice user.
    Backoffice,
    /// Users working the requester's channel during the requested window.
    ChannelMates,
}

/// A notable transition of a swap or holiday swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    /// A swap request was opened.
    SwapProposed {
        /// How the request reaches counterparties.
        mode: DeliveryMode,
    },
    /// A swap request was accepted and the schedules exchanged.
    SwapApproved,
    /// A swap request was withdrawn.
    SwapCancelled,
    /// A holiday swap was opened.
    HolidaySwapProposed,
    /// The target consented to a holiday swap.
    HolidaySwapAcceptedByTarget,
    /// The target declined a holiday swap.
    HolidaySwapRejectedByTarget,
    /// Backoffice approved a holiday swap.
    HolidaySwapApproved,
    /// A holiday swap was withdrawn.
    HolidaySwapCancelled,
}

impl Announcement {
    /// Returns the notification headline.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::SwapProposed { .. } => "Shift Swap Requested",
            Self::SwapApproved => "Shift Swap Approved",
            Self::SwapCancelled => "Shift Swap Cancelled",
            Self::HolidaySwapProposed => "Holiday Swap Requested",
            Self::HolidaySwapAcceptedByTarget => "Holiday Swap Accepted by Target",
            Self::HolidaySwapRejectedByTarget => "Holiday Swap Rejected by Target",
            Self::HolidaySwapApproved => "Holiday Swap Approved",
            Self::HolidaySwapCancelled => "Holiday Swap Cancelled",
        }
    }

    /// Returns the kind of record the notification points at.
    #[must_use]
    pub const fn ref_type(&self) -> RefType {
        match self {
            Self::SwapProposed { .. } | Self::SwapApproved | Self::SwapCancelled => RefType::Swap,
            Self::HolidaySwapProposed
            | Self::HolidaySwapAcceptedByTarget
            | Self::HolidaySwapRejectedByTarget
            | Self::HolidaySwapApproved
            | Self::HolidaySwapCancelled => RefType::HolidaySwap,
        }
    }

    /// Returns the audiences to notify, in delivery order.
    #[must_use]
    pub const fn audiences(&self) -> &'static [Audience] {
        match self {
            Self::SwapProposed {
                mode: DeliveryMode::Direct { .. },
            } => &[Audience::Requester, Audience::Target, Audience::Backoffice],
            Self::SwapProposed {
                mode: DeliveryMode::Broadcast,
            } => &[Audience::Requester, Audience::ChannelMates],
            Self::SwapApproved => &[Audience::Requester, Audience::Counterparty],
            Self::SwapCancelled => &[Audience::Requester],
            Self::HolidaySwapProposed
            | Self::HolidaySwapAcceptedByTarget
            | Self::HolidaySwapRejectedByTarget
            | Self::HolidaySwapApproved => {
                &[Audience::Requester, Audience::Target, Audience::Backoffice]
            }
            Self::HolidaySwapCancelled => &[Audience::Requester, Audience::Target],
        }
    }
}
