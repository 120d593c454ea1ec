// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::announcement::Announcement;
use crate::command::{HolidaySwapCommand, HolidaySwapProposal, SwapCommand, SwapProposal};
use crate::error::CoreError;
use crate::state::{HolidaySwapTransition, SwapTransition};
use shiftdesk_domain::{
    DeliveryMode, DomainError, HolidaySwap, HolidaySwapStatus, SwapRequest, SwapStatus,
    TimeWindow, require_user_id,
};
use time::OffsetDateTime;

/// Opens a new swap request covering eight hours from the proposed start.
///
/// Whether the requester actually holds a shift at that window is a store
/// question and is checked by the caller.
///
/// # Arguments
///
/// * `proposal` - The requester, start, reason, and optional target
/// * `created_at` - The creation timestamp to record
///
/// # Errors
///
/// Returns an error if:
/// - The requester id is zero
/// - The target is the requester
/// - The start is too close to the end of representable time
pub fn propose_swap(
    proposal: SwapProposal,
    created_at: OffsetDateTime,
) -> Result<SwapTransition, CoreError> {
    let requester_id: i64 = require_user_id(proposal.requester_id, "requester_id")?;
    let target_user_id: Option<i64> = proposal.target_user_id.filter(|id| *id != 0);
    if target_user_id == Some(requester_id) {
        return Err(DomainError::SelfReference {
            user_id: requester_id,
        }
        .into());
    }

    let window: TimeWindow = TimeWindow::shift_from(proposal.start)?;
    let request: SwapRequest = SwapRequest {
        swap_id: None,
        requester_id,
        window,
        reason: proposal.reason.trim().to_string(),
        status: SwapStatus::Pending,
        counterparty_id: None,
        target_user_id,
        approved_at: None,
        created_at,
    };
    let announcement: Announcement = Announcement::SwapProposed {
        mode: request.delivery_mode(),
    };

    Ok(SwapTransition {
        request,
        announcement,
    })
}

/// Applies a command to a swap request, producing the next request state.
///
/// Status checks come before any other check, so a settled request always
/// reports `InvalidSwapTransition` to a would-be counterparty.
///
/// # Errors
///
/// Returns an error if:
/// - The request is not `PENDING`
/// - A counterparty tries to take their own request
/// - A direct request is accepted by someone other than its target
/// - Someone other than the requester tries to cancel
pub fn apply_swap(request: &SwapRequest, command: SwapCommand) -> Result<SwapTransition, CoreError> {
    let request_id: i64 = request.swap_id.unwrap_or_default();
    match command {
        SwapCommand::Accept {
            counterparty_id,
            approved_at,
        } => {
            if !request.status.can_transition_to(SwapStatus::Approved) {
                return Err(DomainError::InvalidSwapTransition {
                    from: request.status,
                    action: "accept",
                }
                .into());
            }
            require_user_id(counterparty_id, "counterparty_id")?;
            if counterparty_id == request.requester_id {
                return Err(DomainError::SelfReference {
                    user_id: counterparty_id,
                }
                .into());
            }
            if let DeliveryMode::Direct { target_user_id } = request.delivery_mode()
                && target_user_id != counterparty_id
            {
                return Err(DomainError::NotTarget {
                    request_id,
                    caller_id: counterparty_id,
                }
                .into());
            }

            let mut next: SwapRequest = request.clone();
            next.status = SwapStatus::Approved;
            next.counterparty_id = Some(counterparty_id);
            next.approved_at = Some(approved_at);
            Ok(SwapTransition {
                request: next,
                announcement: Announcement::SwapApproved,
            })
        }
        SwapCommand::Cancel { caller_id } => {
            if caller_id != request.requester_id {
                return Err(DomainError::NotRequester {
                    request_id,
                    caller_id,
                }
                .into());
            }
            if !request.status.can_transition_to(SwapStatus::Cancelled) {
                return Err(DomainError::InvalidSwapTransition {
                    from: request.status,
                    action: "cancel",
                }
                .into());
            }

            let mut next: SwapRequest = request.clone();
            next.status = SwapStatus::Cancelled;
            Ok(SwapTransition {
                request: next,
                announcement: Announcement::SwapCancelled,
            })
        }
    }
}

/// Opens a new holiday swap in `PENDING_TARGET`.
///
/// The "target is off that day" precondition needs the schedule store and
/// is checked by the caller.
///
/// # Errors
///
/// Returns an error if either id is zero or both name the same user.
pub fn propose_holiday_swap(
    proposal: HolidaySwapProposal,
    created_at: OffsetDateTime,
) -> Result<HolidaySwapTransition, CoreError> {
    let requester_id: i64 = require_user_id(proposal.requester_id, "requester_id")?;
    let target_user_id: i64 = require_user_id(proposal.target_user_id, "target_user_id")?;
    if requester_id == target_user_id {
        return Err(DomainError::SelfReference {
            user_id: requester_id,
        }
        .into());
    }

    Ok(HolidaySwapTransition {
        request: HolidaySwap {
            holiday_swap_id: None,
            requester_id,
            target_user_id,
            off_date: proposal.off_date,
            reason: proposal.reason.trim().to_string(),
            status: HolidaySwapStatus::PendingTarget,
            approved_at: None,
            created_schedule_id: None,
            created_at,
        },
        announcement: Announcement::HolidaySwapProposed,
    })
}

/// Applies a command to a holiday swap, producing the next request state.
///
/// Caller identity is checked before status, so an outsider is told
/// `Forbidden` regardless of where the request stands.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not the party allowed to take the action
/// - The current status does not permit the transition
pub fn apply_holiday_swap(
    request: &HolidaySwap,
    command: HolidaySwapCommand,
) -> Result<HolidaySwapTransition, CoreError> {
    let request_id: i64 = request.holiday_swap_id.unwrap_or_default();
    let (caller_id, required_party, target, action, announcement) = match command {
        HolidaySwapCommand::TargetAccept { caller_id } => (
            Some(caller_id),
            Party::Target,
            HolidaySwapStatus::PendingBackoffice,
            "accept",
            Announcement::HolidaySwapAcceptedByTarget,
        ),
        HolidaySwapCommand::TargetReject { caller_id } => (
            Some(caller_id),
            Party::Target,
            HolidaySwapStatus::Rejected,
            "reject",
            Announcement::HolidaySwapRejectedByTarget,
        ),
        HolidaySwapCommand::Approve { .. } => (
            None,
            Party::Backoffice,
            HolidaySwapStatus::Approved,
            "approve",
            Announcement::HolidaySwapApproved,
        ),
        HolidaySwapCommand::Cancel { caller_id } => (
            Some(caller_id),
            Party::Requester,
            HolidaySwapStatus::Cancelled,
            "cancel",
            Announcement::HolidaySwapCancelled,
        ),
    };

    if let Some(caller_id) = caller_id {
        match required_party {
            Party::Target if caller_id != request.target_user_id => {
                return Err(DomainError::NotTarget {
                    request_id,
                    caller_id,
                }
                .into());
            }
            Party::Requester if caller_id != request.requester_id => {
                return Err(DomainError::NotRequester {
                    request_id,
                    caller_id,
                }
                .into());
            }
            _ => {}
        }
    }

    if !request.status.can_transition_to(target) {
        return Err(DomainError::InvalidHolidaySwapTransition {
            from: request.status,
            action,
        }
        .into());
    }

    let mut next: HolidaySwap = request.clone();
    next.status = target;
    if let HolidaySwapCommand::Approve { approved_at } = command {
        next.approved_at = Some(approved_at);
    }

    Ok(HolidaySwapTransition {
        request: next,
        announcement,
    })
}

/// Which party may take a holiday swap action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Party {
    Requester,
    Target,
    Backoffice,
}
