// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift swap workflow.
//!
//! A swap request offers the requester's eight-hour window either to one
//! named colleague (direct) or to everyone on the requester's channel at
//! that time (broadcast). Accepting it exchanges the owners of the
//! requester's shift and the counterparty's nominated shift.

use std::collections::HashMap;

use shiftdesk::{SwapCommand, SwapProposal, SwapTransition, apply_swap, propose_swap};
use shiftdesk_domain::{
    DeliveryMode, DomainError, LookupTier, Schedule, SwapRequest, TimeWindow, display_name,
    parse_timestamp,
};
use shiftdesk_persistence::{PageRequest, SqlitePersistence};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::WorkflowSettings;
use crate::auth::AuthenticatedActor;
use crate::directory::UserDirectory;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::notify::{Outcome, Parties, announce};
use crate::request_response::{
    AcceptSwapRequest, ListSwapRequestsResponse, ProposeSwapRequest, SwapRequestInfo,
};
use crate::views::{format_instant, to_count};

/// Largest page of swap requests.
pub const MAX_SWAP_PAGE_SIZE: i64 = 200;

/// Opens a swap request for the acting user.
///
/// When the requester holds no schedule at the window, the request is
/// still opened with a warning unless the site requires one.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `settings` - Site calendar and policy
/// * `actor` - The requester
/// * `request` - Start, reason, and optional target
/// * `now` - The creation timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The start does not parse
/// - The target is the requester or does not exist
/// - The site requires a requester schedule and none overlaps the window
pub fn propose(
    persistence: &mut SqlitePersistence,
    settings: &WorkflowSettings,
    actor: &AuthenticatedActor,
    request: &ProposeSwapRequest,
    now: OffsetDateTime,
) -> Result<Outcome<SwapRequestInfo>, ApiError> {
    let start: OffsetDateTime = parse_timestamp(&request.start_at).map_err(translate_domain_error)?;
    let transition: SwapTransition = propose_swap(
        SwapProposal {
            requester_id: actor.user_id(),
            start,
            reason: request.reason.clone(),
            target_user_id: request.target_user_id,
        },
        now,
    )
    .map_err(translate_core_error)?;

    if let DeliveryMode::Direct { target_user_id } = transition.request.delivery_mode() {
        persistence.require_user(target_user_id)?;
    }

    let draft: &SwapRequest = &transition.request;
    let stored: SwapRequest = persistence.transaction(|tx| -> Result<SwapRequest, ApiError> {
        if !tx.exists_overlap(draft.requester_id, &draft.window, None)? {
            if settings.require_requester_schedule {
                return Err(translate_domain_error(DomainError::RequesterHasNoShift {
                    user_id: draft.requester_id,
                    start: draft.window.start(),
                }));
            }
            warn!(
                requester_id = draft.requester_id,
                start = %draft.window.start(),
                "Requester holds no schedule at the swap window; opening anyway"
            );
        }
        Ok(tx.insert_swap_request(draft)?)
    })?;

    let swap_id: i64 = stored.swap_id.unwrap_or_default();
    info!(
        swap_id,
        requester_id = stored.requester_id,
        target_user_id = ?stored.target_user_id,
        "Opened swap request"
    );

    let names: HashMap<i64, String> = persistence.display_names(&[stored.requester_id])?;
    let body: String = format!(
        "{} requested a swap for {} to {} (8h)",
        name_of(&names, stored.requester_id),
        settings.calendar.format_local(stored.window.start()),
        settings.calendar.format_local(stored.window.end()),
    );
    let parties: Parties = Parties {
        requester_id: stored.requester_id,
        target_user_id: stored.target_user_id,
        counterparty_id: None,
        window: Some(stored.window),
    };
    let notices = announce(
        persistence,
        transition.announcement,
        &parties,
        &body,
        Some(swap_id),
        now,
    );

    Ok(Outcome {
        response: describe(persistence, &stored)?,
        notices,
    })
}

/// Accepts a swap request on behalf of the acting user.
///
/// The status check, the requester shift lookup, the ownership exchange,
/// and the status write share one transaction.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `settings` - Site calendar and policy
/// * `actor` - The counterparty
/// * `swap_id` - The request to accept
/// * `request` - The counterparty's schedule offered in exchange
/// * `now` - The approval timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The request does not exist or is not `PENDING`
/// - The actor is the requester, or not the target of a direct request
/// - No requester schedule can be located for the window
/// - Either schedule has the wrong owner, the windows are identical, or
///   the exchange would double-book someone
pub fn accept(
    persistence: &mut SqlitePersistence,
    settings: &WorkflowSettings,
    actor: &AuthenticatedActor,
    swap_id: i64,
    request: AcceptSwapRequest,
    now: OffsetDateTime,
) -> Result<Outcome<SwapRequestInfo>, ApiError> {
    let counterparty_id: i64 = actor.user_id();

    let transition: SwapTransition =
        persistence.transaction(|tx| -> Result<SwapTransition, ApiError> {
            let current: SwapRequest = tx.swap_request(swap_id)?;
            let transition: SwapTransition = apply_swap(
                &current,
                SwapCommand::Accept {
                    counterparty_id,
                    approved_at: now,
                },
            )
            .map_err(translate_core_error)?;

            let day: TimeWindow = settings
                .calendar
                .day_of(current.window.start())
                .map_err(translate_domain_error)?;
            let (own_shift, tier): (Schedule, LookupTier) = tx
                .locate_shift(current.requester_id, &current.window, &day)?
                .ok_or_else(|| {
                    translate_domain_error(DomainError::RequesterShiftNotFound {
                        user_id: current.requester_id,
                        start: current.window.start(),
                    })
                })?;
            debug!(
                swap_id,
                schedule_id = own_shift.schedule_id,
                tier = tier.as_str(),
                "Located requester shift"
            );

            tx.swap_schedules(
                own_shift.schedule_id,
                request.counterparty_schedule_id,
                current.requester_id,
                counterparty_id,
                now,
            )?;
            tx.save_swap_request(&transition.request)?;
            Ok(transition)
        })?;

    let approved: &SwapRequest = &transition.request;
    info!(swap_id, counterparty_id, "Swap request approved");

    let names: HashMap<i64, String> = persistence.display_names(&[counterparty_id])?;
    let body: String = format!(
        "Swap #{swap_id} accepted by {} for {} to {}. Schedules have been updated.",
        name_of(&names, counterparty_id),
        settings.calendar.format_local(approved.window.start()),
        settings.calendar.format_local(approved.window.end()),
    );
    let parties: Parties = Parties {
        requester_id: approved.requester_id,
        target_user_id: approved.target_user_id,
        counterparty_id: Some(counterparty_id),
        window: Some(approved.window),
    };
    let notices = announce(
        persistence,
        transition.announcement,
        &parties,
        &body,
        Some(swap_id),
        now,
    );

    Ok(Outcome {
        response: describe(persistence, approved)?,
        notices,
    })
}

/// Withdraws a pending swap request.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not exist
/// - The actor is not the requester
/// - The request is not `PENDING`
pub fn cancel(
    persistence: &mut SqlitePersistence,
    settings: &WorkflowSettings,
    actor: &AuthenticatedActor,
    swap_id: i64,
    now: OffsetDateTime,
) -> Result<Outcome<SwapRequestInfo>, ApiError> {
    let caller_id: i64 = actor.user_id();
    let transition: SwapTransition =
        persistence.transaction(|tx| -> Result<SwapTransition, ApiError> {
            let current: SwapRequest = tx.swap_request(swap_id)?;
            let transition: SwapTransition =
                apply_swap(&current, SwapCommand::Cancel { caller_id }).map_err(translate_core_error)?;
            tx.save_swap_request(&transition.request)?;
            Ok(transition)
        })?;

    let cancelled: &SwapRequest = &transition.request;
    info!(swap_id, caller_id, "Swap request cancelled");

    let body: String = format!(
        "Swap #{swap_id} for {} to {} was cancelled",
        settings.calendar.format_local(cancelled.window.start()),
        settings.calendar.format_local(cancelled.window.end()),
    );
    let notices = announce(
        persistence,
        transition.announcement,
        &Parties::requester(cancelled.requester_id),
        &body,
        Some(swap_id),
        now,
    );

    Ok(Outcome {
        response: describe(persistence, cancelled)?,
        notices,
    })
}

/// Lists swap requests visible to the actor, newest first.
///
/// Backoffice actors see every request. Agents see their own, those
/// addressed to them, and broadcast requests.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    page: i64,
    size: i64,
) -> Result<ListSwapRequestsResponse, ApiError> {
    let page: PageRequest = PageRequest::new(page, size, MAX_SWAP_PAGE_SIZE);
    let viewer: Option<i64> = if actor.is_backoffice() {
        None
    } else {
        Some(actor.user_id())
    };
    let (requests, total) = persistence.list_swap_requests(page, viewer)?;

    let items: Vec<SwapRequestInfo> = requests
        .iter()
        .map(|request| describe(persistence, request))
        .collect::<Result<_, _>>()?;

    Ok(ListSwapRequestsResponse {
        items,
        total: to_count(total)?,
        page: page.page(),
        size: page.size(),
    })
}

fn name_of(names: &HashMap<i64, String>, user_id: i64) -> String {
    names
        .get(&user_id)
        .cloned()
        .unwrap_or_else(|| display_name(user_id, None))
}

/// Builds the listing entry, resolving names and the channel.
fn describe(
    persistence: &mut SqlitePersistence,
    request: &SwapRequest,
) -> Result<SwapRequestInfo, ApiError> {
    let mut ids: Vec<i64> = vec![request.requester_id];
    ids.extend(request.counterparty_id);
    let names: HashMap<i64, String> = persistence.display_names(&ids)?;

    let mut channel: Option<String> = persistence
        .find_overlapping(request.requester_id, &request.window)?
        .map(|s| s.channel.to_string());
    if channel.is_none()
        && let Some(counterparty_id) = request.counterparty_id
    {
        channel = persistence
            .find_overlapping(counterparty_id, &request.window)?
            .map(|s| s.channel.to_string());
    }

    let delivery_mode: &str = match request.delivery_mode() {
        DeliveryMode::Direct { .. } => "DIRECT",
        DeliveryMode::Broadcast => "BROADCAST",
    };

    Ok(SwapRequestInfo {
        swap_id: request.swap_id.unwrap_or_default(),
        requester_id: request.requester_id,
        requester_name: name_of(&names, request.requester_id),
        counterparty_id: request.counterparty_id,
        counterparty_name: request.counterparty_id.map(|id| name_of(&names, id)),
        target_user_id: request.target_user_id,
        delivery_mode: delivery_mode.to_string(),
        start_at: format_instant(request.window.start())?,
        end_at: format_instant(request.window.end())?,
        reason: request.reason.clone(),
        status: request.status.to_string(),
        channel,
        approved_at: request.approved_at.map(format_instant).transpose()?,
        created_at: format_instant(request.created_at)?,
    })
}
