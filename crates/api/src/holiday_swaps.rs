// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Holiday swap workflow.
//!
//! A holiday swap lets an agent take a colleague's day off: the target
//! consents, backoffice approves with concrete shift details, and the
//! target gets a new schedule on the off-date while the requester's
//! schedules that day are removed.

use std::collections::HashMap;

use shiftdesk::{
    Announcement, HolidaySwapCommand, HolidaySwapProposal, HolidaySwapTransition, apply_holiday_swap,
    propose_holiday_swap,
};
use shiftdesk_domain::{
    DomainError, HolidaySwap, Schedule, ScheduleDraft, TimeWindow, display_name, format_date,
    parse_clock_time, parse_date, parse_timestamp,
};
use shiftdesk_persistence::{PageRequest, SqlitePersistence};
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::WorkflowSettings;
use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::directory::UserDirectory;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::notify::{Outcome, Parties, announce};
use crate::request_response::{
    ApproveHolidaySwapRequest, HolidaySwapInfo, ListHolidaySwapsResponse,
    ProposeHolidaySwapRequest,
};
use crate::views::{format_instant, to_count};

/// Largest page of holiday swaps.
pub const MAX_HOLIDAY_SWAP_PAGE_SIZE: i64 = 500;

/// Opens a holiday swap for the acting user.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `settings` - Site calendar and policy
/// * `actor` - The requester
/// * `request` - Target, off-date, and reason
/// * `now` - The creation timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The off-date does not parse
/// - The target is the requester or does not exist
/// - The target works on the off-date
pub fn propose(
    persistence: &mut SqlitePersistence,
    settings: &WorkflowSettings,
    actor: &AuthenticatedActor,
    request: &ProposeHolidaySwapRequest,
    now: OffsetDateTime,
) -> Result<Outcome<HolidaySwapInfo>, ApiError> {
    let off_date: Date = parse_date(&request.off_date).map_err(translate_domain_error)?;
    let transition: HolidaySwapTransition = propose_holiday_swap(
        HolidaySwapProposal {
            requester_id: actor.user_id(),
            target_user_id: request.target_user_id,
            off_date,
            reason: request.reason.clone(),
        },
        now,
    )
    .map_err(translate_core_error)?;
    let target_user_id: i64 = transition.request.target_user_id;
    persistence.require_user(target_user_id)?;

    let day: TimeWindow = settings
        .calendar
        .day_bounds(off_date)
        .map_err(translate_domain_error)?;
    let draft: &HolidaySwap = &transition.request;
    let stored: HolidaySwap = persistence.transaction(|tx| -> Result<HolidaySwap, ApiError> {
        if tx.exists_overlap(target_user_id, &day, None)? {
            return Err(translate_domain_error(DomainError::TargetNotOff {
                user_id: target_user_id,
                off_date,
            }));
        }
        Ok(tx.insert_holiday_swap(draft)?)
    })?;

    let holiday_swap_id: i64 = stored.holiday_swap_id.unwrap_or_default();
    info!(
        holiday_swap_id,
        requester_id = stored.requester_id,
        target_user_id,
        off_date = %format_date(off_date),
        "Opened holiday swap"
    );

    let names: HashMap<i64, String> =
        persistence.display_names(&[stored.requester_id, target_user_id])?;
    let body: String = format!(
        "{} asked to take {}'s day off on {}",
        name_of(&names, stored.requester_id),
        name_of(&names, target_user_id),
        format_date(off_date),
    );
    finish(persistence, transition.announcement, stored, &body, now)
}

/// The target consents to a holiday swap.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not exist
/// - The actor is not the target
/// - The request is not `PENDING_TARGET`
pub fn accept(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    holiday_swap_id: i64,
    now: OffsetDateTime,
) -> Result<Outcome<HolidaySwapInfo>, ApiError> {
    let caller_id: i64 = actor.user_id();
    let transition: HolidaySwapTransition = transition_and_save(
        persistence,
        holiday_swap_id,
        HolidaySwapCommand::TargetAccept { caller_id },
    )?;
    info!(holiday_swap_id, caller_id, "Holiday swap accepted by target");

    let body: String = format!(
        "Holiday swap #{holiday_swap_id} for {} was accepted and awaits backoffice approval",
        format_date(transition.request.off_date),
    );
    finish(
        persistence,
        transition.announcement,
        transition.request,
        &body,
        now,
    )
}

/// The target declines a holiday swap.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not exist
/// - The actor is not the target
/// - The request is not `PENDING_TARGET`
pub fn reject(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    holiday_swap_id: i64,
    now: OffsetDateTime,
) -> Result<Outcome<HolidaySwapInfo>, ApiError> {
    let caller_id: i64 = actor.user_id();
    let transition: HolidaySwapTransition = transition_and_save(
        persistence,
        holiday_swap_id,
        HolidaySwapCommand::TargetReject { caller_id },
    )?;
    info!(holiday_swap_id, caller_id, "Holiday swap rejected by target");

    let body: String = format!(
        "Holiday swap #{holiday_swap_id} for {} was rejected",
        format_date(transition.request.off_date),
    );
    finish(
        persistence,
        transition.announcement,
        transition.request,
        &body,
        now,
    )
}

/// The requester withdraws a holiday swap.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not exist
/// - The actor is not the requester
/// - The request is already settled
pub fn cancel(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    holiday_swap_id: i64,
    now: OffsetDateTime,
) -> Result<Outcome<HolidaySwapInfo>, ApiError> {
    let caller_id: i64 = actor.user_id();
    let transition: HolidaySwapTransition = transition_and_save(
        persistence,
        holiday_swap_id,
        HolidaySwapCommand::Cancel { caller_id },
    )?;
    info!(holiday_swap_id, caller_id, "Holiday swap cancelled");

    let body: String = format!(
        "Holiday swap #{holiday_swap_id} for {} was cancelled",
        format_date(transition.request.off_date),
    );
    finish(
        persistence,
        transition.announcement,
        transition.request,
        &body,
        now,
    )
}

/// Backoffice approves a holiday swap and moves the shift.
///
/// The target's new schedule, the removal of the requester's schedules on
/// the off-date, and the status write share one transaction.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `settings` - Site calendar and policy
/// * `actor` - The approving backoffice user
/// * `holiday_swap_id` - The request to approve
/// * `request` - Shift details in full or simple form
/// * `now` - The approval timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not backoffice
/// - The request does not exist or is not `PENDING_BO`
/// - Neither a start instant nor a start time is given, or one does not parse
/// - The start falls outside the off-date
/// - The channel is unknown or the range is inverted
/// - The target already works during the new shift
pub fn approve(
    persistence: &mut SqlitePersistence,
    settings: &WorkflowSettings,
    actor: &AuthenticatedActor,
    holiday_swap_id: i64,
    request: &ApproveHolidaySwapRequest,
    now: OffsetDateTime,
) -> Result<Outcome<HolidaySwapInfo>, ApiError> {
    AuthorizationService::authorize_backoffice(actor, "approve_holiday_swap")?;

    let (transition, removed): (HolidaySwapTransition, usize) = persistence.transaction(
        |tx| -> Result<(HolidaySwapTransition, usize), ApiError> {
            let current: HolidaySwap = tx.holiday_swap(holiday_swap_id)?;
            let transition: HolidaySwapTransition = apply_holiday_swap(
                &current,
                HolidaySwapCommand::Approve { approved_at: now },
            )
            .map_err(translate_core_error)?;

            let day: TimeWindow = settings
                .calendar
                .day_bounds(current.off_date)
                .map_err(translate_domain_error)?;
            let start: OffsetDateTime = resolve_start(settings, current.off_date, request)?;
            if !day.contains(start) {
                return Err(translate_domain_error(DomainError::StartOutsideOffDate {
                    start,
                    off_date: current.off_date,
                }));
            }
            let end: OffsetDateTime = match &request.end_at {
                Some(value) => parse_timestamp(value).map_err(translate_domain_error)?,
                None => TimeWindow::shift_from(start)
                    .map_err(translate_domain_error)?
                    .end(),
            };

            let draft: ScheduleDraft = ScheduleDraft::new(
                current.target_user_id,
                start,
                end,
                &request.channel,
                request.shift_name.clone(),
                request.notes.clone(),
            )
            .map_err(translate_domain_error)?;
            let created: Schedule = tx.create_schedule(&draft, now)?;
            let removed: usize = tx.delete_schedules_intersecting(current.requester_id, &day)?;

            let transition: HolidaySwapTransition =
                transition.with_created_schedule(created.schedule_id);
            tx.save_holiday_swap(&transition.request)?;
            Ok((transition, removed))
        },
    )?;

    let approved: HolidaySwap = transition.request;
    info!(
        holiday_swap_id,
        approved_by = actor.user_id(),
        created_schedule_id = ?approved.created_schedule_id,
        removed,
        "Holiday swap approved"
    );

    let names: HashMap<i64, String> =
        persistence.display_names(&[approved.requester_id, approved.target_user_id])?;
    let body: String = format!(
        "Holiday swap #{holiday_swap_id} approved: {} works on {} and {} takes the day off",
        name_of(&names, approved.target_user_id),
        format_date(approved.off_date),
        name_of(&names, approved.requester_id),
    );
    finish(persistence, transition.announcement, approved, &body, now)
}

/// Lists holiday swaps visible to the actor, newest first.
///
/// Backoffice actors see every request; others see requests they opened
/// or are targeted by.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    page: i64,
    size: i64,
) -> Result<ListHolidaySwapsResponse, ApiError> {
    let page: PageRequest = PageRequest::new(page, size, MAX_HOLIDAY_SWAP_PAGE_SIZE);
    let viewer: Option<i64> = if actor.is_backoffice() {
        None
    } else {
        Some(actor.user_id())
    };
    let (requests, total) = persistence.list_holiday_swaps(page, viewer)?;

    let mut ids: Vec<i64> = requests
        .iter()
        .flat_map(|r| [r.requester_id, r.target_user_id])
        .collect();
    ids.sort_unstable();
    ids.dedup();
    let names: HashMap<i64, String> = persistence.display_names(&ids)?;

    Ok(ListHolidaySwapsResponse {
        items: requests
            .iter()
            .map(|r| describe(r, &names))
            .collect::<Result<_, _>>()?,
        total: to_count(total)?,
        page: page.page(),
        size: page.size(),
    })
}

/// Resolves the approved shift start from either request form.
fn resolve_start(
    settings: &WorkflowSettings,
    off_date: Date,
    request: &ApproveHolidaySwapRequest,
) -> Result<OffsetDateTime, ApiError> {
    if let Some(start_at) = &request.start_at {
        return parse_timestamp(start_at).map_err(translate_domain_error);
    }
    if let Some(start_time) = &request.start_time {
        let clock = parse_clock_time(start_time).map_err(translate_domain_error)?;
        return settings
            .calendar
            .at_clock_time(off_date, clock)
            .map_err(translate_domain_error);
    }
    Err(ApiError::InvalidInput {
        field: "start_at".to_string(),
        message: "Either start_at or start_time is required".to_string(),
    })
}

fn transition_and_save(
    persistence: &mut SqlitePersistence,
    holiday_swap_id: i64,
    command: HolidaySwapCommand,
) -> Result<HolidaySwapTransition, ApiError> {
    persistence.transaction(|tx| -> Result<HolidaySwapTransition, ApiError> {
        let current: HolidaySwap = tx.holiday_swap(holiday_swap_id)?;
        let transition: HolidaySwapTransition =
            apply_holiday_swap(&current, command).map_err(translate_core_error)?;
        tx.save_holiday_swap(&transition.request)?;
        Ok(transition)
    })
}

/// Renders notices for a committed transition and builds the response.
fn finish(
    persistence: &mut SqlitePersistence,
    announcement: Announcement,
    request: HolidaySwap,
    body: &str,
    now: OffsetDateTime,
) -> Result<Outcome<HolidaySwapInfo>, ApiError> {
    let parties: Parties = Parties {
        requester_id: request.requester_id,
        target_user_id: Some(request.target_user_id),
        counterparty_id: None,
        window: None,
    };
    let notices = announce(
        persistence,
        announcement,
        &parties,
        body,
        request.holiday_swap_id,
        now,
    );
    let names: HashMap<i64, String> =
        persistence.display_names(&[request.requester_id, request.target_user_id])?;

    Ok(Outcome {
        response: describe(&request, &names)?,
        notices,
    })
}

fn name_of(names: &HashMap<i64, String>, user_id: i64) -> String {
    names
        .get(&user_id)
        .cloned()
        .unwrap_or_else(|| display_name(user_id, None))
}

fn describe(
    request: &HolidaySwap,
    names: &HashMap<i64, String>,
) -> Result<HolidaySwapInfo, ApiError> {
    Ok(HolidaySwapInfo {
        holiday_swap_id: request.holiday_swap_id.unwrap_or_default(),
        requester_id: request.requester_id,
        requester_name: name_of(names, request.requester_id),
        target_user_id: request.target_user_id,
        target_name: name_of(names, request.target_user_id),
        off_date: format_date(request.off_date),
        reason: request.reason.clone(),
        status: request.status.to_string(),
        approved_at: request.approved_at.map(format_instant).transpose()?,
        created_schedule_id: request.created_schedule_id,
        created_at: format_instant(request.created_at)?,
    })
}
