// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule administration and calendar views.

use std::collections::HashMap;

use shiftdesk_domain::{
    DomainError, Schedule, ScheduleDraft, TimeWindow, YearMonth, display_name, format_date,
    parse_timestamp,
};
use shiftdesk_persistence::SqlitePersistence;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::WorkflowSettings;
use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::directory::UserDirectory;
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    CreateScheduleRequest, DeleteScheduleResponse, MonthlyMatrixResponse,
    MonthlySchedulesResponse, OffDaysResponse, ScheduleInfo, ScheduleWithOwnerInfo,
    UpdateScheduleRequest,
};
use crate::views::schedule_info;

/// Creates a schedule for a user.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The authenticated actor
/// * `request` - The schedule fields
/// * `now` - The write timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not administer schedules
/// - The owner does not exist
/// - A timestamp does not parse, the range is inverted, or the channel is unknown
/// - The owner already has an overlapping schedule
pub fn create_schedule(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    request: &CreateScheduleRequest,
    now: OffsetDateTime,
) -> Result<ScheduleInfo, ApiError> {
    AuthorizationService::authorize_manage_schedules(actor, "create_schedule")?;
    persistence.require_user(request.user_id)?;

    let draft: ScheduleDraft = ScheduleDraft::new(
        request.user_id,
        parse_timestamp(&request.start_at).map_err(translate_domain_error)?,
        parse_timestamp(&request.end_at).map_err(translate_domain_error)?,
        &request.channel,
        request.shift_name.clone(),
        request.notes.clone(),
    )
    .map_err(translate_domain_error)?;

    let schedule: Schedule = persistence.create_schedule(&draft, now)?;
    schedule_info(&schedule)
}

/// Changes some fields of a schedule.
///
/// Absent fields keep their stored value. The load, the overlap check, and
/// the write share one transaction.
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not administer schedules
/// - The schedule or new owner does not exist
/// - The merged fields are invalid
/// - The owner would double-book
pub fn update_schedule(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    schedule_id: i64,
    request: &UpdateScheduleRequest,
    now: OffsetDateTime,
) -> Result<ScheduleInfo, ApiError> {
    AuthorizationService::authorize_manage_schedules(actor, "update_schedule")?;

    let updated: Schedule = persistence.transaction(|tx| -> Result<Schedule, ApiError> {
        let current: Schedule = tx.schedule(schedule_id)?;

        let user_id: i64 = request.user_id.unwrap_or(current.user_id);
        if user_id != current.user_id {
            tx.find_user(user_id)?.ok_or_else(|| {
                translate_domain_error(DomainError::UserNotFound(user_id))
            })?;
        }
        let start: OffsetDateTime = match &request.start_at {
            Some(value) => parse_timestamp(value).map_err(translate_domain_error)?,
            None => current.window.start(),
        };
        let end: OffsetDateTime = match &request.end_at {
            Some(value) => parse_timestamp(value).map_err(translate_domain_error)?,
            None => current.window.end(),
        };
        let channel: &str = request
            .channel
            .as_deref()
            .unwrap_or_else(|| current.channel.as_str());

        let draft: ScheduleDraft = ScheduleDraft::new(
            user_id,
            start,
            end,
            channel,
            request.shift_name.clone().or_else(|| current.shift_name.clone()),
            request.notes.clone().or_else(|| current.notes.clone()),
        )
        .map_err(translate_domain_error)?;

        Ok(tx.update_schedule(schedule_id, &draft, now)?)
    })?;

    schedule_info(&updated)
}

/// Deletes a schedule.
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not administer schedules
/// - The schedule does not exist
pub fn delete_schedule(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    schedule_id: i64,
) -> Result<DeleteScheduleResponse, ApiError> {
    AuthorizationService::authorize_manage_schedules(actor, "delete_schedule")?;

    if persistence.find_schedule(schedule_id)?.is_none() {
        return Err(translate_domain_error(DomainError::ScheduleNotFound(
            schedule_id,
        )));
    }
    let deleted: bool = persistence.delete_schedule(schedule_id)?;
    info!(schedule_id, deleted_by = actor.user_id(), "Schedule deletion requested");

    Ok(DeleteScheduleResponse {
        schedule_id,
        deleted,
    })
}

/// Lists schedules intersecting a calendar month.
///
/// With `user_id` the listing is restricted to that user. Without it,
/// backoffice actors see every schedule and agents see their own.
///
/// # Errors
///
/// Returns an error if:
/// - The month does not parse
/// - An agent asks for another user's schedules
pub fn monthly_schedules(
    persistence: &mut SqlitePersistence,
    settings: &WorkflowSettings,
    actor: &AuthenticatedActor,
    month: &str,
    user_id: Option<i64>,
) -> Result<MonthlySchedulesResponse, ApiError> {
    let month: YearMonth = YearMonth::parse(month).map_err(translate_domain_error)?;
    let owner: Option<i64> = match user_id {
        Some(id) => {
            AuthorizationService::authorize_view_schedules_of(actor, id)?;
            Some(id)
        }
        None if actor.is_backoffice() => None,
        None => Some(actor.user_id()),
    };

    let range: TimeWindow = settings
        .calendar
        .month_bounds(month)
        .map_err(translate_domain_error)?;
    let schedules: Vec<Schedule> = persistence.list_schedules(owner, &range)?;
    debug!(month = %month, owner = ?owner, count = schedules.len(), "Listed monthly schedules");

    Ok(MonthlySchedulesResponse {
        month: month.to_string(),
        schedules: schedules.iter().map(schedule_info).collect::<Result<_, _>>()?,
    })
}

/// Lists every schedule of a month with owner names.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not backoffice
/// - The month does not parse
pub fn monthly_matrix(
    persistence: &mut SqlitePersistence,
    settings: &WorkflowSettings,
    actor: &AuthenticatedActor,
    month: &str,
) -> Result<MonthlyMatrixResponse, ApiError> {
    AuthorizationService::authorize_backoffice(actor, "monthly_matrix")?;
    let month: YearMonth = YearMonth::parse(month).map_err(translate_domain_error)?;
    let range: TimeWindow = settings
        .calendar
        .month_bounds(month)
        .map_err(translate_domain_error)?;

    let schedules: Vec<Schedule> = persistence.list_schedules(None, &range)?;
    let mut owners: Vec<i64> = schedules.iter().map(|s| s.user_id).collect();
    owners.sort_unstable();
    owners.dedup();
    let names: HashMap<i64, String> = persistence.display_names(&owners)?;

    let mut rows: Vec<ScheduleWithOwnerInfo> = Vec::with_capacity(schedules.len());
    for schedule in &schedules {
        rows.push(ScheduleWithOwnerInfo {
            schedule: schedule_info(schedule)?,
            full_name: names
                .get(&schedule.user_id)
                .cloned()
                .unwrap_or_else(|| display_name(schedule.user_id, None)),
        });
    }

    Ok(MonthlyMatrixResponse {
        month: month.to_string(),
        schedules: rows,
    })
}

/// Lists the local dates of a month on which a user has no schedule.
///
/// A day counts as worked if any schedule intersects it, including a night
/// shift that started the previous evening.
///
/// # Errors
///
/// Returns an error if:
/// - The month does not parse
/// - An agent asks about another user
/// - The user does not exist
pub fn off_days(
    persistence: &mut SqlitePersistence,
    settings: &WorkflowSettings,
    actor: &AuthenticatedActor,
    user_id: i64,
    month: &str,
) -> Result<OffDaysResponse, ApiError> {
    let month: YearMonth = YearMonth::parse(month).map_err(translate_domain_error)?;
    AuthorizationService::authorize_view_schedules_of(actor, user_id)?;
    persistence.require_user(user_id)?;

    let range: TimeWindow = settings
        .calendar
        .month_bounds(month)
        .map_err(translate_domain_error)?;
    let schedules: Vec<Schedule> = persistence.list_schedules(Some(user_id), &range)?;

    let mut off: Vec<String> = Vec::new();
    for day in month.days().map_err(translate_domain_error)? {
        let bounds: TimeWindow = settings
            .calendar
            .day_bounds(day)
            .map_err(translate_domain_error)?;
        if !schedules.iter().any(|s| s.window.overlaps(&bounds)) {
            off.push(format_date(day));
        }
    }

    Ok(OffDaysResponse {
        user_id,
        month: month.to_string(),
        off_days: off,
    })
}
