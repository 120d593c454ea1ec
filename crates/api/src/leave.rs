// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule clearing for approved leave.

use shiftdesk_domain::{TimeWindow, parse_date};
use shiftdesk_persistence::SqlitePersistence;
use time::Date;
use tracing::info;

use crate::WorkflowSettings;
use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::directory::UserDirectory;
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{ClearDaysRequest, ClearDaysResponse};

/// Deletes every schedule of a user starting on any local day of an
/// inclusive range.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `settings` - Site calendar and policy
/// * `actor` - The schedule administrator recording the leave
/// * `request` - The user and day range
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not administer schedules
/// - The user does not exist
/// - A date does not parse or the range ends before it starts
pub fn clear_days(
    persistence: &mut SqlitePersistence,
    settings: &WorkflowSettings,
    actor: &AuthenticatedActor,
    request: &ClearDaysRequest,
) -> Result<ClearDaysResponse, ApiError> {
    AuthorizationService::authorize_manage_schedules(actor, "clear_days")?;
    persistence.require_user(request.user_id)?;

    let first_day: Date = parse_date(&request.first_day).map_err(translate_domain_error)?;
    let last_day: Date = parse_date(&request.last_day).map_err(translate_domain_error)?;
    if last_day < first_day {
        return Err(ApiError::InvalidInput {
            field: "last_day".to_string(),
            message: format!("{} is before {}", request.last_day, request.first_day),
        });
    }

    let first: TimeWindow = settings
        .calendar
        .day_bounds(first_day)
        .map_err(translate_domain_error)?;
    let last: TimeWindow = settings
        .calendar
        .day_bounds(last_day)
        .map_err(translate_domain_error)?;
    let range: TimeWindow =
        TimeWindow::new(first.start(), last.end()).map_err(translate_domain_error)?;

    let removed: usize = persistence.clear_schedules_starting_within(request.user_id, &range)?;
    info!(
        user_id = request.user_id,
        first_day = %request.first_day,
        last_day = %request.last_day,
        removed,
        cleared_by = actor.user_id(),
        "Cleared schedules for leave"
    );

    Ok(ClearDaysResponse {
        user_id: request.user_id,
        removed: u64::try_from(removed).unwrap_or(u64::MAX),
    })
}
