// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Shiftdesk backoffice.
//!
//! Every workflow takes the persistence layer, the authenticated actor,
//! and a request DTO, and returns a response DTO or an [`ApiError`].
//! Workflows that notify users return an [`Outcome`] whose notices the
//! caller delivers after the transaction has committed.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

mod auth;
mod directory;
mod error;
pub mod holiday_swaps;
pub mod leave;
pub mod notifications;
mod notify;
mod request_response;
pub mod schedules;
pub mod swaps;
pub mod users;
mod views;

#[cfg(test)]
mod tests;

use shiftdesk_domain::SiteCalendar;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use directory::UserDirectory;
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use notify::{Notice, NotificationSink, Outcome, dispatch_notices};
pub use request_response::{
    AcceptSwapRequest, ApproveHolidaySwapRequest, ClearDaysRequest, ClearDaysResponse,
    CreateFirstAdminRequest, CreateScheduleRequest, CreateUserRequest, DeleteScheduleResponse,
    HolidaySwapInfo, ListHolidaySwapsResponse, ListNotificationsResponse, ListSwapRequestsResponse,
    ListUsersMiniResponse, MonthlyMatrixResponse, MonthlySchedulesResponse, NotificationInfo,
    OffDaysResponse, ProposeHolidaySwapRequest, ProposeSwapRequest, ScheduleInfo,
    ScheduleWithOwnerInfo, SwapRequestInfo, UpdateScheduleRequest, UserInfo, UserMiniInfo,
};

/// Site-wide settings every calendar-aware workflow reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// The site calendar used for local days and months.
    pub calendar: SiteCalendar,
    /// Whether a swap request needs a requester schedule at its window.
    ///
    /// When off, such requests are opened with a warning.
    pub require_requester_schedule: bool,
}

impl WorkflowSettings {
    /// Creates settings for a site.
    #[must_use]
    pub const fn new(calendar: SiteCalendar, require_requester_schedule: bool) -> Self {
        Self {
            calendar,
            require_requester_schedule,
        }
    }
}
