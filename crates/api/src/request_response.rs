// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Instants cross the API as RFC 3339 strings, calendar dates as
//! `YYYY-MM-DD`, and months as `YYYY-MM`.

// ============================================================================
// Users
// ============================================================================

/// API request to create the first `SUPER_ADMIN` on an empty directory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateFirstAdminRequest {
    /// The administrator's full name.
    pub full_name: String,
    /// The administrator's email.
    pub email: String,
}

/// API request to create a user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateUserRequest {
    /// The user's full name.
    pub full_name: String,
    /// The user's email.
    pub email: String,
    /// Role names such as `AGENT` or `TL`.
    pub roles: Vec<String>,
}

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    /// The user id.
    pub user_id: i64,
    /// The full name.
    pub full_name: String,
    /// The normalized email.
    pub email: String,
    /// Whether the user may act.
    pub active: bool,
    /// The user's role names.
    pub roles: Vec<String>,
}

/// A directory entry for pickers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserMiniInfo {
    /// The user id.
    pub user_id: i64,
    /// The full name.
    pub full_name: String,
}

/// API response for the mini directory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListUsersMiniResponse {
    /// Users on this page.
    pub items: Vec<UserMiniInfo>,
    /// Total number of users.
    pub total: u64,
}

// ============================================================================
// Schedules
// ============================================================================

/// API request to create a schedule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateScheduleRequest {
    /// The owner.
    pub user_id: i64,
    /// The start instant (RFC 3339).
    pub start_at: String,
    /// The end instant (RFC 3339).
    pub end_at: String,
    /// `VOICE` or `SOSMED`.
    pub channel: String,
    /// Optional shift label.
    pub shift_name: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
}

/// API request to change some fields of a schedule.
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateScheduleRequest {
    /// New owner.
    pub user_id: Option<i64>,
    /// New start instant (RFC 3339).
    pub start_at: Option<String>,
    /// New end instant (RFC 3339).
    pub end_at: Option<String>,
    /// New channel.
    pub channel: Option<String>,
    /// New shift label.
    pub shift_name: Option<String>,
    /// New notes.
    pub notes: Option<String>,
}

/// A schedule as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleInfo {
    /// The schedule id.
    pub schedule_id: i64,
    /// The owner.
    pub user_id: i64,
    /// The start instant (RFC 3339).
    pub start_at: String,
    /// The end instant (RFC 3339).
    pub end_at: String,
    /// The channel.
    pub channel: String,
    /// The shift label.
    pub shift_name: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// A schedule with its owner's display name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleWithOwnerInfo {
    /// The schedule.
    #[serde(flatten)]
    pub schedule: ScheduleInfo,
    /// The owner's display name.
    pub full_name: String,
}

/// API response for a monthly schedule listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MonthlySchedulesResponse {
    /// The month (`YYYY-MM`).
    pub month: String,
    /// Schedules intersecting the month, ordered by start.
    pub schedules: Vec<ScheduleInfo>,
}

/// API response for the monthly matrix view.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MonthlyMatrixResponse {
    /// The month (`YYYY-MM`).
    pub month: String,
    /// Every schedule intersecting the month with owner names.
    pub schedules: Vec<ScheduleWithOwnerInfo>,
}

/// API response listing a user's days off in a month.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OffDaysResponse {
    /// The user.
    pub user_id: i64,
    /// The month (`YYYY-MM`).
    pub month: String,
    /// Local dates (`YYYY-MM-DD`) with no schedule.
    pub off_days: Vec<String>,
}

/// API response for a schedule deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteScheduleResponse {
    /// The schedule id.
    pub schedule_id: i64,
    /// Whether a row was removed.
    pub deleted: bool,
}

// ============================================================================
// Swap requests
// ============================================================================

/// API request to open a swap request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProposeSwapRequest {
    /// Start of the shift to give away (RFC 3339).
    pub start_at: String,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
    /// Addressee for a direct request; absent for a broadcast.
    pub target_user_id: Option<i64>,
}

/// API request to accept a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AcceptSwapRequest {
    /// The counterparty's schedule offered in exchange.
    pub counterparty_schedule_id: i64,
}

/// A swap request as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SwapRequestInfo {
    /// The request id.
    pub swap_id: i64,
    /// Who opened the request.
    pub requester_id: i64,
    /// The requester's display name.
    pub requester_name: String,
    /// Who accepted, once approved.
    pub counterparty_id: Option<i64>,
    /// The counterparty's display name.
    pub counterparty_name: Option<String>,
    /// The addressee of a direct request.
    pub target_user_id: Option<i64>,
    /// `DIRECT` or `BROADCAST`.
    pub delivery_mode: String,
    /// Window start (RFC 3339).
    pub start_at: String,
    /// Window end (RFC 3339).
    pub end_at: String,
    /// Free-text reason.
    pub reason: String,
    /// `PENDING`, `APPROVED`, or `CANCELLED`.
    pub status: String,
    /// Channel of the requester's (else the counterparty's) shift at the window.
    pub channel: Option<String>,
    /// Approval instant (RFC 3339).
    pub approved_at: Option<String>,
    /// Creation instant (RFC 3339).
    pub created_at: String,
}

/// API response for a page of swap requests.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListSwapRequestsResponse {
    /// Requests on this page, newest first.
    pub items: Vec<SwapRequestInfo>,
    /// Total visible requests.
    pub total: u64,
    /// The clamped page number.
    pub page: i64,
    /// The clamped page size.
    pub size: i64,
}

// ============================================================================
// Holiday swaps
// ============================================================================

/// API request to open a holiday swap.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProposeHolidaySwapRequest {
    /// The colleague whose day off is requested.
    pub target_user_id: i64,
    /// The local off-date (`YYYY-MM-DD`).
    pub off_date: String,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

/// API request for backoffice approval of a holiday swap.
///
/// Either `start_at` (with optional `end_at`) or `start_time` must be
/// given. A missing end means an eight-hour shift.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApproveHolidaySwapRequest {
    /// Full-form start instant (RFC 3339).
    pub start_at: Option<String>,
    /// Full-form end instant (RFC 3339).
    pub end_at: Option<String>,
    /// Simple-form local start time on the off-date (`HH:mm`).
    pub start_time: Option<String>,
    /// Channel of the created shift.
    pub channel: String,
    /// Optional shift label.
    pub shift_name: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
}

/// A holiday swap as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HolidaySwapInfo {
    /// The request id.
    pub holiday_swap_id: i64,
    /// Who opened the request.
    pub requester_id: i64,
    /// The requester's display name.
    pub requester_name: String,
    /// Whose day off is taken.
    pub target_user_id: i64,
    /// The target's display name.
    pub target_name: String,
    /// The local off-date (`YYYY-MM-DD`).
    pub off_date: String,
    /// Free-text reason.
    pub reason: String,
    /// Current status.
    pub status: String,
    /// Approval instant (RFC 3339).
    pub approved_at: Option<String>,
    /// The schedule created on approval.
    pub created_schedule_id: Option<i64>,
    /// Creation instant (RFC 3339).
    pub created_at: String,
}

/// API response for a page of holiday swaps.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListHolidaySwapsResponse {
    /// Requests on this page, newest first.
    pub items: Vec<HolidaySwapInfo>,
    /// Total visible requests.
    pub total: u64,
    /// The clamped page number.
    pub page: i64,
    /// The clamped page size.
    pub size: i64,
}

// ============================================================================
// Notifications and leave
// ============================================================================

/// A notification as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationInfo {
    /// The notification id.
    pub notification_id: i64,
    /// Headline.
    pub title: String,
    /// Message text.
    pub body: String,
    /// `SWAP`, `HOLIDAY_SWAP`, or `LEAVE`.
    pub ref_type: String,
    /// The referenced record.
    pub ref_id: Option<i64>,
    /// Whether it has been read.
    pub is_read: bool,
    /// Creation instant (RFC 3339).
    pub created_at: String,
}

/// API response for the notification inbox.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListNotificationsResponse {
    /// Notifications, newest first.
    pub items: Vec<NotificationInfo>,
}

/// API request to clear a user's schedules for an approved leave.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClearDaysRequest {
    /// The user going on leave.
    pub user_id: i64,
    /// First local day (`YYYY-MM-DD`).
    pub first_day: String,
    /// Last local day, inclusive (`YYYY-MM-DD`).
    pub last_day: String,
}

/// API response for a leave-day clearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClearDaysResponse {
    /// The user.
    pub user_id: i64,
    /// Number of schedules removed.
    pub removed: u64,
}
