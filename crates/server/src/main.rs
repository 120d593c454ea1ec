// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono_tz::Tz;
use clap::Parser;
use serde::{Deserialize, Serialize};
use shiftdesk_api::{
    AcceptSwapRequest, ApiError, ApproveHolidaySwapRequest, ClearDaysRequest, ClearDaysResponse,
    CreateFirstAdminRequest, CreateScheduleRequest, CreateUserRequest, DeleteScheduleResponse,
    HolidaySwapInfo, ListHolidaySwapsResponse, ListNotificationsResponse,
    ListSwapRequestsResponse, ListUsersMiniResponse, MonthlyMatrixResponse,
    MonthlySchedulesResponse, OffDaysResponse, ProposeHolidaySwapRequest, ProposeSwapRequest,
    ScheduleInfo, SwapRequestInfo, UpdateScheduleRequest, UserInfo, WorkflowSettings,
    holiday_swaps, leave, notifications, schedules, swaps, users,
};
use shiftdesk_domain::{DEFAULT_SITE_TIMEZONE, SiteCalendar};
use shiftdesk_persistence::{DEFAULT_PAGE_SIZE, SqlitePersistence};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::session::ActingUser;

/// Shiftdesk Server - HTTP server for the contact-center scheduling backoffice
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// IANA time zone of the site calendar
    #[arg(long, default_value = DEFAULT_SITE_TIMEZONE, value_parser = parse_timezone)]
    timezone: Tz,

    /// Refuse swap requests from users with no schedule at the requested window
    #[arg(long)]
    require_requester_schedule: bool,
}

fn parse_timezone(value: &str) -> Result<Tz, String> {
    value
        .parse::<Tz>()
        .map_err(|e| format!("Unknown time zone '{value}': {e}"))
}

/// Application state shared across handlers.
///
/// The single connection is serialized behind a `Mutex`; every workflow
/// holds the lock for its whole transaction.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Site calendar and swap policy.
    settings: WorkflowSettings,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// API response for write operations with nothing else to report.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Query parameters for paged listings.
#[derive(Debug, Deserialize)]
struct PageQuery {
    /// 1-based page number.
    page: Option<i64>,
    /// Page size.
    size: Option<i64>,
}

impl PageQuery {
    fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    fn size(&self) -> i64 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// Query parameters for monthly schedule listings.
#[derive(Debug, Deserialize)]
struct MonthlyQuery {
    /// The month (`YYYY-MM`).
    month: String,
    /// Restrict the listing to one user.
    user_id: Option<i64>,
}

/// Query parameters for the month-only views.
#[derive(Debug, Deserialize)]
struct MonthQuery {
    /// The month (`YYYY-MM`).
    month: String,
}

/// Query parameters for the notification inbox.
#[derive(Debug, Deserialize)]
struct NotificationsQuery {
    /// Only return unread notifications.
    #[serde(default)]
    unread: bool,
    /// Maximum number of notifications.
    limit: Option<i64>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidState { .. }
            | ApiError::ScheduleConflict { .. }
            | ApiError::OwnershipMismatch { .. } => StatusCode::CONFLICT,
            ApiError::PreconditionFailed { .. } => StatusCode::PRECONDITION_FAILED,
            ApiError::InvalidSwap { .. } | ApiError::DomainRuleViolation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// Handler for POST `/bootstrap/first_admin` endpoint.
///
/// Creates the first `SUPER_ADMIN` while the directory is empty.
async fn handle_create_first_admin(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateFirstAdminRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(email = %req.email, "Handling create_first_admin request");

    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo =
        users::create_first_admin(&mut persistence, &req, OffsetDateTime::now_utc())?;
    Ok(Json(user))
}

/// Handler for POST `/users` endpoint.
async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(
        actor_id = actor.user_id(),
        email = %req.email,
        "Handling create_user request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo =
        users::create_user(&mut persistence, &actor, &req, OffsetDateTime::now_utc())?;
    Ok(Json(user))
}

/// Handler for GET `/users/mini` endpoint.
async fn handle_list_users_mini(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListUsersMiniResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListUsersMiniResponse =
        users::list_users_mini(&mut persistence, &actor, query.page(), query.size())?;
    Ok(Json(response))
}

// ============================================================================
// Schedules
// ============================================================================

/// Handler for POST `/schedules` endpoint.
async fn handle_create_schedule(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<Json<ScheduleInfo>, HttpError> {
    info!(
        actor_id = actor.user_id(),
        user_id = req.user_id,
        start_at = %req.start_at,
        "Handling create_schedule request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let schedule: ScheduleInfo =
        schedules::create_schedule(&mut persistence, &actor, &req, OffsetDateTime::now_utc())?;
    Ok(Json(schedule))
}

/// Handler for PUT `/schedules/{id}` endpoint.
async fn handle_update_schedule(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(schedule_id): Path<i64>,
    Json(req): Json<UpdateScheduleRequest>,
) -> Result<Json<ScheduleInfo>, HttpError> {
    info!(
        actor_id = actor.user_id(),
        schedule_id, "Handling update_schedule request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let schedule: ScheduleInfo = schedules::update_schedule(
        &mut persistence,
        &actor,
        schedule_id,
        &req,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(schedule))
}

/// Handler for DELETE `/schedules/{id}` endpoint.
async fn handle_delete_schedule(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(schedule_id): Path<i64>,
) -> Result<Json<DeleteScheduleResponse>, HttpError> {
    info!(
        actor_id = actor.user_id(),
        schedule_id, "Handling delete_schedule request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteScheduleResponse =
        schedules::delete_schedule(&mut persistence, &actor, schedule_id)?;
    Ok(Json(response))
}

/// Handler for GET `/schedules/monthly` endpoint.
async fn handle_monthly_schedules(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Query(query): Query<MonthlyQuery>,
) -> Result<Json<MonthlySchedulesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MonthlySchedulesResponse = schedules::monthly_schedules(
        &mut persistence,
        &app_state.settings,
        &actor,
        &query.month,
        query.user_id,
    )?;
    Ok(Json(response))
}

/// Handler for GET `/schedules/monthly_all` endpoint.
async fn handle_monthly_matrix(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthlyMatrixResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MonthlyMatrixResponse =
        schedules::monthly_matrix(&mut persistence, &app_state.settings, &actor, &query.month)?;
    Ok(Json(response))
}

/// Handler for GET `/users/{id}/off_days` endpoint.
async fn handle_off_days(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(user_id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<OffDaysResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: OffDaysResponse = schedules::off_days(
        &mut persistence,
        &app_state.settings,
        &actor,
        user_id,
        &query.month,
    )?;
    Ok(Json(response))
}

// ============================================================================
// Swap requests
// ============================================================================

/// Handler for POST `/swaps` endpoint.
async fn handle_propose_swap(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Json(req): Json<ProposeSwapRequest>,
) -> Result<Json<SwapRequestInfo>, HttpError> {
    info!(
        actor_id = actor.user_id(),
        start_at = %req.start_at,
        target_user_id = ?req.target_user_id,
        "Handling propose_swap request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let info: SwapRequestInfo = swaps::propose(
        &mut persistence,
        &app_state.settings,
        &actor,
        &req,
        OffsetDateTime::now_utc(),
    )?
    .deliver(&mut *persistence);
    Ok(Json(info))
}

/// Handler for GET `/swaps` endpoint.
async fn handle_list_swaps(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListSwapRequestsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListSwapRequestsResponse =
        swaps::list(&mut persistence, &actor, query.page(), query.size())?;
    Ok(Json(response))
}

/// Handler for POST `/swaps/{id}/accept` endpoint.
async fn handle_accept_swap(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(swap_id): Path<i64>,
    Json(req): Json<AcceptSwapRequest>,
) -> Result<Json<SwapRequestInfo>, HttpError> {
    info!(
        actor_id = actor.user_id(),
        swap_id,
        counterparty_schedule_id = req.counterparty_schedule_id,
        "Handling accept_swap request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let info: SwapRequestInfo = swaps::accept(
        &mut persistence,
        &app_state.settings,
        &actor,
        swap_id,
        req,
        OffsetDateTime::now_utc(),
    )?
    .deliver(&mut *persistence);
    Ok(Json(info))
}

/// Handler for POST `/swaps/{id}/cancel` endpoint.
async fn handle_cancel_swap(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(swap_id): Path<i64>,
) -> Result<Json<SwapRequestInfo>, HttpError> {
    info!(
        actor_id = actor.user_id(),
        swap_id, "Handling cancel_swap request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let info: SwapRequestInfo = swaps::cancel(
        &mut persistence,
        &app_state.settings,
        &actor,
        swap_id,
        OffsetDateTime::now_utc(),
    )?
    .deliver(&mut *persistence);
    Ok(Json(info))
}

// ============================================================================
// Holiday swaps
// ============================================================================

/// Handler for POST `/holiday_swaps` endpoint.
async fn handle_propose_holiday_swap(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Json(req): Json<ProposeHolidaySwapRequest>,
) -> Result<Json<HolidaySwapInfo>, HttpError> {
    info!(
        actor_id = actor.user_id(),
        target_user_id = req.target_user_id,
        off_date = %req.off_date,
        "Handling propose_holiday_swap request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let info: HolidaySwapInfo = holiday_swaps::propose(
        &mut persistence,
        &app_state.settings,
        &actor,
        &req,
        OffsetDateTime::now_utc(),
    )?
    .deliver(&mut *persistence);
    Ok(Json(info))
}

/// Handler for GET `/holiday_swaps` endpoint.
async fn handle_list_holiday_swaps(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListHolidaySwapsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListHolidaySwapsResponse =
        holiday_swaps::list(&mut persistence, &actor, query.page(), query.size())?;
    Ok(Json(response))
}

/// Handler for POST `/holiday_swaps/{id}/accept` endpoint.
async fn handle_accept_holiday_swap(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(holiday_swap_id): Path<i64>,
) -> Result<Json<HolidaySwapInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let info: HolidaySwapInfo = holiday_swaps::accept(
        &mut persistence,
        &actor,
        holiday_swap_id,
        OffsetDateTime::now_utc(),
    )?
    .deliver(&mut *persistence);
    Ok(Json(info))
}

/// Handler for POST `/holiday_swaps/{id}/reject` endpoint.
async fn handle_reject_holiday_swap(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(holiday_swap_id): Path<i64>,
) -> Result<Json<HolidaySwapInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let info: HolidaySwapInfo = holiday_swaps::reject(
        &mut persistence,
        &actor,
        holiday_swap_id,
        OffsetDateTime::now_utc(),
    )?
    .deliver(&mut *persistence);
    Ok(Json(info))
}

/// Handler for POST `/holiday_swaps/{id}/bo_approve` endpoint.
async fn handle_approve_holiday_swap(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(holiday_swap_id): Path<i64>,
    Json(req): Json<ApproveHolidaySwapRequest>,
) -> Result<Json<HolidaySwapInfo>, HttpError> {
    info!(
        actor_id = actor.user_id(),
        holiday_swap_id, "Handling approve_holiday_swap request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let info: HolidaySwapInfo = holiday_swaps::approve(
        &mut persistence,
        &app_state.settings,
        &actor,
        holiday_swap_id,
        &req,
        OffsetDateTime::now_utc(),
    )?
    .deliver(&mut *persistence);
    Ok(Json(info))
}

/// Handler for POST `/holiday_swaps/{id}/cancel` endpoint.
async fn handle_cancel_holiday_swap(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(holiday_swap_id): Path<i64>,
) -> Result<Json<HolidaySwapInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let info: HolidaySwapInfo = holiday_swaps::cancel(
        &mut persistence,
        &actor,
        holiday_swap_id,
        OffsetDateTime::now_utc(),
    )?
    .deliver(&mut *persistence);
    Ok(Json(info))
}

// ============================================================================
// Notifications and leave
// ============================================================================

/// Handler for GET `/notifications` endpoint.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Query(query): Query<NotificationsQuery>,
) -> Result<Json<ListNotificationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListNotificationsResponse =
        notifications::list_notifications(&mut persistence, &actor, query.unread, query.limit)?;
    Ok(Json(response))
}

/// Handler for POST `/notifications/{id}/read` endpoint.
async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Path(notification_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    notifications::mark_read(&mut persistence, &actor, notification_id)?;
    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Notification {notification_id} marked as read")),
    }))
}

/// Handler for POST `/leave/clear_days` endpoint.
///
/// Called when a leave request is approved.
async fn handle_clear_days(
    AxumState(app_state): AxumState<AppState>,
    ActingUser(actor): ActingUser,
    Json(req): Json<ClearDaysRequest>,
) -> Result<Json<ClearDaysResponse>, HttpError> {
    info!(
        actor_id = actor.user_id(),
        user_id = req.user_id,
        first_day = %req.first_day,
        last_day = %req.last_day,
        "Handling clear_days request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ClearDaysResponse =
        leave::clear_days(&mut persistence, &app_state.settings, &actor, &req)?;
    Ok(Json(response))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/bootstrap/first_admin", post(handle_create_first_admin))
        .route("/users", post(handle_create_user))
        .route("/users/mini", get(handle_list_users_mini))
        .route("/users/{id}/off_days", get(handle_off_days))
        .route("/schedules", post(handle_create_schedule))
        .route(
            "/schedules/{id}",
            put(handle_update_schedule).delete(handle_delete_schedule),
        )
        .route("/schedules/monthly", get(handle_monthly_schedules))
        .route("/schedules/monthly_all", get(handle_monthly_matrix))
        .route("/swaps", post(handle_propose_swap).get(handle_list_swaps))
        .route("/swaps/{id}/accept", post(handle_accept_swap))
        .route("/swaps/{id}/cancel", post(handle_cancel_swap))
        .route(
            "/holiday_swaps",
            post(handle_propose_holiday_swap).get(handle_list_holiday_swaps),
        )
        .route(
            "/holiday_swaps/{id}/accept",
            post(handle_accept_holiday_swap),
        )
        .route(
            "/holiday_swaps/{id}/reject",
            post(handle_reject_holiday_swap),
        )
        .route(
            "/holiday_swaps/{id}/bo_approve",
            post(handle_approve_holiday_swap),
        )
        .route(
            "/holiday_swaps/{id}/cancel",
            post(handle_cancel_holiday_swap),
        )
        .route("/notifications", get(handle_list_notifications))
        .route(
            "/notifications/{id}/read",
            post(handle_mark_notification_read),
        )
        .route("/leave/clear_days", post(handle_clear_days))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Shiftdesk Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let settings: WorkflowSettings = WorkflowSettings::new(
        SiteCalendar::from_tz(args.timezone),
        args.require_requester_schedule,
    );
    info!(
        timezone = %args.timezone.name(),
        require_requester_schedule = settings.require_requester_schedule,
        "Site settings loaded"
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        settings,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: SqlitePersistence =
            SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            settings: WorkflowSettings::new(
                SiteCalendar::new(DEFAULT_SITE_TIMEZONE).expect("Valid default zone"),
                false,
            ),
        }
    }

    /// Sends one request and decodes the JSON body.
    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        user_id: Option<i64>,
        body: Option<Value>,
    ) -> (HttpStatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = user_id {
            builder = builder.header(session::USER_ID_HEADER, id.to_string());
        }
        let request = match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };
        (status, value)
    }

    /// Bootstraps an admin and returns its id.
    async fn bootstrap_admin(app: &Router) -> i64 {
        let (status, body) = send(
            app,
            "POST",
            "/bootstrap/first_admin",
            None,
            Some(json!({ "full_name": "Root Admin", "email": "root@example.com" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        body["user_id"].as_i64().unwrap()
    }

    async fn create_user(app: &Router, admin_id: i64, name: &str, role: &str) -> i64 {
        let email: String = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        let (status, body) = send(
            app,
            "POST",
            "/users",
            Some(admin_id),
            Some(json!({ "full_name": name, "email": email, "roles": [role] })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        body["user_id"].as_i64().unwrap()
    }

    async fn create_schedule(
        app: &Router,
        admin_id: i64,
        user_id: i64,
        start_at: &str,
        end_at: &str,
    ) -> i64 {
        let (status, body) = send(
            app,
            "POST",
            "/schedules",
            Some(admin_id),
            Some(json!({
                "user_id": user_id,
                "start_at": start_at,
                "end_at": end_at,
                "channel": "VOICE",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK, "{body}");
        body["schedule_id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_bootstrap_only_once() {
        let app: Router = build_router(create_test_app_state());
        bootstrap_admin(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/bootstrap/first_admin",
            None,
            Some(json!({ "full_name": "Second", "email": "second@example.com" })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::FORBIDDEN);
        assert_eq!(body["error"], json!(true));
    }

    #[tokio::test]
    async fn test_acting_user_is_required() {
        let app: Router = build_router(create_test_app_state());
        bootstrap_admin(&app).await;

        let (missing, _) = send(&app, "GET", "/swaps", None, None).await;
        assert_eq!(missing, HttpStatusCode::UNAUTHORIZED);

        let (unknown, body) = send(&app, "GET", "/swaps", Some(999), None).await;
        assert_eq!(unknown, HttpStatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], json!(true));
    }

    #[tokio::test]
    async fn test_swap_round_trip_over_http() {
        let app: Router = build_router(create_test_app_state());
        let admin = bootstrap_admin(&app).await;
        let budi = create_user(&app, admin, "Budi Santoso", "AGENT").await;
        let sari = create_user(&app, admin, "Sari Dewi", "AGENT").await;
        let own = create_schedule(
            &app,
            admin,
            budi,
            "2025-10-07T19:00:00Z",
            "2025-10-08T03:00:00Z",
        )
        .await;
        let offered = create_schedule(
            &app,
            admin,
            sari,
            "2025-10-08T02:00:00Z",
            "2025-10-08T10:00:00Z",
        )
        .await;

        let (status, proposed) = send(
            &app,
            "POST",
            "/swaps",
            Some(budi),
            Some(json!({ "start_at": "2025-10-07T19:00:00+07:00", "reason": "family" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(proposed["status"], json!("PENDING"));
        assert_eq!(proposed["end_at"], json!("2025-10-07T20:00:00Z"));
        let swap_id = proposed["swap_id"].as_i64().unwrap();

        let accept_uri = format!("/swaps/{swap_id}/accept");
        let (status, accepted) = send(
            &app,
            "POST",
            &accept_uri,
            Some(sari),
            Some(json!({ "counterparty_schedule_id": offered })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK, "{accepted}");
        assert_eq!(accepted["status"], json!("APPROVED"));

        let (status, _) = send(
            &app,
            "POST",
            &accept_uri,
            Some(sari),
            Some(json!({ "counterparty_schedule_id": offered })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CONFLICT);

        let (_, budi_month) = send(
            &app,
            "GET",
            "/schedules/monthly?month=2025-10",
            Some(budi),
            None,
        )
        .await;
        let ids: Vec<i64> = budi_month["schedules"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["schedule_id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![offered]);
        assert_ne!(ids, vec![own]);

        let (status, inbox) = send(
            &app,
            "GET",
            "/notifications?unread=true",
            Some(budi),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let titles: Vec<&str> = inbox["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Shift Swap Approved", "Shift Swap Requested"]);
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let app: Router = build_router(create_test_app_state());
        let admin = bootstrap_admin(&app).await;
        let budi = create_user(&app, admin, "Budi Santoso", "AGENT").await;
        let sari = create_user(&app, admin, "Sari Dewi", "AGENT").await;
        create_schedule(
            &app,
            admin,
            sari,
            "2025-10-10T01:00:00Z",
            "2025-10-10T09:00:00Z",
        )
        .await;

        let (forbidden, _) = send(
            &app,
            "POST",
            "/schedules",
            Some(budi),
            Some(json!({
                "user_id": budi,
                "start_at": "2025-10-07T00:00:00Z",
                "end_at": "2025-10-07T08:00:00Z",
                "channel": "VOICE",
            })),
        )
        .await;
        assert_eq!(forbidden, HttpStatusCode::FORBIDDEN);

        let (bad_input, _) = send(
            &app,
            "POST",
            "/swaps",
            Some(budi),
            Some(json!({ "start_at": "tomorrow" })),
        )
        .await;
        assert_eq!(bad_input, HttpStatusCode::BAD_REQUEST);

        let (not_found, _) = send(&app, "POST", "/swaps/77/cancel", Some(budi), None).await;
        assert_eq!(not_found, HttpStatusCode::NOT_FOUND);

        let (precondition, body) = send(
            &app,
            "POST",
            "/holiday_swaps",
            Some(budi),
            Some(json!({ "target_user_id": sari, "off_date": "2025-10-10" })),
        )
        .await;
        assert_eq!(precondition, HttpStatusCode::PRECONDITION_FAILED);
        assert_eq!(body["error"], json!(true));

        let (conflict, _) = send(
            &app,
            "POST",
            "/schedules",
            Some(admin),
            Some(json!({
                "user_id": sari,
                "start_at": "2025-10-10T05:00:00Z",
                "end_at": "2025-10-10T13:00:00Z",
                "channel": "SOSMED",
            })),
        )
        .await;
        assert_eq!(conflict, HttpStatusCode::CONFLICT);

        let (matrix, _) = send(
            &app,
            "GET",
            "/schedules/monthly_all?month=2025-10",
            Some(budi),
            None,
        )
        .await;
        assert_eq!(matrix, HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_holiday_swap_over_http() {
        let app: Router = build_router(create_test_app_state());
        let admin = bootstrap_admin(&app).await;
        let budi = create_user(&app, admin, "Budi Santoso", "AGENT").await;
        let sari = create_user(&app, admin, "Sari Dewi", "AGENT").await;
        create_schedule(
            &app,
            admin,
            budi,
            "2025-10-10T03:00:00Z",
            "2025-10-10T11:00:00Z",
        )
        .await;

        let (status, proposed) = send(
            &app,
            "POST",
            "/holiday_swaps",
            Some(budi),
            Some(json!({ "target_user_id": sari, "off_date": "2025-10-10" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let id = proposed["holiday_swap_id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            "POST",
            &format!("/holiday_swaps/{id}/accept"),
            Some(sari),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, approved) = send(
            &app,
            "POST",
            &format!("/holiday_swaps/{id}/bo_approve"),
            Some(admin),
            Some(json!({ "start_time": "09:00", "channel": "VOICE" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK, "{approved}");
        assert_eq!(approved["status"], json!("APPROVED"));

        let (_, off) = send(
            &app,
            "GET",
            &format!("/users/{budi}/off_days?month=2025-10"),
            Some(budi),
            None,
        )
        .await;
        assert_eq!(off["off_days"].as_array().unwrap().len(), 31);

        let (_, sari_month) = send(
            &app,
            "GET",
            &format!("/schedules/monthly?month=2025-10&user_id={sari}"),
            Some(admin),
            None,
        )
        .await;
        let schedules = sari_month["schedules"].as_array().unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0]["start_at"], json!("2025-10-10T02:00:00Z"));
    }

    #[tokio::test]
    async fn test_clear_days_and_mark_read() {
        let app: Router = build_router(create_test_app_state());
        let admin = bootstrap_admin(&app).await;
        let budi = create_user(&app, admin, "Budi Santoso", "AGENT").await;
        create_schedule(
            &app,
            admin,
            budi,
            "2025-10-05T01:00:00Z",
            "2025-10-05T09:00:00Z",
        )
        .await;

        let (status, cleared) = send(
            &app,
            "POST",
            "/leave/clear_days",
            Some(admin),
            Some(json!({ "user_id": budi, "first_day": "2025-10-05", "last_day": "2025-10-05" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(cleared["removed"], json!(1));

        let (status, _) = send(&app, "POST", "/notifications/5/read", Some(budi), None).await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }
}
