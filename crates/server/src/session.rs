// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Acting-user extraction for the server.
//!
//! Credentials are handled upstream. Each request names its acting user
//! in the `X-User-Id` header, which is resolved against the directory
//! before any handler runs.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use shiftdesk_api::{AuthenticatedActor, AuthenticationService};
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// The header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extractor for the acting user.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     ActingUser(actor): ActingUser,
/// ) -> Result<Json<Response>, HttpError> {
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - The header is missing or not a positive integer
/// - The user does not exist or is inactive
pub struct ActingUser(pub AuthenticatedActor);

impl FromRequestParts<AppState> for ActingUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw: &str = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| {
                debug!("Missing X-User-Id header");
                SessionError::MissingUserHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid X-User-Id header encoding");
                SessionError::InvalidUserHeader
            })?;

        let user_id: i64 = raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                warn!(value = %raw, "X-User-Id is not a user id");
                SessionError::InvalidUserHeader
            })?;

        let mut persistence = state.persistence.lock().await;
        let actor: AuthenticatedActor =
            AuthenticationService::authenticate_stub(&mut persistence, user_id).map_err(|e| {
                warn!(user_id, error = %e, "Acting user rejected");
                SessionError::Rejected(e.to_string())
            })?;

        Ok(Self(actor))
    }
}

/// Acting-user extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// The header is missing.
    MissingUserHeader,
    /// The header is not a positive integer.
    InvalidUserHeader,
    /// The named user cannot act.
    Rejected(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingUserHeader => String::from("Missing X-User-Id header"),
            Self::InvalidUserHeader => {
                String::from("Invalid X-User-Id header. Expected a positive user id")
            }
            Self::Rejected(reason) => reason,
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
