// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use shiftdesk::CoreError;
use shiftdesk_domain::DomainError;
use shiftdesk_persistence::PersistenceError;
use thiserror::Error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The capability required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller is not allowed to take this action.
    #[error("Forbidden: {action}: {reason}")]
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// Why the caller may not take it.
        reason: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request is not in the state the action needs.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// A human-readable description of the state mismatch.
        message: String,
    },
    /// A business precondition blocks the action.
    #[error("Precondition failed ({rule}): {message}")]
    PreconditionFailed {
        /// The precondition that failed.
        rule: String,
        /// A human-readable description.
        message: String,
    },
    /// The change would double-book a user.
    #[error("Schedule conflict: {message}")]
    ScheduleConflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The proposed exchange would change nothing.
    #[error("Invalid swap: {message}")]
    InvalidSwap {
        /// A human-readable description.
        message: String,
    },
    /// A schedule is not owned by the expected user.
    #[error("Ownership mismatch: {message}")]
    OwnershipMismatch {
        /// A human-readable description.
        message: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Forbidden {
                action,
                reason: format!("requires {required_role} role"),
            },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::DomainViolation(domain_err) => translate_domain_error(domain_err),
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

fn not_found(resource_type: &str, err: &DomainError) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidTimeRange { .. } => invalid("end_at", &err),
        DomainError::InvalidChannel(_) => invalid("channel", &err),
        DomainError::InvalidRole(_) | DomainError::NoRolesAssigned => invalid("roles", &err),
        DomainError::InvalidTimestamp { .. } => invalid("start_at", &err),
        DomainError::InvalidClockTime(_) => invalid("start_time", &err),
        DomainError::InvalidDate(_) => invalid("date", &err),
        DomainError::InvalidMonth(_) => invalid("month", &err),
        DomainError::InvalidTimezone(_) => invalid("timezone", &err),
        DomainError::UnresolvableLocalTime { .. } => invalid("start_time", &err),
        DomainError::MissingUserId { field } => invalid(field, &err),
        DomainError::SelfReference { .. } => invalid("user_id", &err),
        DomainError::InvalidName(_) => invalid("full_name", &err),
        DomainError::InvalidEmail(_) => invalid("email", &err),
        DomainError::StartOutsideOffDate { .. } => invalid("start_at", &err),
        DomainError::DuplicateEmail(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: err.to_string(),
        },
        DomainError::DirectoryNotEmpty => ApiError::Forbidden {
            action: String::from("create_first_admin"),
            reason: err.to_string(),
        },
        DomainError::ScheduleNotFound(_) | DomainError::RequesterShiftNotFound { .. } => {
            not_found("Schedule", &err)
        }
        DomainError::SwapRequestNotFound(_) => not_found("Swap request", &err),
        DomainError::HolidaySwapNotFound(_) => not_found("Holiday swap", &err),
        DomainError::UserNotFound(_) => not_found("User", &err),
        DomainError::NotificationNotFound(_) => not_found("Notification", &err),
        DomainError::RequesterHasNoShift { .. } => ApiError::PreconditionFailed {
            rule: String::from("requester_schedule_required"),
            message: err.to_string(),
        },
        DomainError::TargetNotOff { .. } => ApiError::PreconditionFailed {
            rule: String::from("target_must_be_off"),
            message: err.to_string(),
        },
        DomainError::NotRequester { .. } => ApiError::Forbidden {
            action: String::from("requester_only"),
            reason: err.to_string(),
        },
        DomainError::NotTarget { .. } => ApiError::Forbidden {
            action: String::from("target_only"),
            reason: err.to_string(),
        },
        DomainError::InvalidSwapTransition { .. }
        | DomainError::InvalidHolidaySwapTransition { .. } => ApiError::InvalidState {
            message: err.to_string(),
        },
        DomainError::ScheduleOverlap { .. } => ApiError::ScheduleConflict {
            message: err.to_string(),
        },
        DomainError::IdenticalWindows { .. } => ApiError::InvalidSwap {
            message: err.to_string(),
        },
        DomainError::OwnershipMismatch { .. } => ApiError::OwnershipMismatch {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}
