// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Credentials are out of scope: the acting user is named by the transport
//! and resolved against the directory. Every capability check reads the
//! user's roles through `RoleName` predicates defined once in the domain.

use shiftdesk_domain::{RoleName, User};
use shiftdesk_persistence::SqlitePersistence;
use tracing::debug;

use crate::error::{ApiError, AuthError};

/// An authenticated user acting on the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user behind the request.
    pub user: User,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(user: User) -> Self {
        Self { user }
    }

    /// Returns the acting user's id.
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user.user_id
    }

    /// Returns whether the actor holds any backoffice role.
    #[must_use]
    pub fn is_backoffice(&self) -> bool {
        self.user.is_backoffice()
    }
}

/// Authentication service for resolving the acting user.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Resolves the acting user from an identifier supplied by the transport.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `user_id` - The claimed user id
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user does not exist
    /// - The user is inactive
    /// - The directory cannot be read
    pub fn authenticate_stub(
        persistence: &mut SqlitePersistence,
        user_id: i64,
    ) -> Result<AuthenticatedActor, ApiError> {
        let user: User = persistence
            .find_user(user_id)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: format!("Unknown user {user_id}"),
            })?;

        if !user.active {
            return Err(AuthError::AuthenticationFailed {
                reason: format!("User {user_id} is inactive"),
            }
            .into());
        }

        debug!(user_id, "Authenticated acting user");
        Ok(AuthenticatedActor::new(user))
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that an actor may administer schedules.
    ///
    /// Only `SUPER_ADMIN`, `HR_ADMIN`, and `TL` users may create, update,
    /// delete, or clear schedules.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks a schedule administration role.
    pub fn authorize_manage_schedules(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.user.can_manage_schedules() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("schedule administrator"),
            })
        }
    }

    /// Checks that an actor holds a backoffice role.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is an agent only.
    pub fn authorize_backoffice(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.is_backoffice() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("backoffice"),
            })
        }
    }

    /// Checks that an actor may create users.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a `SUPER_ADMIN`.
    pub fn authorize_create_user(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.user.has_role(RoleName::SuperAdmin) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("create_user"),
                required_role: String::from("SUPER_ADMIN"),
            })
        }
    }

    /// Checks that an actor may read another user's schedules.
    ///
    /// Agents may only read their own; backoffice users may read anyone's.
    ///
    /// # Errors
    ///
    /// Returns an error if an agent asks for someone else's schedules.
    pub fn authorize_view_schedules_of(
        actor: &AuthenticatedActor,
        user_id: i64,
    ) -> Result<(), AuthError> {
        if actor.user_id() == user_id || actor.is_backoffice() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("view_schedules"),
                required_role: String::from("backoffice"),
            })
        }
    }
}
