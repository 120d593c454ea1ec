// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User directory operations.

use shiftdesk_domain::{DomainError, RoleName, User, validate_user_fields};
use shiftdesk_persistence::{PageRequest, SqlitePersistence};
use time::OffsetDateTime;
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::directory::UserDirectory;
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    CreateFirstAdminRequest, CreateUserRequest, ListUsersMiniResponse, UserInfo, UserMiniInfo,
};
use crate::views::{to_count, user_info};

/// Largest page of the mini directory.
pub const MAX_DIRECTORY_PAGE_SIZE: i64 = 500;

/// Creates the first `SUPER_ADMIN`.
///
/// Only allowed while the directory is empty. The emptiness check and the
/// insert share one transaction.
///
/// # Errors
///
/// Returns an error if:
/// - The name or email is invalid
/// - The directory already has users
/// - Database operations fail
pub fn create_first_admin(
    persistence: &mut SqlitePersistence,
    request: &CreateFirstAdminRequest,
    now: OffsetDateTime,
) -> Result<UserInfo, ApiError> {
    let roles: [RoleName; 1] = [RoleName::SuperAdmin];
    let email: String = validate_user_fields(&request.full_name, &request.email, &roles)
        .map_err(translate_domain_error)?;
    let full_name: &str = request.full_name.trim();

    let user: User = persistence.transaction(|tx| -> Result<User, ApiError> {
        if tx.count_users()? > 0 {
            return Err(translate_domain_error(DomainError::DirectoryNotEmpty));
        }
        Ok(tx.create_user(full_name, &email, &roles, now)?)
    })?;

    info!(user_id = user.user_id, "Created first administrator");
    Ok(user_info(&user))
}

/// Creates a user with the given roles.
///
/// Only `SUPER_ADMIN` actors may create users.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized
/// - A role name is unknown or no role is given
/// - The name or email is invalid
/// - The email is already taken
pub fn create_user(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedActor,
    request: &CreateUserRequest,
    now: OffsetDateTime,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_create_user(actor)?;

    let mut roles: Vec<RoleName> = Vec::with_capacity(request.roles.len());
    for name in &request.roles {
        let role: RoleName = name.parse().map_err(translate_domain_error)?;
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    let email: String = validate_user_fields(&request.full_name, &request.email, &roles)
        .map_err(translate_domain_error)?;

    let user: User = persistence.create_user(request.full_name.trim(), &email, &roles, now)?;
    info!(
        user_id = user.user_id,
        created_by = actor.user_id(),
        "Created user"
    );
    Ok(user_info(&user))
}

/// Lists user ids and names for pickers.
///
/// Any authenticated user may read the mini directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list_users_mini(
    persistence: &mut SqlitePersistence,
    _actor: &AuthenticatedActor,
    page: i64,
    size: i64,
) -> Result<ListUsersMiniResponse, ApiError> {
    let page: PageRequest = PageRequest::new(page, size, MAX_DIRECTORY_PAGE_SIZE);
    let (users, total) = persistence.list_users_page(page)?;
    Ok(ListUsersMiniResponse {
        items: users
            .into_iter()
            .map(|user| UserMiniInfo {
                user_id: user.user_id,
                full_name: user.full_name,
            })
            .collect(),
        total: to_count(total)?,
    })
}
