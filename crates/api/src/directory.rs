// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User directory lookups used by the workflows.

use std::collections::HashMap;

use shiftdesk_domain::{DomainError, User, display_name};
use shiftdesk_persistence::{PageRequest, PersistenceError, SqlitePersistence};

/// Read access to users and roles.
pub trait UserDirectory {
    /// Retrieves a user that must exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(UserNotFound)` if absent.
    fn require_user(&mut self, user_id: i64) -> Result<User, PersistenceError>;

    /// Lists a page of users ordered by name with the total count.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn list_users_page(&mut self, page: PageRequest) -> Result<(Vec<User>, i64), PersistenceError>;

    /// Lists the ids of active backoffice users.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn backoffice_ids(&mut self) -> Result<Vec<i64>, PersistenceError>;

    /// Maps each id to a display name, falling back to `Agent #<id>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn display_names(&mut self, user_ids: &[i64]) -> Result<HashMap<i64, String>, PersistenceError>;
}

impl UserDirectory for SqlitePersistence {
    fn require_user(&mut self, user_id: i64) -> Result<User, PersistenceError> {
        self.find_user(user_id)?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    fn list_users_page(&mut self, page: PageRequest) -> Result<(Vec<User>, i64), PersistenceError> {
        let users: Vec<User> = self.list_users()?;
        let total: i64 = self.count_users()?;
        let skip: usize = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take: usize = usize::try_from(page.size()).unwrap_or_default();
        Ok((users.into_iter().skip(skip).take(take).collect(), total))
    }

    fn backoffice_ids(&mut self) -> Result<Vec<i64>, PersistenceError> {
        self.backoffice_user_ids()
    }

    fn display_names(&mut self, user_ids: &[i64]) -> Result<HashMap<i64, String>, PersistenceError> {
        let known: HashMap<i64, String> = self.user_names(user_ids)?.into_iter().collect();
        Ok(user_ids
            .iter()
            .map(|id| (*id, display_name(*id, known.get(id).map(String::as_str))))
            .collect())
    }
}
