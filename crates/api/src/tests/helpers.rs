// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use shiftdesk_domain::{RoleName, Schedule, ScheduleDraft, SiteCalendar, User};
use shiftdesk_persistence::{PersistenceError, SqlitePersistence};
use std::path::PathBuf;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{AuthenticatedActor, Notice, NotificationSink, WorkflowSettings};

/// A fixed clock for every write in these tests.
pub const fn test_now() -> OffsetDateTime {
    datetime!(2025-10-01 01:00 UTC)
}

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// A database file for tests that need several connections at once.
///
/// The directory is removed on drop.
pub struct TestDatabaseFile {
    dir: PathBuf,
}

impl TestDatabaseFile {
    pub fn new(name: &str) -> Self {
        let dir: PathBuf =
            std::env::temp_dir().join(format!("shiftdesk-api-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn open(&self) -> SqlitePersistence {
        SqlitePersistence::new_with_file(self.dir.join("shiftdesk.db"))
            .expect("Failed to open file database")
    }
}

impl Drop for TestDatabaseFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// Jakarta site settings with the warn-and-allow swap policy.
pub fn create_test_settings() -> WorkflowSettings {
    WorkflowSettings::new(
        SiteCalendar::new("Asia/Jakarta").expect("Jakarta is a valid zone"),
        false,
    )
}

pub fn create_test_actor(
    persistence: &mut SqlitePersistence,
    name: &str,
    roles: &[RoleName],
) -> AuthenticatedActor {
    let email: String = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let user: User = persistence
        .create_user(name, &email, roles, test_now())
        .expect("Failed to create user");
    AuthenticatedActor::new(user)
}

pub fn create_test_agent(persistence: &mut SqlitePersistence, name: &str) -> AuthenticatedActor {
    create_test_actor(persistence, name, &[RoleName::Agent])
}

pub fn create_test_shift(
    persistence: &mut SqlitePersistence,
    user_id: i64,
    start: OffsetDateTime,
    end: OffsetDateTime,
    channel: &str,
) -> Schedule {
    let draft: ScheduleDraft =
        ScheduleDraft::new(user_id, start, end, channel, None, None).expect("Invalid draft");
    persistence
        .create_schedule(&draft, test_now())
        .expect("Failed to create schedule")
}

/// Recipients of a set of notices, in delivery order.
pub fn recipients(notices: &[Notice]) -> Vec<i64> {
    notices.iter().map(|n| n.user_id).collect()
}

/// A sink that refuses every notice.
pub struct FailingSink;

impl NotificationSink for FailingSink {
    fn notify(&mut self, _notice: &Notice) -> Result<(), PersistenceError> {
        Err(PersistenceError::DatabaseError(String::from(
            "notification table unavailable",
        )))
    }
}
