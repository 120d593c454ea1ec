// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod notification_tests;
mod schedule_tests;

use crate::SqlitePersistence;
use shiftdesk_domain::{RoleName, Schedule, ScheduleDraft, SHIFT_LENGTH};
use std::path::PathBuf;
use time::OffsetDateTime;
use time::macros::datetime;

/// A fixed clock for every write in these tests.
pub const fn test_now() -> OffsetDateTime {
    datetime!(2026-02-20 08:00 UTC)
}

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("in-memory database")
}

/// A database file shared by several connections, removed on drop.
pub struct TestDatabaseFile {
    dir: PathBuf,
}

impl TestDatabaseFile {
    pub fn new(name: &str) -> Self {
        let dir: PathBuf =
            std::env::temp_dir().join(format!("shiftdesk-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("temp dir");
        Self { dir }
    }

    /// Opens another connection to the same file.
    pub fn open(&self) -> SqlitePersistence {
        SqlitePersistence::new_with_file(self.dir.join("shiftdesk.db")).expect("file database")
    }
}

impl Drop for TestDatabaseFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// Creates an agent with a derived email.
pub fn create_test_agent(persistence: &mut SqlitePersistence, name: &str) -> i64 {
    create_test_user(persistence, name, &[RoleName::Agent])
}

pub fn create_test_user(
    persistence: &mut SqlitePersistence,
    name: &str,
    roles: &[RoleName],
) -> i64 {
    let email: String = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    persistence
        .create_user(name, &email, roles, test_now())
        .expect("user created")
        .user_id
}

/// Creates an eight-hour VOICE shift.
pub fn create_test_shift(
    persistence: &mut SqlitePersistence,
    user_id: i64,
    start: OffsetDateTime,
) -> Schedule {
    let draft: ScheduleDraft = ScheduleDraft::new(
        user_id,
        start,
        start + SHIFT_LENGTH,
        "VOICE",
        Some(String::from("Morning")),
        None,
    )
    .expect("valid draft");
    persistence
        .create_schedule(&draft, test_now())
        .expect("schedule created")
}
