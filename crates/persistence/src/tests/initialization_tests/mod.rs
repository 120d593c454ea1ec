// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other test module opens its own in-memory database, so connection
//! setup and migrations are exercised implicitly. These tests pin down the
//! properties the rest of the suite relies on.

use crate::SqlitePersistence;
use crate::tests::create_test_agent;

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, crate::error::PersistenceError> =
        SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = SqlitePersistence::new_in_memory().unwrap();
    let mut db2 = SqlitePersistence::new_in_memory().unwrap();

    create_test_agent(&mut db1, "Ayu");

    assert_eq!(db1.count_users().unwrap(), 1, "db1 should have 1 user");
    assert_eq!(db2.count_users().unwrap(), 0, "db2 should have 0 users (isolated)");
}

#[test]
fn test_foreign_key_enforcement_enabled() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_file_database_persists_between_connections() {
    let dir = std::env::temp_dir().join(format!("shiftdesk-init-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("shiftdesk.db");
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence = SqlitePersistence::new_with_file(&path).unwrap();
        create_test_agent(&mut persistence, "Budi");
    }

    let mut reopened = SqlitePersistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.count_users().unwrap(), 1);

    drop(reopened);
    let _ = std::fs::remove_dir_all(&dir);
}
