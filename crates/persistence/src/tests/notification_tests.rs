// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_test_agent, create_test_persistence, test_now};
use crate::{PersistenceError, SqlitePersistence};
use shiftdesk_domain::{DomainError, Notification, RefType};
use time::Duration;

fn notify(persistence: &mut SqlitePersistence, user_id: i64, title: &str, minutes_after: i64) -> i64 {
    persistence
        .create_notification(
            user_id,
            title,
            "body",
            RefType::Swap,
            Some(1),
            test_now() + Duration::minutes(minutes_after),
        )
        .unwrap()
}

#[test]
fn test_notifications_listed_newest_first_with_limit() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let ayu: i64 = create_test_agent(&mut persistence, "Ayu");

    notify(&mut persistence, ayu, "first", 0);
    notify(&mut persistence, ayu, "second", 1);
    notify(&mut persistence, ayu, "third", 2);

    let listed: Vec<Notification> = persistence.list_notifications(ayu, false, 2).unwrap();
    let titles: Vec<&str> = listed.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second"]);
    assert!(listed.iter().all(|n| !n.is_read));
    assert_eq!(listed[0].ref_type, RefType::Swap);
}

#[test]
fn test_mark_read_filters_unread_listing() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let ayu: i64 = create_test_agent(&mut persistence, "Ayu");

    let read_id: i64 = notify(&mut persistence, ayu, "read me", 0);
    notify(&mut persistence, ayu, "still unread", 1);

    persistence.mark_notification_read(read_id, ayu).unwrap();

    let unread: Vec<Notification> = persistence.list_notifications(ayu, true, 50).unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].title, "still unread");

    let all: Vec<Notification> = persistence.list_notifications(ayu, false, 50).unwrap();
    assert!(all.iter().any(|n| n.notification_id == read_id && n.is_read));
}

#[test]
fn test_mark_read_of_someone_elses_notification_not_found() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let ayu: i64 = create_test_agent(&mut persistence, "Ayu");
    let budi: i64 = create_test_agent(&mut persistence, "Budi");
    let id: i64 = notify(&mut persistence, ayu, "private", 0);

    let result = persistence.mark_notification_read(id, budi);

    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(DomainError::NotificationNotFound(n))) if n == id
    ));
    let listed: Vec<Notification> = persistence.list_notifications(ayu, true, 50).unwrap();
    assert_eq!(listed.len(), 1, "still unread for its owner");
}
