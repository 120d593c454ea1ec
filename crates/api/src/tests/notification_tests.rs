// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification inbox tests.

use shiftdesk_domain::RefType;
use shiftdesk_persistence::SqlitePersistence;
use time::Duration;

use crate::{ApiError, Notice, dispatch_notices, notifications};

use super::helpers::{FailingSink, create_test_agent, create_test_persistence, test_now};

fn seed_notices(persistence: &mut SqlitePersistence, user_id: i64, count: i64) {
    let notices: Vec<Notice> = (0..count)
        .map(|i| Notice {
            user_id,
            title: format!("Notice {i}"),
            body: String::from("body"),
            ref_type: RefType::Swap,
            ref_id: Some(i),
            created_at: test_now() + Duration::minutes(i),
        })
        .collect();
    let delivered: usize = dispatch_notices(persistence, &notices);
    assert_eq!(delivered, notices.len());
}

#[test]
fn test_inbox_is_newest_first_with_default_limit() {
    let mut persistence = create_test_persistence();
    let agent = create_test_agent(&mut persistence, "Budi Santoso");
    seed_notices(&mut persistence, agent.user_id(), 60);

    let defaulted = notifications::list_notifications(&mut persistence, &agent, false, None).unwrap();
    assert_eq!(defaulted.items.len(), 50);
    assert_eq!(defaulted.items[0].title, "Notice 59");
    assert_eq!(defaulted.items[0].ref_type, "SWAP");

    let oversized =
        notifications::list_notifications(&mut persistence, &agent, false, Some(1000)).unwrap();
    assert_eq!(oversized.items.len(), 50);

    let small = notifications::list_notifications(&mut persistence, &agent, false, Some(5)).unwrap();
    assert_eq!(small.items.len(), 5);
}

#[test]
fn test_mark_read_filters_unread() {
    let mut persistence = create_test_persistence();
    let agent = create_test_agent(&mut persistence, "Budi Santoso");
    seed_notices(&mut persistence, agent.user_id(), 2);
    let inbox = notifications::list_notifications(&mut persistence, &agent, true, None).unwrap();
    let newest: i64 = inbox.items[0].notification_id;

    notifications::mark_read(&mut persistence, &agent, newest).unwrap();

    let unread = notifications::list_notifications(&mut persistence, &agent, true, None).unwrap();
    assert_eq!(unread.items.len(), 1);
    assert_ne!(unread.items[0].notification_id, newest);
    let all = notifications::list_notifications(&mut persistence, &agent, false, None).unwrap();
    assert!(all.items.iter().any(|n| n.notification_id == newest && n.is_read));
}

#[test]
fn test_mark_read_of_someone_elses_notification_is_not_found() {
    let mut persistence = create_test_persistence();
    let owner = create_test_agent(&mut persistence, "Budi Santoso");
    let snoop = create_test_agent(&mut persistence, "Sari Dewi");
    seed_notices(&mut persistence, owner.user_id(), 1);
    let inbox = notifications::list_notifications(&mut persistence, &owner, false, None).unwrap();

    let result = notifications::mark_read(&mut persistence, &snoop, inbox.items[0].notification_id);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_dispatch_counts_only_delivered_notices() {
    let notice = Notice {
        user_id: 1,
        title: String::from("Shift Swap Requested"),
        body: String::from("body"),
        ref_type: RefType::Swap,
        ref_id: None,
        created_at: test_now(),
    };

    assert_eq!(dispatch_notices(&mut FailingSink, &[notice.clone(), notice]), 0);
}
