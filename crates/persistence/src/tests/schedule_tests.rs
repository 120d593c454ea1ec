// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{
    TestDatabaseFile, create_test_agent, create_test_persistence, create_test_shift, test_now,
};
use crate::{PersistenceError, SqlitePersistence};
use shiftdesk_domain::{
    Channel, DomainError, LookupTier, Schedule, ScheduleDraft, SiteCalendar, TimeWindow, YearMonth,
};
use std::sync::{Arc, Barrier};
use std::thread;
use time::Month;
use time::macros::{date, datetime};

fn draft(user_id: i64, start: time::OffsetDateTime, end: time::OffsetDateTime) -> ScheduleDraft {
    ScheduleDraft::new(user_id, start, end, "SOSMED", None, Some(String::from("cover")))
        .expect("valid draft")
}

#[test]
fn test_create_schedule_round_trips_fields() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let agent: i64 = create_test_agent(&mut persistence, "Citra");

    let created: Schedule = create_test_shift(&mut persistence, agent, datetime!(2026-03-02 01:00 UTC));
    let loaded: Schedule = persistence
        .find_schedule(created.schedule_id)
        .unwrap()
        .expect("schedule stored");

    assert_eq!(loaded, created);
    assert_eq!(loaded.channel, Channel::Voice);
    assert_eq!(loaded.shift_name.as_deref(), Some("Morning"));
}

#[test]
fn test_overlapping_schedule_rejected() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let agent: i64 = create_test_agent(&mut persistence, "Citra");
    create_test_shift(&mut persistence, agent, datetime!(2026-03-02 01:00 UTC));

    let result = persistence.create_schedule(
        &draft(agent, datetime!(2026-03-02 08:00 UTC), datetime!(2026-03-02 12:00 UTC)),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(DomainError::ScheduleOverlap { user_id, .. })) if user_id == agent
    ));
}

#[test]
fn test_touching_schedules_allowed() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let agent: i64 = create_test_agent(&mut persistence, "Citra");
    create_test_shift(&mut persistence, agent, datetime!(2026-03-02 01:00 UTC));

    let result = persistence.create_schedule(
        &draft(agent, datetime!(2026-03-02 09:00 UTC), datetime!(2026-03-02 17:00 UTC)),
        test_now(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_other_users_may_share_a_window() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let first: i64 = create_test_agent(&mut persistence, "Citra");
    let second: i64 = create_test_agent(&mut persistence, "Dewi");

    create_test_shift(&mut persistence, first, datetime!(2026-03-02 01:00 UTC));
    create_test_shift(&mut persistence, second, datetime!(2026-03-02 01:00 UTC));

    let window: TimeWindow = TimeWindow::shift_from(datetime!(2026-03-02 01:00 UTC)).unwrap();
    let on_voice: Vec<Schedule> = persistence.list_on_channel(Channel::Voice, &window).unwrap();
    assert_eq!(on_voice.len(), 2);
}

#[test]
fn test_update_excludes_the_schedule_itself() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let agent: i64 = create_test_agent(&mut persistence, "Citra");
    let created: Schedule = create_test_shift(&mut persistence, agent, datetime!(2026-03-02 01:00 UTC));

    let updated: Schedule = persistence
        .update_schedule(
            created.schedule_id,
            &draft(agent, datetime!(2026-03-02 03:00 UTC), datetime!(2026-03-02 11:00 UTC)),
            test_now(),
        )
        .unwrap();

    assert_eq!(updated.schedule_id, created.schedule_id);
    assert_eq!(updated.channel, Channel::Sosmed);
    let loaded: Schedule = persistence.find_schedule(created.schedule_id).unwrap().unwrap();
    assert_eq!(loaded.window.start(), datetime!(2026-03-02 03:00 UTC));
    assert_eq!(loaded.notes.as_deref(), Some("cover"));
}

#[test]
fn test_update_rejects_overlap_with_other_schedule() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let agent: i64 = create_test_agent(&mut persistence, "Citra");
    let first: Schedule = create_test_shift(&mut persistence, agent, datetime!(2026-03-02 01:00 UTC));
    create_test_shift(&mut persistence, agent, datetime!(2026-03-03 01:00 UTC));

    let result = persistence.update_schedule(
        first.schedule_id,
        &draft(agent, datetime!(2026-03-02 20:00 UTC), datetime!(2026-03-03 04:00 UTC)),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(DomainError::ScheduleOverlap { .. }))
    ));
    let unchanged: Schedule = persistence.find_schedule(first.schedule_id).unwrap().unwrap();
    assert_eq!(unchanged, first);
}

#[test]
fn test_update_missing_schedule_not_found() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let agent: i64 = create_test_agent(&mut persistence, "Citra");

    let result = persistence.update_schedule(
        404,
        &draft(agent, datetime!(2026-03-02 01:00 UTC), datetime!(2026-03-02 09:00 UTC)),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(DomainError::ScheduleNotFound(404)))
    ));
}

#[test]
fn test_delete_missing_schedule_is_not_an_error() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    assert!(!persistence.delete_schedule(999).unwrap());
}

#[test]
fn test_delete_schedule_removes_row() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let agent: i64 = create_test_agent(&mut persistence, "Citra");
    let created: Schedule = create_test_shift(&mut persistence, agent, datetime!(2026-03-02 01:00 UTC));

    assert!(persistence.delete_schedule(created.schedule_id).unwrap());
    assert!(persistence.find_schedule(created.schedule_id).unwrap().is_none());
}

#[test]
fn test_locate_shift_prefers_overlap_then_exact_then_same_day() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let agent: i64 = create_test_agent(&mut persistence, "Citra");
    let calendar: SiteCalendar = SiteCalendar::new("Asia/Jakarta").unwrap();

    // Local 08:00 to 16:00 on 2 March.
    let morning: Schedule = create_test_shift(&mut persistence, agent, datetime!(2026-03-02 01:00 UTC));

    let requested: TimeWindow = TimeWindow::shift_from(datetime!(2026-03-02 05:00 UTC)).unwrap();
    let day: TimeWindow = calendar.day_of(requested.start()).unwrap();
    let (found, tier) = persistence.locate_shift(agent, &requested, &day).unwrap().unwrap();
    assert_eq!(found.schedule_id, morning.schedule_id);
    assert_eq!(tier, LookupTier::Overlap);

    // Local 22:00 to 23:30 on 2 March, after the morning shift ends.
    let late: TimeWindow = TimeWindow::new(
        datetime!(2026-03-02 15:00 UTC),
        datetime!(2026-03-02 16:30 UTC),
    )
    .unwrap();
    let day: TimeWindow = calendar.day_of(late.start()).unwrap();
    let (found, tier) = persistence.locate_shift(agent, &late, &day).unwrap().unwrap();
    assert_eq!(found.schedule_id, morning.schedule_id);
    assert_eq!(tier, LookupTier::SameDay);
}

#[test]
fn test_locate_shift_returns_none_on_empty_day() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let agent: i64 = create_test_agent(&mut persistence, "Citra");
    let calendar: SiteCalendar = SiteCalendar::new("Asia/Jakarta").unwrap();
    create_test_shift(&mut persistence, agent, datetime!(2026-03-02 01:00 UTC));

    let requested: TimeWindow = TimeWindow::shift_from(datetime!(2026-03-04 01:00 UTC)).unwrap();
    let day: TimeWindow = calendar.day_of(requested.start()).unwrap();
    assert!(persistence.locate_shift(agent, &requested, &day).unwrap().is_none());
}

#[test]
fn test_monthly_listing_includes_only_intersecting_schedules() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let agent: i64 = create_test_agent(&mut persistence, "Citra");
    let other: i64 = create_test_agent(&mut persistence, "Dewi");
    let calendar: SiteCalendar = SiteCalendar::new("Asia/Jakarta").unwrap();

    // Ends exactly at local midnight on 1 March, so it is outside March.
    create_test_shift(&mut persistence, agent, datetime!(2026-02-28 09:00 UTC));
    // Starts 23:00 local on 31 March and spills into April.
    let spanning: Schedule = create_test_shift(&mut persistence, agent, datetime!(2026-03-31 16:00 UTC));
    let mid: Schedule = create_test_shift(&mut persistence, agent, datetime!(2026-03-10 01:00 UTC));
    create_test_shift(&mut persistence, other, datetime!(2026-03-10 01:00 UTC));

    let march: TimeWindow = calendar.month_bounds(YearMonth::new(2026, Month::March)).unwrap();

    let mine: Vec<Schedule> = persistence.list_schedules(Some(agent), &march).unwrap();
    let ids: Vec<i64> = mine.iter().map(|s| s.schedule_id).collect();
    assert_eq!(ids, vec![mid.schedule_id, spanning.schedule_id]);

    let everyone: Vec<Schedule> = persistence.list_schedules(None, &march).unwrap();
    assert_eq!(everyone.len(), 3);
}

#[test]
fn test_clear_schedules_starting_within_range() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let agent: i64 = create_test_agent(&mut persistence, "Citra");
    let calendar: SiteCalendar = SiteCalendar::new("Asia/Jakarta").unwrap();

    let before: Schedule = create_test_shift(&mut persistence, agent, datetime!(2026-03-01 16:00 UTC));
    create_test_shift(&mut persistence, agent, datetime!(2026-03-02 01:00 UTC));
    create_test_shift(&mut persistence, agent, datetime!(2026-03-03 01:00 UTC));
    let after: Schedule = create_test_shift(&mut persistence, agent, datetime!(2026-03-04 01:00 UTC));

    let from: TimeWindow = calendar.day_bounds(date!(2026-03-02)).unwrap();
    let to: TimeWindow = calendar.day_bounds(date!(2026-03-03)).unwrap();
    let range: TimeWindow = TimeWindow::new(from.start(), to.end()).unwrap();

    let removed: usize = persistence.clear_schedules_starting_within(agent, &range).unwrap();
    assert_eq!(removed, 2);

    let remaining: Vec<i64> = persistence
        .list_schedules(Some(agent), &TimeWindow::new(before.window.start(), after.window.end()).unwrap())
        .unwrap()
        .iter()
        .map(|s| s.schedule_id)
        .collect();
    assert_eq!(remaining, vec![before.schedule_id, after.schedule_id]);
}

#[test]
fn test_racing_connections_cannot_double_book() {
    let database: TestDatabaseFile = TestDatabaseFile::new("double-book-race");
    let mut setup: SqlitePersistence = database.open();
    let agent: i64 = create_test_agent(&mut setup, "Dewi");

    let barrier: Arc<Barrier> = Arc::new(Barrier::new(2));
    let starts = [datetime!(2026-03-02 01:00 UTC), datetime!(2026-03-02 05:00 UTC)];
    let handles: Vec<_> = starts
        .into_iter()
        .map(|start| {
            let mut persistence: SqlitePersistence = database.open();
            let barrier: Arc<Barrier> = Arc::clone(&barrier);
            thread::spawn(move || {
                let shift: ScheduleDraft =
                    draft(agent, start, start + time::Duration::hours(8));
                barrier.wait();
                persistence.create_schedule(&shift, test_now())
            })
        })
        .collect();
    let results: Vec<Result<Schedule, PersistenceError>> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(PersistenceError::DomainViolation(DomainError::ScheduleOverlap { .. }))
    )));

    let march: TimeWindow = TimeWindow::new(
        datetime!(2026-03-01 00:00 UTC),
        datetime!(2026-04-01 00:00 UTC),
    )
    .unwrap();
    assert_eq!(setup.list_schedules(Some(agent), &march).unwrap().len(), 1);
}
