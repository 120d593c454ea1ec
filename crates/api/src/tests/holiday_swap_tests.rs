// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Holiday swap workflow tests.

use shiftdesk_domain::{HolidaySwapStatus, RoleName, Schedule, TimeWindow};
use shiftdesk_persistence::SqlitePersistence;
use time::macros::datetime;

use crate::{
    ApiError, ApproveHolidaySwapRequest, AuthenticatedActor, HolidaySwapInfo,
    ProposeHolidaySwapRequest, holiday_swaps,
};

use super::helpers::{
    create_test_actor, create_test_agent, create_test_persistence, create_test_settings,
    create_test_shift, recipients, test_now,
};

/// The local off-date used throughout; Jakarta midnight is 17:00 UTC the day before.
const OFF_DATE: &str = "2025-10-10";

struct Cast {
    requester: AuthenticatedActor,
    target: AuthenticatedActor,
    supervisor: AuthenticatedActor,
}

fn setup_cast(persistence: &mut SqlitePersistence) -> Cast {
    Cast {
        requester: create_test_agent(persistence, "Budi Santoso"),
        target: create_test_agent(persistence, "Sari Dewi"),
        supervisor: create_test_actor(persistence, "Tono Supervisor", &[RoleName::Spv]),
    }
}

fn propose_for(persistence: &mut SqlitePersistence, cast: &Cast) -> HolidaySwapInfo {
    holiday_swaps::propose(
        persistence,
        &create_test_settings(),
        &cast.requester,
        &ProposeHolidaySwapRequest {
            target_user_id: cast.target.user_id(),
            off_date: OFF_DATE.to_string(),
            reason: String::from("wedding"),
        },
        test_now(),
    )
    .expect("Failed to propose holiday swap")
    .deliver(persistence)
}

fn simple_approval(start_time: &str) -> ApproveHolidaySwapRequest {
    ApproveHolidaySwapRequest {
        start_time: Some(start_time.to_string()),
        channel: String::from("VOICE"),
        ..ApproveHolidaySwapRequest::default()
    }
}

/// Proposes and has the target accept, leaving the request with backoffice.
fn pending_backoffice(persistence: &mut SqlitePersistence, cast: &Cast) -> HolidaySwapInfo {
    let proposed: HolidaySwapInfo = propose_for(persistence, cast);
    holiday_swaps::accept(
        persistence,
        &cast.target,
        proposed.holiday_swap_id,
        test_now(),
    )
    .expect("Target should accept")
    .deliver(persistence)
}

#[test]
fn test_propose_notifies_requester_target_and_backoffice() {
    let mut persistence = create_test_persistence();
    let cast = setup_cast(&mut persistence);

    let outcome = holiday_swaps::propose(
        &mut persistence,
        &create_test_settings(),
        &cast.requester,
        &ProposeHolidaySwapRequest {
            target_user_id: cast.target.user_id(),
            off_date: OFF_DATE.to_string(),
            reason: String::new(),
        },
        test_now(),
    )
    .unwrap();

    assert_eq!(
        recipients(&outcome.notices),
        vec![
            cast.requester.user_id(),
            cast.target.user_id(),
            cast.supervisor.user_id()
        ]
    );
    assert_eq!(outcome.response.status, "PENDING_TARGET");
    assert_eq!(outcome.response.off_date, OFF_DATE);
    assert_eq!(outcome.response.target_name, "Sari Dewi");
}

#[test]
fn test_propose_fails_when_target_works_that_day() {
    let mut persistence = create_test_persistence();
    let cast = setup_cast(&mut persistence);
    // 22:00-06:00 local starting the evening before: still touches the off-date.
    create_test_shift(
        &mut persistence,
        cast.target.user_id(),
        datetime!(2025-10-09 15:00 UTC),
        datetime!(2025-10-09 23:00 UTC),
        "VOICE",
    );

    let result = holiday_swaps::propose(
        &mut persistence,
        &create_test_settings(),
        &cast.requester,
        &ProposeHolidaySwapRequest {
            target_user_id: cast.target.user_id(),
            off_date: OFF_DATE.to_string(),
            reason: String::new(),
        },
        test_now(),
    );

    assert!(matches!(result, Err(ApiError::PreconditionFailed { .. })));
    let (listed, total) = persistence
        .list_holiday_swaps(shiftdesk_persistence::PageRequest::new(1, 20, 500), None)
        .unwrap();
    assert!(listed.is_empty());
    assert_eq!(total, 0);
}

#[test]
fn test_propose_rejects_self_and_unknown_target() {
    let mut persistence = create_test_persistence();
    let cast = setup_cast(&mut persistence);
    let settings = create_test_settings();

    let myself = holiday_swaps::propose(
        &mut persistence,
        &settings,
        &cast.requester,
        &ProposeHolidaySwapRequest {
            target_user_id: cast.requester.user_id(),
            off_date: OFF_DATE.to_string(),
            reason: String::new(),
        },
        test_now(),
    );
    assert!(matches!(myself, Err(ApiError::InvalidInput { .. })));

    let unknown = holiday_swaps::propose(
        &mut persistence,
        &settings,
        &cast.requester,
        &ProposeHolidaySwapRequest {
            target_user_id: 999,
            off_date: OFF_DATE.to_string(),
            reason: String::new(),
        },
        test_now(),
    );
    assert!(matches!(unknown, Err(ApiError::ResourceNotFound { .. })));

    let bad_date = holiday_swaps::propose(
        &mut persistence,
        &settings,
        &cast.requester,
        &ProposeHolidaySwapRequest {
            target_user_id: cast.target.user_id(),
            off_date: String::from("10/10/2025"),
            reason: String::new(),
        },
        test_now(),
    );
    assert!(matches!(bad_date, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_only_target_may_answer() {
    let mut persistence = create_test_persistence();
    let cast = setup_cast(&mut persistence);
    let proposed = propose_for(&mut persistence, &cast);

    let by_requester = holiday_swaps::accept(
        &mut persistence,
        &cast.requester,
        proposed.holiday_swap_id,
        test_now(),
    );
    assert!(matches!(by_requester, Err(ApiError::Forbidden { .. })));

    let rejected = holiday_swaps::reject(
        &mut persistence,
        &cast.target,
        proposed.holiday_swap_id,
        test_now(),
    )
    .unwrap()
    .deliver(&mut persistence);
    assert_eq!(rejected.status, "REJECTED");

    let late_accept = holiday_swaps::accept(
        &mut persistence,
        &cast.target,
        proposed.holiday_swap_id,
        test_now(),
    );
    assert!(matches!(late_accept, Err(ApiError::InvalidState { .. })));
}

#[test]
fn test_approval_moves_the_shift() {
    let mut persistence = create_test_persistence();
    let settings = create_test_settings();
    let cast = setup_cast(&mut persistence);
    // Requester works 10:00-18:00 local on the off-date and again the next day.
    let same_day: Schedule = create_test_shift(
        &mut persistence,
        cast.requester.user_id(),
        datetime!(2025-10-10 03:00 UTC),
        datetime!(2025-10-10 11:00 UTC),
        "VOICE",
    );
    let next_day: Schedule = create_test_shift(
        &mut persistence,
        cast.requester.user_id(),
        datetime!(2025-10-11 03:00 UTC),
        datetime!(2025-10-11 11:00 UTC),
        "VOICE",
    );
    let accepted = pending_backoffice(&mut persistence, &cast);
    assert_eq!(accepted.status, "PENDING_BO");

    let outcome = holiday_swaps::approve(
        &mut persistence,
        &settings,
        &cast.supervisor,
        accepted.holiday_swap_id,
        &simple_approval("09:00"),
        datetime!(2025-10-05 02:00 UTC),
    )
    .expect("Approval should succeed");
    assert_eq!(
        recipients(&outcome.notices),
        vec![
            cast.requester.user_id(),
            cast.target.user_id(),
            cast.supervisor.user_id()
        ]
    );
    let approved: HolidaySwapInfo = outcome.deliver(&mut persistence);

    assert_eq!(approved.status, "APPROVED");
    assert_eq!(approved.approved_at.as_deref(), Some("2025-10-05T02:00:00Z"));
    let created_id: i64 = approved.created_schedule_id.expect("Schedule id recorded");
    let created: Schedule = persistence.find_schedule(created_id).unwrap().unwrap();
    assert_eq!(created.user_id, cast.target.user_id());
    assert_eq!(
        created.window,
        TimeWindow::new(
            datetime!(2025-10-10 02:00 UTC),
            datetime!(2025-10-10 10:00 UTC)
        )
        .unwrap()
    );
    assert_eq!(created.channel.as_str(), "VOICE");

    assert!(
        persistence
            .find_schedule(same_day.schedule_id)
            .unwrap()
            .is_none()
    );
    assert!(
        persistence
            .find_schedule(next_day.schedule_id)
            .unwrap()
            .is_some()
    );

    let stored = persistence
        .find_holiday_swap(accepted.holiday_swap_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, HolidaySwapStatus::Approved);
    assert_eq!(stored.created_schedule_id, Some(created_id));
}

#[test]
fn test_approval_accepts_full_form() {
    let mut persistence = create_test_persistence();
    let settings = create_test_settings();
    let cast = setup_cast(&mut persistence);
    let accepted = pending_backoffice(&mut persistence, &cast);

    let approved = holiday_swaps::approve(
        &mut persistence,
        &settings,
        &cast.supervisor,
        accepted.holiday_swap_id,
        &ApproveHolidaySwapRequest {
            start_at: Some(String::from("2025-10-10T13:00:00+07:00")),
            end_at: Some(String::from("2025-10-10T21:00:00+07:00")),
            channel: String::from("SOSMED"),
            shift_name: Some(String::from("Afternoon")),
            ..ApproveHolidaySwapRequest::default()
        },
        test_now(),
    )
    .unwrap()
    .deliver(&mut persistence);

    let created = persistence
        .find_schedule(approved.created_schedule_id.unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(created.window.start(), datetime!(2025-10-10 06:00 UTC));
    assert_eq!(created.window.end(), datetime!(2025-10-10 14:00 UTC));
    assert_eq!(created.shift_name.as_deref(), Some("Afternoon"));
}

#[test]
fn test_approval_requires_backoffice_and_pending_bo() {
    let mut persistence = create_test_persistence();
    let settings = create_test_settings();
    let cast = setup_cast(&mut persistence);
    let proposed = propose_for(&mut persistence, &cast);

    let by_agent = holiday_swaps::approve(
        &mut persistence,
        &settings,
        &cast.target,
        proposed.holiday_swap_id,
        &simple_approval("09:00"),
        test_now(),
    );
    assert!(matches!(by_agent, Err(ApiError::Forbidden { .. })));

    let too_early = holiday_swaps::approve(
        &mut persistence,
        &settings,
        &cast.supervisor,
        proposed.holiday_swap_id,
        &simple_approval("09:00"),
        test_now(),
    );
    assert!(matches!(too_early, Err(ApiError::InvalidState { .. })));
}

#[test]
fn test_approval_start_must_fall_on_off_date() {
    let mut persistence = create_test_persistence();
    let settings = create_test_settings();
    let cast = setup_cast(&mut persistence);
    let accepted = pending_backoffice(&mut persistence, &cast);

    // 17:00 UTC on the 10th is local midnight of the 11th.
    let outside = holiday_swaps::approve(
        &mut persistence,
        &settings,
        &cast.supervisor,
        accepted.holiday_swap_id,
        &ApproveHolidaySwapRequest {
            start_at: Some(String::from("2025-10-10T17:00:00Z")),
            channel: String::from("VOICE"),
            ..ApproveHolidaySwapRequest::default()
        },
        test_now(),
    );
    assert!(matches!(outside, Err(ApiError::InvalidInput { .. })));

    let missing_start = holiday_swaps::approve(
        &mut persistence,
        &settings,
        &cast.supervisor,
        accepted.holiday_swap_id,
        &ApproveHolidaySwapRequest {
            channel: String::from("VOICE"),
            ..ApproveHolidaySwapRequest::default()
        },
        test_now(),
    );
    assert!(matches!(missing_start, Err(ApiError::InvalidInput { .. })));

    let stored = persistence
        .find_holiday_swap(accepted.holiday_swap_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, HolidaySwapStatus::PendingBackoffice);
}

#[test]
fn test_approval_conflict_leaves_everything_in_place() {
    let mut persistence = create_test_persistence();
    let settings = create_test_settings();
    let cast = setup_cast(&mut persistence);
    let requester_shift = create_test_shift(
        &mut persistence,
        cast.requester.user_id(),
        datetime!(2025-10-10 03:00 UTC),
        datetime!(2025-10-10 11:00 UTC),
        "VOICE",
    );
    let accepted = pending_backoffice(&mut persistence, &cast);
    // The target picked up a late shift on the off-date after accepting.
    create_test_shift(
        &mut persistence,
        cast.target.user_id(),
        datetime!(2025-10-10 08:00 UTC),
        datetime!(2025-10-10 12:00 UTC),
        "SOSMED",
    );

    let result = holiday_swaps::approve(
        &mut persistence,
        &settings,
        &cast.supervisor,
        accepted.holiday_swap_id,
        &simple_approval("09:00"),
        test_now(),
    );

    assert!(matches!(result, Err(ApiError::ScheduleConflict { .. })));
    assert!(
        persistence
            .find_schedule(requester_shift.schedule_id)
            .unwrap()
            .is_some()
    );
    let stored = persistence
        .find_holiday_swap(accepted.holiday_swap_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, HolidaySwapStatus::PendingBackoffice);
    assert_eq!(stored.created_schedule_id, None);
}

#[test]
fn test_cancel_by_requester_until_settled() {
    let mut persistence = create_test_persistence();
    let cast = setup_cast(&mut persistence);
    let accepted = pending_backoffice(&mut persistence, &cast);

    let by_target = holiday_swaps::cancel(
        &mut persistence,
        &cast.target,
        accepted.holiday_swap_id,
        test_now(),
    );
    assert!(matches!(by_target, Err(ApiError::Forbidden { .. })));

    let outcome = holiday_swaps::cancel(
        &mut persistence,
        &cast.requester,
        accepted.holiday_swap_id,
        test_now(),
    )
    .unwrap();
    assert_eq!(
        recipients(&outcome.notices),
        vec![cast.requester.user_id(), cast.target.user_id()]
    );
    assert_eq!(outcome.deliver(&mut persistence).status, "CANCELLED");

    let again = holiday_swaps::cancel(
        &mut persistence,
        &cast.requester,
        accepted.holiday_swap_id,
        test_now(),
    );
    assert!(matches!(again, Err(ApiError::InvalidState { .. })));
}

#[test]
fn test_list_shows_parties_and_backoffice() {
    let mut persistence = create_test_persistence();
    let cast = setup_cast(&mut persistence);
    let outsider = create_test_agent(&mut persistence, "Rudi Hartono");
    propose_for(&mut persistence, &cast);

    let for_target = holiday_swaps::list(&mut persistence, &cast.target, 1, 20).unwrap();
    assert_eq!(for_target.total, 1);
    assert_eq!(for_target.items[0].requester_name, "Budi Santoso");

    let for_outsider = holiday_swaps::list(&mut persistence, &outsider, 1, 20).unwrap();
    assert_eq!(for_outsider.total, 0);
    assert!(for_outsider.items.is_empty());

    let for_supervisor = holiday_swaps::list(&mut persistence, &cast.supervisor, 1, 501).unwrap();
    assert_eq!(for_supervisor.total, 1);
    assert_eq!(for_supervisor.size, 20);
}
