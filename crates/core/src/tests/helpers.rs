// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{HolidaySwapProposal, SwapProposal};
use shiftdesk_domain::{HolidaySwap, HolidaySwapStatus, SwapRequest, SwapStatus, TimeWindow};
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub const REQUESTER: i64 = 5;
pub const TARGET: i64 = 7;
pub const OUTSIDER: i64 = 9;

pub fn now() -> OffsetDateTime {
    datetime!(2026-03-01 08:00 UTC)
}

pub fn create_test_proposal(target_user_id: Option<i64>) -> SwapProposal {
    SwapProposal {
        requester_id: REQUESTER,
        start: datetime!(2026-03-02 19:00 +7),
        reason: String::from("  family event "),
        target_user_id,
    }
}

pub fn create_test_swap(status: SwapStatus, target_user_id: Option<i64>) -> SwapRequest {
    SwapRequest {
        swap_id: Some(11),
        requester_id: REQUESTER,
        window: TimeWindow::shift_from(datetime!(2026-03-02 19:00 +7)).unwrap(),
        reason: String::from("family event"),
        status,
        counterparty_id: None,
        target_user_id,
        approved_at: None,
        created_at: now(),
    }
}

pub fn create_test_holiday_proposal() -> HolidaySwapProposal {
    HolidaySwapProposal {
        requester_id: REQUESTER,
        target_user_id: TARGET,
        off_date: date!(2026 - 03 - 10),
        reason: String::from("wedding"),
    }
}

pub fn create_test_holiday_swap(status: HolidaySwapStatus) -> HolidaySwap {
    HolidaySwap {
        holiday_swap_id: Some(21),
        requester_id: REQUESTER,
        target_user_id: TARGET,
        off_date: date!(2026 - 03 - 10),
        reason: String::from("wedding"),
        status,
        approved_at: None,
        created_schedule_id: None,
        created_at: now(),
    }
}
