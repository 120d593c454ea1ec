// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::announcement::Announcement;
use shiftdesk_domain::{HolidaySwap, SwapRequest};

/// The result of a successful swap request transition.
///
/// Transitions are atomic: either the full result is produced or an error is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapTransition {
    /// The request after the transition.
    pub request: SwapRequest,
    /// Who must be told about it.
    pub announcement: Announcement,
}

/// The result of a successful holiday swap transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidaySwapTransition {
    /// The request after the transition.
    pub request: HolidaySwap,
    /// Who must be told about it.
    pub announcement: Announcement,
}

impl HolidaySwapTransition {
    /// Records the schedule created for the target during approval.
    #[must_use]
    pub const fn with_created_schedule(mut self, schedule_id: i64) -> Self {
        self.request.created_schedule_id = Some(schedule_id);
        self
    }
}
