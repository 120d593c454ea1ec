// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

mod calendar;
mod error;
mod holiday_swap;
mod schedule;
mod swap_request;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use calendar::{DEFAULT_SITE_TIMEZONE, SiteCalendar, YearMonth};
pub use error::DomainError;
pub use holiday_swap::{HolidaySwap, HolidaySwapStatus};
pub use schedule::{
    LookupTier, SHIFT_LENGTH, Schedule, ScheduleDraft, TimeWindow, validate_ownership_exchange,
};
pub use swap_request::{DeliveryMode, SwapRequest, SwapStatus};
pub use types::{Channel, Notification, RefType, RoleName, User, display_name};
pub use validation::{
    format_date, parse_clock_time, parse_date, parse_timestamp, require_user_id,
    validate_user_fields,
};
