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

mod announcement;
mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use announcement::{Announcement, Audience};
pub use apply::{apply_holiday_swap, apply_swap, propose_holiday_swap, propose_swap};
pub use command::{HolidaySwapCommand, HolidaySwapProposal, SwapCommand, SwapProposal};
pub use error::CoreError;
pub use state::{HolidaySwapTransition, SwapTransition};
