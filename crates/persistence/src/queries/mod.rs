// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! All queries use Diesel DSL. Each returns `Ok(None)` (or an empty list)
//! for absent records; callers decide whether absence is an error.

pub mod holiday_swaps;
pub mod notifications;
pub mod schedules;
pub mod swap_requests;
pub mod users;

/// Default page size for request listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// A clamped page of a newest-first listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
}

impl PageRequest {
    /// Clamps a requested page.
    ///
    /// Pages below 1 become 1. Sizes outside `1..=max_size` fall back to
    /// `DEFAULT_PAGE_SIZE`.
    #[must_use]
    pub const fn new(page: i64, size: i64, max_size: i64) -> Self {
        let page: i64 = if page < 1 { 1 } else { page };
        let size: i64 = if size < 1 || size > max_size {
            DEFAULT_PAGE_SIZE
        } else {
            size
        };
        Self { page, size }
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(&self) -> i64 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(&self) -> i64 {
        self.size
    }

    /// Returns the number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }
}
