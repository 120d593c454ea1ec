// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Each function performs one write and no rule checking. Rules that need
//! a read before the write (overlap, ownership, status) are composed in
//! `Tx` so that read and write share one transaction.

pub mod holiday_swaps;
pub mod notifications;
pub mod schedules;
pub mod swap_requests;
pub mod users;
