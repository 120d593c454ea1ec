// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Shiftdesk scheduling backoffice.
//!
//! This crate stores users, schedules, swap requests, holiday swaps, and
//! notifications in `SQLite` through Diesel.
//!
//! ## Transactions
//!
//! Every rule that needs a read before a write (no overlapping schedules,
//! ownership of exchanged schedules, request status) is evaluated inside
//! the same `BEGIN IMMEDIATE` transaction as the write. `Persistence::transaction`
//! hands callers a [`Tx`] so that multi-step workflows (accepting a swap,
//! approving a holiday swap) commit or roll back as one unit.
//!
//! ## Testing Philosophy
//!
//! - Tests run against isolated shared-cache in-memory databases
//! - Migrations are embedded and applied on every connection
//! - Foreign key enforcement is verified at startup

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

use diesel::SqliteConnection;
use shiftdesk_domain::{
    Channel, DomainError, HolidaySwap, LookupTier, Notification, RefType, RoleName, Schedule,
    ScheduleDraft, SwapRequest, TimeWindow, User, validate_ownership_exchange,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::info;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use queries::{DEFAULT_PAGE_SIZE, PageRequest};

/// Persistence adapter owning a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

/// Type alias kept for callers that name the backend explicitly.
pub type SqlitePersistence = Persistence;

/// Separates caller errors from database errors raised while a
/// transaction is open.
enum TxAbort<E> {
    Caller(E),
    Database(diesel::result::Error),
}

impl<E> From<diesel::result::Error> for TxAbort<E> {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err)
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_shiftdesk_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Runs `f` inside one immediate transaction.
    ///
    /// The transaction commits if `f` returns `Ok` and rolls back otherwise.
    /// Database failures are converted into the caller's error type.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or a converted database error.
    pub fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Tx<'_>) -> Result<T, E>,
        E: From<PersistenceError>,
    {
        self.conn
            .immediate_transaction::<T, TxAbort<E>, _>(|conn| {
                let mut tx: Tx<'_> = Tx { conn };
                f(&mut tx).map_err(TxAbort::Caller)
            })
            .map_err(|abort| match abort {
                TxAbort::Caller(err) => err,
                TxAbort::Database(err) => E::from(PersistenceError::from(err)),
            })
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a user, rejecting duplicate emails.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(DuplicateEmail)` if the email is taken, or a
    /// database error.
    pub fn create_user(
        &mut self,
        full_name: &str,
        email: &str,
        roles: &[RoleName],
        now: OffsetDateTime,
    ) -> Result<User, PersistenceError> {
        self.transaction(|tx| tx.create_user(full_name, email, roles, now))
    }

    /// Retrieves a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_user(&mut self, user_id: i64) -> Result<Option<User>, PersistenceError> {
        queries::users::find_user(&mut self.conn, user_id)
    }

    /// Counts every user in the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    /// Lists every user ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_users(&mut self) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    /// Lists the ids of active backoffice users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn backoffice_user_ids(&mut self) -> Result<Vec<i64>, PersistenceError> {
        queries::users::backoffice_user_ids(&mut self.conn)
    }

    /// Looks up display names for a set of users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn user_names(&mut self, user_ids: &[i64]) -> Result<Vec<(i64, String)>, PersistenceError> {
        queries::users::user_names(&mut self.conn, user_ids)
    }

    // ========================================================================
    // Schedules
    // ========================================================================

    /// Creates a schedule unless the owner already has an overlapping one.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(ScheduleOverlap)` on conflict, or a database error.
    pub fn create_schedule(
        &mut self,
        draft: &ScheduleDraft,
        now: OffsetDateTime,
    ) -> Result<Schedule, PersistenceError> {
        self.transaction(|tx| tx.create_schedule(draft, now))
    }

    /// Replaces a schedule's contents, checking overlap against the owner's
    /// other schedules.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(ScheduleNotFound)` if absent,
    /// `DomainViolation(ScheduleOverlap)` on conflict, or a database error.
    pub fn update_schedule(
        &mut self,
        schedule_id: i64,
        draft: &ScheduleDraft,
        now: OffsetDateTime,
    ) -> Result<Schedule, PersistenceError> {
        self.transaction(|tx| tx.update_schedule(schedule_id, draft, now))
    }

    /// Deletes a schedule. Deleting an absent schedule succeeds.
    ///
    /// # Returns
    ///
    /// Whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_schedule(&mut self, schedule_id: i64) -> Result<bool, PersistenceError> {
        let removed: usize = mutations::schedules::delete_schedule(&mut self.conn, schedule_id)?;
        if removed > 0 {
            info!(schedule_id, "Deleted schedule");
        }
        Ok(removed > 0)
    }

    /// Retrieves a schedule by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_schedule(&mut self, schedule_id: i64) -> Result<Option<Schedule>, PersistenceError> {
        queries::schedules::find_schedule(&mut self.conn, schedule_id)
    }

    /// Returns whether the user holds a schedule overlapping the window.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn exists_overlap(
        &mut self,
        user_id: i64,
        window: &TimeWindow,
        exclude_id: Option<i64>,
    ) -> Result<bool, PersistenceError> {
        queries::schedules::exists_overlap(&mut self.conn, user_id, window, exclude_id)
    }

    /// Returns the earliest schedule of the user intersecting the window.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_overlapping(
        &mut self,
        user_id: i64,
        window: &TimeWindow,
    ) -> Result<Option<Schedule>, PersistenceError> {
        queries::schedules::find_overlapping(&mut self.conn, user_id, window)
    }

    /// Returns the user's schedule with exactly this window.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_exact_window(
        &mut self,
        user_id: i64,
        window: &TimeWindow,
    ) -> Result<Option<Schedule>, PersistenceError> {
        queries::schedules::find_exact_window(&mut self.conn, user_id, window)
    }

    /// Locates a requester's schedule by overlap, exact window, then same day.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn locate_shift(
        &mut self,
        user_id: i64,
        window: &TimeWindow,
        day: &TimeWindow,
    ) -> Result<Option<(Schedule, LookupTier)>, PersistenceError> {
        queries::schedules::locate_shift(&mut self.conn, user_id, window, day)
    }

    /// Lists schedules intersecting a range, optionally for one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_schedules(
        &mut self,
        user_id: Option<i64>,
        range: &TimeWindow,
    ) -> Result<Vec<Schedule>, PersistenceError> {
        queries::schedules::list_intersecting(&mut self.conn, user_id, range)
    }

    /// Lists schedules on a channel overlapping the window.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_on_channel(
        &mut self,
        channel: Channel,
        window: &TimeWindow,
    ) -> Result<Vec<Schedule>, PersistenceError> {
        queries::schedules::list_on_channel(&mut self.conn, channel, window)
    }

    /// Exchanges the owners of two schedules atomically.
    ///
    /// # Errors
    ///
    /// See [`Tx::swap_schedules`].
    pub fn swap_schedules(
        &mut self,
        first_schedule_id: i64,
        second_schedule_id: i64,
        first_owner: i64,
        second_owner: i64,
        now: OffsetDateTime,
    ) -> Result<(Schedule, Schedule), PersistenceError> {
        self.transaction(|tx| {
            tx.swap_schedules(
                first_schedule_id,
                second_schedule_id,
                first_owner,
                second_owner,
                now,
            )
        })
    }

    /// Deletes every schedule of a user starting inside the range.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn clear_schedules_starting_within(
        &mut self,
        user_id: i64,
        range: &TimeWindow,
    ) -> Result<usize, PersistenceError> {
        self.transaction(|tx| tx.delete_schedules_starting_within(user_id, range))
    }

    // ========================================================================
    // Swap requests
    // ========================================================================

    /// Stores a new swap request and returns it with its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub fn create_swap_request(
        &mut self,
        request: &SwapRequest,
    ) -> Result<SwapRequest, PersistenceError> {
        self.transaction(|tx| tx.insert_swap_request(request))
    }

    /// Retrieves a swap request by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_swap_request(
        &mut self,
        swap_id: i64,
    ) -> Result<Option<SwapRequest>, PersistenceError> {
        queries::swap_requests::find_swap_request(&mut self.conn, swap_id)
    }

    /// Lists swap requests newest first, optionally filtered to one viewer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_swap_requests(
        &mut self,
        page: PageRequest,
        viewer: Option<i64>,
    ) -> Result<(Vec<SwapRequest>, i64), PersistenceError> {
        queries::swap_requests::list_swap_requests(&mut self.conn, page, viewer)
    }

    // ========================================================================
    // Holiday swaps
    // ========================================================================

    /// Stores a new holiday swap and returns it with its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub fn create_holiday_swap(
        &mut self,
        request: &HolidaySwap,
    ) -> Result<HolidaySwap, PersistenceError> {
        self.transaction(|tx| tx.insert_holiday_swap(request))
    }

    /// Retrieves a holiday swap by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_holiday_swap(
        &mut self,
        holiday_swap_id: i64,
    ) -> Result<Option<HolidaySwap>, PersistenceError> {
        queries::holiday_swaps::find_holiday_swap(&mut self.conn, holiday_swap_id)
    }

    /// Lists holiday swaps newest first, optionally filtered to one viewer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_holiday_swaps(
        &mut self,
        page: PageRequest,
        viewer: Option<i64>,
    ) -> Result<(Vec<HolidaySwap>, i64), PersistenceError> {
        queries::holiday_swaps::list_holiday_swaps(&mut self.conn, page, viewer)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Stores an unread notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub fn create_notification(
        &mut self,
        user_id: i64,
        title: &str,
        body: &str,
        ref_type: RefType,
        ref_id: Option<i64>,
        now: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::notifications::insert_notification(
            &mut self.conn,
            user_id,
            title,
            body,
            ref_type,
            ref_id,
            now,
        )
    }

    /// Lists a user's notifications newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_notifications(
        &mut self,
        user_id: i64,
        unread_only: bool,
        limit: i64,
    ) -> Result<Vec<Notification>, PersistenceError> {
        queries::notifications::list_notifications(&mut self.conn, user_id, unread_only, limit)
    }

    /// Marks one of a user's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(NotificationNotFound)` if the notification
    /// does not exist or belongs to someone else.
    pub fn mark_notification_read(
        &mut self,
        notification_id: i64,
        user_id: i64,
    ) -> Result<(), PersistenceError> {
        let updated: usize = mutations::notifications::mark_read(&mut self.conn, notification_id, user_id)?;
        if updated == 0 {
            return Err(DomainError::NotificationNotFound(notification_id).into());
        }
        Ok(())
    }
}

/// A handle to an open transaction.
///
/// Every method runs on the transaction's connection; nothing is visible to
/// other connections until the enclosing `Persistence::transaction` commits.
pub struct Tx<'c> {
    conn: &'c mut SqliteConnection,
}

impl Tx<'_> {
    /// Counts every user in the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(self.conn)
    }

    /// Retrieves a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_user(&mut self, user_id: i64) -> Result<Option<User>, PersistenceError> {
        queries::users::find_user(self.conn, user_id)
    }

    /// Creates a user, rejecting duplicate emails.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(DuplicateEmail)` if the email is taken.
    pub fn create_user(
        &mut self,
        full_name: &str,
        email: &str,
        roles: &[RoleName],
        now: OffsetDateTime,
    ) -> Result<User, PersistenceError> {
        if queries::users::email_exists(self.conn, email)? {
            return Err(DomainError::DuplicateEmail(email.to_string()).into());
        }
        let user_id: i64 = mutations::users::insert_user(self.conn, full_name, email, roles, now)?;
        queries::users::find_user(self.conn, user_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("user {user_id} after insert")))
    }

    /// Retrieves a schedule that must exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(ScheduleNotFound)` if absent.
    pub fn schedule(&mut self, schedule_id: i64) -> Result<Schedule, PersistenceError> {
        queries::schedules::find_schedule(self.conn, schedule_id)?
            .ok_or_else(|| DomainError::ScheduleNotFound(schedule_id).into())
    }

    /// Returns whether the user holds a schedule overlapping the window.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn exists_overlap(
        &mut self,
        user_id: i64,
        window: &TimeWindow,
        exclude_id: Option<i64>,
    ) -> Result<bool, PersistenceError> {
        queries::schedules::exists_overlap(self.conn, user_id, window, exclude_id)
    }

    /// Locates a requester's schedule by overlap, exact window, then same day.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn locate_shift(
        &mut self,
        user_id: i64,
        window: &TimeWindow,
        day: &TimeWindow,
    ) -> Result<Option<(Schedule, LookupTier)>, PersistenceError> {
        queries::schedules::locate_shift(self.conn, user_id, window, day)
    }

    /// Creates a schedule unless the owner already has an overlapping one.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(ScheduleOverlap)` on conflict.
    pub fn create_schedule(
        &mut self,
        draft: &ScheduleDraft,
        now: OffsetDateTime,
    ) -> Result<Schedule, PersistenceError> {
        self.ensure_free(draft.user_id, &draft.window, None)?;
        mutations::schedules::insert_schedule(self.conn, draft, now)
    }

    /// Replaces a schedule's contents.
    ///
    /// The overlap check excludes the schedule itself.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(ScheduleNotFound)` if absent or
    /// `DomainViolation(ScheduleOverlap)` on conflict.
    pub fn update_schedule(
        &mut self,
        schedule_id: i64,
        draft: &ScheduleDraft,
        now: OffsetDateTime,
    ) -> Result<Schedule, PersistenceError> {
        self.schedule(schedule_id)?;
        self.ensure_free(draft.user_id, &draft.window, Some(schedule_id))?;
        mutations::schedules::update_schedule(self.conn, schedule_id, draft, now)?;
        info!(schedule_id, user_id = draft.user_id, "Updated schedule");
        Ok(Schedule {
            schedule_id,
            user_id: draft.user_id,
            window: draft.window,
            channel: draft.channel,
            shift_name: draft.shift_name.clone(),
            notes: draft.notes.clone(),
        })
    }

    /// Exchanges the owners of two schedules.
    ///
    /// Preconditions are checked before any write:
    /// 1. `first` is owned by `first_owner`
    /// 2. `second` is owned by `second_owner`
    /// 3. the two windows differ
    /// 4. each new owner is free at the window they receive, ignoring the
    ///    schedule they hand over
    ///
    /// # Returns
    ///
    /// Both schedules with their new owners, in argument order.
    ///
    /// # Errors
    ///
    /// - `DomainViolation(ScheduleNotFound)` if either schedule is absent
    /// - `DomainViolation(OwnershipMismatch)` for a failed ownership check
    /// - `DomainViolation(IdenticalWindows)` if the windows are equal
    /// - `DomainViolation(ScheduleOverlap)` if a new owner would double-book
    pub fn swap_schedules(
        &mut self,
        first_schedule_id: i64,
        second_schedule_id: i64,
        first_owner: i64,
        second_owner: i64,
        now: OffsetDateTime,
    ) -> Result<(Schedule, Schedule), PersistenceError> {
        let first: Schedule = self.schedule(first_schedule_id)?;
        let second: Schedule = self.schedule(second_schedule_id)?;
        validate_ownership_exchange(&first, &second, first_owner, second_owner)?;

        self.ensure_free(first_owner, &second.window, Some(first.schedule_id))?;
        self.ensure_free(second_owner, &first.window, Some(second.schedule_id))?;

        mutations::schedules::reassign_owner(self.conn, first.schedule_id, second_owner, now)?;
        mutations::schedules::reassign_owner(self.conn, second.schedule_id, first_owner, now)?;
        info!(
            first_schedule_id,
            second_schedule_id, first_owner, second_owner, "Exchanged schedule owners"
        );

        Ok((
            Schedule {
                user_id: second_owner,
                ..first
            },
            Schedule {
                user_id: first_owner,
                ..second
            },
        ))
    }

    /// Deletes every schedule of a user intersecting the range.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_schedules_intersecting(
        &mut self,
        user_id: i64,
        range: &TimeWindow,
    ) -> Result<usize, PersistenceError> {
        let removed: usize = mutations::schedules::delete_intersecting(self.conn, user_id, range)?;
        info!(user_id, removed, "Cleared schedules intersecting range");
        Ok(removed)
    }

    /// Deletes every schedule of a user starting inside the range.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_schedules_starting_within(
        &mut self,
        user_id: i64,
        range: &TimeWindow,
    ) -> Result<usize, PersistenceError> {
        let removed: usize = mutations::schedules::delete_starting_within(self.conn, user_id, range)?;
        info!(user_id, removed, "Cleared schedules starting within range");
        Ok(removed)
    }

    /// Retrieves a swap request that must exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(SwapRequestNotFound)` if absent.
    pub fn swap_request(&mut self, swap_id: i64) -> Result<SwapRequest, PersistenceError> {
        queries::swap_requests::find_swap_request(self.conn, swap_id)?
            .ok_or_else(|| DomainError::SwapRequestNotFound(swap_id).into())
    }

    /// Stores a new swap request and returns it with its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub fn insert_swap_request(
        &mut self,
        request: &SwapRequest,
    ) -> Result<SwapRequest, PersistenceError> {
        let swap_id: i64 = mutations::swap_requests::insert_swap_request(self.conn, request)?;
        Ok(SwapRequest {
            swap_id: Some(swap_id),
            ..request.clone()
        })
    }

    /// Writes back the mutable fields of a stored swap request.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(SwapRequestNotFound)` if the request has no
    /// id or no longer exists.
    pub fn save_swap_request(&mut self, request: &SwapRequest) -> Result<(), PersistenceError> {
        let swap_id: i64 = request.swap_id.unwrap_or_default();
        let updated: usize = mutations::swap_requests::update_swap_status(self.conn, swap_id, request)?;
        if updated == 0 {
            return Err(DomainError::SwapRequestNotFound(swap_id).into());
        }
        info!(swap_id, status = %request.status, "Updated swap request");
        Ok(())
    }

    /// Retrieves a holiday swap that must exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(HolidaySwapNotFound)` if absent.
    pub fn holiday_swap(&mut self, holiday_swap_id: i64) -> Result<HolidaySwap, PersistenceError> {
        queries::holiday_swaps::find_holiday_swap(self.conn, holiday_swap_id)?
            .ok_or_else(|| DomainError::HolidaySwapNotFound(holiday_swap_id).into())
    }

    /// Stores a new holiday swap and returns it with its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub fn insert_holiday_swap(
        &mut self,
        request: &HolidaySwap,
    ) -> Result<HolidaySwap, PersistenceError> {
        let holiday_swap_id: i64 = mutations::holiday_swaps::insert_holiday_swap(self.conn, request)?;
        Ok(HolidaySwap {
            holiday_swap_id: Some(holiday_swap_id),
            ..request.clone()
        })
    }

    /// Writes back the mutable fields of a stored holiday swap.
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation(HolidaySwapNotFound)` if the request has no
    /// id or no longer exists.
    pub fn save_holiday_swap(&mut self, request: &HolidaySwap) -> Result<(), PersistenceError> {
        let holiday_swap_id: i64 = request.holiday_swap_id.unwrap_or_default();
        let updated: usize =
            mutations::holiday_swaps::update_holiday_swap_status(self.conn, holiday_swap_id, request)?;
        if updated == 0 {
            return Err(DomainError::HolidaySwapNotFound(holiday_swap_id).into());
        }
        info!(holiday_swap_id, status = %request.status, "Updated holiday swap");
        Ok(())
    }

    fn ensure_free(
        &mut self,
        user_id: i64,
        window: &TimeWindow,
        exclude_id: Option<i64>,
    ) -> Result<(), PersistenceError> {
        if queries::schedules::exists_overlap(self.conn, user_id, window, exclude_id)? {
            return Err(DomainError::ScheduleOverlap {
                user_id,
                start: window.start(),
                end: window.end(),
            }
            .into());
        }
        Ok(())
    }
}
