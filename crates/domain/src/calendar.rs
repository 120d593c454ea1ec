// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local-calendar arithmetic for the site time zone.
//!
//! Instants are stored and compared in UTC. Every notion of "day" or
//! "month" (off-dates, same-day lookups, monthly listings) is evaluated in
//! the single site time zone configured at startup.
//!
//! ## Invariants
//!
//! - A local day is `[local midnight, next local midnight)`, which is not
//!   always 24 hours long across DST changes
//! - Wall-clock times that do not exist or are ambiguous are rejected
//!   rather than guessed

use crate::error::DomainError;
use crate::schedule::TimeWindow;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime, Time};

/// Site time zone used when none is configured.
pub const DEFAULT_SITE_TIMEZONE: &str = "Asia/Jakarta";

/// A calendar month, e.g. `2026-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    /// Creates a calendar month.
    #[must_use]
    pub const fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// Parses a `YYYY-MM` string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMonth` if the value is malformed.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidMonth(value.to_string());
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month: Month = Month::try_from(month).map_err(|_| invalid())?;
        Ok(Self { year, month })
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Returns the first date of the month.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is out of the supported range.
    pub fn first_day(&self) -> Result<Date, DomainError> {
        Date::from_calendar_date(self.year, self.month, 1)
            .map_err(|_| DomainError::InvalidMonth(self.to_string()))
    }

    /// Returns every date of the month in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is out of the supported range.
    pub fn days(&self) -> Result<Vec<Date>, DomainError> {
        let mut days: Vec<Date> = Vec::with_capacity(31);
        let mut current: Option<Date> = Some(self.first_day()?);
        while let Some(day) = current.filter(|d| d.month() == self.month) {
            days.push(day);
            current = day.next_day();
        }
        Ok(days)
    }

    /// Returns the following month.
    #[must_use]
    pub fn next(&self) -> Self {
        if self.month == Month::December {
            Self::new(self.year + 1, Month::January)
        } else {
            Self::new(self.year, self.month.next())
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

/// Day and month arithmetic in the site time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteCalendar {
    tz: Tz,
}

impl SiteCalendar {
    /// Creates a calendar for an IANA time zone name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is unknown.
    pub fn new(timezone: &str) -> Result<Self, DomainError> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;
        Ok(Self { tz })
    }

    /// Creates a calendar from an already-parsed time zone.
    #[must_use]
    pub const fn from_tz(tz: Tz) -> Self {
        Self { tz }
    }

    /// Returns the site time zone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    /// Returns the local calendar date an instant falls on.
    ///
    /// # Errors
    ///
    /// Returns an error if the instant is outside the representable range.
    pub fn local_date(&self, instant: OffsetDateTime) -> Result<Date, DomainError> {
        let local: DateTime<Tz> = self.to_local(instant)?;
        from_naive_date(local.date_naive())
    }

    /// Returns `[local midnight, next local midnight)` for a date.
    ///
    /// # Errors
    ///
    /// Returns an error if midnight does not exist in the site time zone.
    pub fn day_bounds(&self, date: Date) -> Result<TimeWindow, DomainError> {
        let next: Date = date.next_day().ok_or_else(|| DomainError::InvalidDate(date.to_string()))?;
        TimeWindow::new(self.midnight(date)?, self.midnight(next)?)
    }

    /// Returns the local day containing an instant.
    ///
    /// # Errors
    ///
    /// Returns an error if the day bounds cannot be resolved.
    pub fn day_of(&self, instant: OffsetDateTime) -> Result<TimeWindow, DomainError> {
        self.day_bounds(self.local_date(instant)?)
    }

    /// Returns `[first local midnight, first local midnight of next month)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds cannot be resolved.
    pub fn month_bounds(&self, month: YearMonth) -> Result<TimeWindow, DomainError> {
        TimeWindow::new(
            self.midnight(month.first_day()?)?,
            self.midnight(month.next().first_day()?)?,
        )
    }

    /// Resolves a wall-clock time on a local date to an instant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnresolvableLocalTime` if the wall-clock time is
    /// ambiguous or does not exist on that date.
    pub fn at_clock_time(&self, date: Date, clock: Time) -> Result<OffsetDateTime, DomainError> {
        let naive_time: NaiveTime = NaiveTime::from_hms_opt(
            u32::from(clock.hour()),
            u32::from(clock.minute()),
            u32::from(clock.second()),
        )
        .ok_or_else(|| DomainError::InvalidClockTime(clock.to_string()))?;
        let naive_date: NaiveDate = to_naive_date(date)?;

        let local: DateTime<Tz> = self
            .tz
            .from_local_datetime(&naive_date.and_time(naive_time))
            .single()
            .ok_or_else(|| DomainError::UnresolvableLocalTime {
                reason: format!(
                    "{date} {clock} is ambiguous or non-existent in {}",
                    self.tz.name()
                ),
            })?;
        from_chrono(&local)
    }

    /// Formats an instant as local `dd Mon yy HH:MM` for message bodies.
    #[must_use]
    pub fn format_local(&self, instant: OffsetDateTime) -> String {
        self.to_local(instant).map_or_else(
            |_| instant.to_string(),
            |local| local.format("%d %b %y %H:%M").to_string(),
        )
    }

    fn midnight(&self, date: Date) -> Result<OffsetDateTime, DomainError> {
        let naive: NaiveDateTime = to_naive_date(date)?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| DomainError::InvalidDate(date.to_string()))?;
        let local: DateTime<Tz> = self
            .tz
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| DomainError::UnresolvableLocalTime {
                reason: format!("midnight of {date} does not exist in {}", self.tz.name()),
            })?;
        from_chrono(&local)
    }

    fn to_local(&self, instant: OffsetDateTime) -> Result<DateTime<Tz>, DomainError> {
        let utc: DateTime<Utc> = DateTime::<Utc>::from_timestamp(instant.unix_timestamp(), 0)
            .ok_or_else(|| DomainError::InvalidTimestamp {
                value: instant.to_string(),
                error: String::from("outside the supported range"),
            })?;
        Ok(utc.with_timezone(&self.tz))
    }
}

fn to_naive_date(date: Date) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_ymd_opt(
        date.year(),
        u32::from(u8::from(date.month())),
        u32::from(date.day()),
    )
    .ok_or_else(|| DomainError::InvalidDate(date.to_string()))
}

fn from_naive_date(date: NaiveDate) -> Result<Date, DomainError> {
    let invalid = || DomainError::InvalidDate(date.to_string());
    let month: u8 = u8::try_from(date.month()).map_err(|_| invalid())?;
    let day: u8 = u8::try_from(date.day()).map_err(|_| invalid())?;
    let month: Month = Month::try_from(month).map_err(|_| invalid())?;
    Date::from_calendar_date(date.year(), month, day).map_err(|_| invalid())
}

fn from_chrono(local: &DateTime<Tz>) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::from_unix_timestamp(local.timestamp()).map_err(|e| {
        DomainError::InvalidTimestamp {
            value: local.to_rfc3339(),
            error: e.to_string(),
        }
    })
}
