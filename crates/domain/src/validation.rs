// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::RoleName;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};

/// Parses an RFC 3339 timestamp such as `2026-03-02T19:00:00+07:00`.
///
/// Fractional seconds are dropped; the store keeps whole seconds.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` if the value does not parse.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    let invalid = |e: &dyn std::fmt::Display| DomainError::InvalidTimestamp {
        value: value.to_string(),
        error: e.to_string(),
    };
    OffsetDateTime::parse(value.trim(), &Rfc3339)
        .map_err(|e| invalid(&e))?
        .replace_nanosecond(0)
        .map_err(|e| invalid(&e))
}

/// Parses a 24-hour wall-clock time in `HH:mm` form.
///
/// # Errors
///
/// Returns `DomainError::InvalidClockTime` if the value does not parse.
pub fn parse_clock_time(value: &str) -> Result<Time, DomainError> {
    Time::parse(value.trim(), format_description!("[hour]:[minute]"))
        .map_err(|_| DomainError::InvalidClockTime(value.to_string()))
}

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the value does not parse.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| DomainError::InvalidDate(value.to_string()))
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Rejects a zero (unset) user id.
///
/// # Errors
///
/// Returns `DomainError::MissingUserId` naming the field.
pub const fn require_user_id(user_id: i64, field: &'static str) -> Result<i64, DomainError> {
    if user_id == 0 {
        return Err(DomainError::MissingUserId { field });
    }
    Ok(user_id)
}

/// Validates the fields of a new directory user.
///
/// # Returns
///
/// The email normalized to lowercase.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The email is empty or lacks an `@` between non-empty parts
/// - No role is given
pub fn validate_user_fields(
    full_name: &str,
    email: &str,
    roles: &[RoleName],
) -> Result<String, DomainError> {
    if full_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    let normalized: String = email.trim().to_lowercase();
    let well_formed: bool = normalized
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        return Err(DomainError::InvalidEmail(email.to_string()));
    }

    if roles.is_empty() {
        return Err(DomainError::NoRolesAssigned);
    }

    Ok(normalized)
}
