// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, RoleName, format_date, parse_clock_time, parse_date, parse_timestamp,
    require_user_id, validate_user_fields,
};
use time::macros::{date, datetime, time};

#[test]
fn test_parse_timestamp_accepts_offsets() {
    assert_eq!(
        parse_timestamp("2026-03-02T19:00:00+07:00").unwrap(),
        datetime!(2026-03-02 12:00 UTC)
    );
    assert_eq!(
        parse_timestamp("2026-03-02T12:00:00Z").unwrap(),
        datetime!(2026-03-02 12:00 UTC)
    );
}

#[test]
fn test_parse_timestamp_drops_fractional_seconds() {
    assert_eq!(
        parse_timestamp("2026-03-02T19:00:00.75+07:00").unwrap(),
        datetime!(2026-03-02 12:00 UTC)
    );
}

#[test]
fn test_parse_timestamp_rejects_naive_values() {
    assert!(matches!(
        parse_timestamp("2026-03-02 19:00"),
        Err(DomainError::InvalidTimestamp { .. })
    ));
}

#[test]
fn test_parse_clock_time() {
    assert_eq!(parse_clock_time("07:30").unwrap(), time!(07:30));
    assert_eq!(
        parse_clock_time("25:00"),
        Err(DomainError::InvalidClockTime(String::from("25:00")))
    );
}

#[test]
fn test_parse_and_format_date() {
    let parsed = parse_date("2026-03-10").unwrap();
    assert_eq!(parsed, date!(2026 - 03 - 10));
    assert_eq!(format_date(parsed), "2026-03-10");
    assert_eq!(
        parse_date("10/03/2026"),
        Err(DomainError::InvalidDate(String::from("10/03/2026")))
    );
}

#[test]
fn test_require_user_id_rejects_zero() {
    assert_eq!(require_user_id(5, "requester_id"), Ok(5));
    assert_eq!(
        require_user_id(0, "requester_id"),
        Err(DomainError::MissingUserId {
            field: "requester_id"
        })
    );
}

#[test]
fn test_validate_user_fields_normalizes_email() {
    let email: String =
        validate_user_fields("Sari", " Sari@Example.COM ", &[RoleName::Agent]).unwrap();
    assert_eq!(email, "sari@example.com");
}

#[test]
fn test_validate_user_fields_rejects_bad_input() {
    assert!(matches!(
        validate_user_fields("", "a@b.co", &[RoleName::Agent]),
        Err(DomainError::InvalidName(_))
    ));
    assert!(matches!(
        validate_user_fields("Sari", "not-an-email", &[RoleName::Agent]),
        Err(DomainError::InvalidEmail(_))
    ));
    assert_eq!(
        validate_user_fields("Sari", "sari@example.com", &[]),
        Err(DomainError::NoRolesAssigned)
    );
}
