//! Field and collection validators for the quoting wizard.
//!
//! Every validator is a pure function over its input: no side effects, no
//! clocks (callers pass `today` where age matters), and failures are returned
//! as values rather than raised. The wizard steps re-run them synchronously on
//! every settled field change.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Input format accepted for dates of birth.
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Ages beyond this bound imply an implausible birth date.
const MAX_AGE_YEARS: i32 = 120;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+254\d{9,12}$").expect("valid phone pattern"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

/// Reason codes attached to validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Required,
    WhitespaceOnly,
    EmailInvalid,
    FormatInvalid,
    NameIncomplete,
    DobInvalid,
    BelowMinimum,
    DuplicateTraveler,
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub code: ErrorCode,
    pub message: String,
}

impl FieldError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub type FieldResult = Result<(), FieldError>;

/// Fails with [`ErrorCode::Required`] when the value is empty.
pub fn validate_required(input: &str) -> FieldResult {
    if input.is_empty() {
        Err(FieldError::new(ErrorCode::Required, "Value is required"))
    } else {
        Ok(())
    }
}

/// Fails when a non-empty value trims down to nothing.
pub fn validate_no_whitespace(input: &str) -> FieldResult {
    if !input.is_empty() && input.trim().is_empty() {
        Err(FieldError::new(
            ErrorCode::WhitespaceOnly,
            "Value cannot be only whitespace",
        ))
    } else {
        Ok(())
    }
}

/// Composed email check: whitespace rule first, then the address shape.
pub fn validate_email(input: &str) -> FieldResult {
    validate_no_whitespace(input)?;
    if EMAIL_RE.is_match(input.trim()) {
        Ok(())
    } else {
        Err(FieldError::new(
            ErrorCode::EmailInvalid,
            "Enter a valid email address",
        ))
    }
}

/// Kenyan mobile number shape: `+254` prefix followed by 9 to 12 digits.
pub fn validate_phone(input: &str) -> FieldResult {
    if PHONE_RE.is_match(input.trim()) {
        Ok(())
    } else {
        Err(FieldError::new(
            ErrorCode::FormatInvalid,
            "Enter a valid phone number (e.g., +254712345678)",
        ))
    }
}

/// Requires at least two whitespace-separated name tokens.
pub fn validate_full_name(input: &str) -> FieldResult {
    if input.split_whitespace().count() >= 2 {
        Ok(())
    } else {
        Err(FieldError::new(
            ErrorCode::NameIncomplete,
            "Enter the full name (first and last)",
        ))
    }
}

/// Parses a date-of-birth value in [`DOB_FORMAT`].
pub fn parse_dob(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DOB_FORMAT).ok()
}

/// Date of birth must parse, must not be in the future, and must imply a
/// plausible human age relative to `today`.
pub fn validate_dob(input: &str, today: NaiveDate) -> FieldResult {
    let Some(date) = parse_dob(input) else {
        return Err(FieldError::new(
            ErrorCode::DobInvalid,
            "Use YYYY-MM-DD format",
        ));
    };
    if date > today {
        return Err(FieldError::new(
            ErrorCode::DobInvalid,
            "Date of birth cannot be in the future",
        ));
    }
    if age_on(date, today) > MAX_AGE_YEARS {
        return Err(FieldError::new(
            ErrorCode::DobInvalid,
            "Enter a valid date of birth",
        ));
    }
    Ok(())
}

/// Age in whole years at `today`, adjusted by month and day so the boundary
/// lands on the birthday itself rather than on year subtraction.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Case-insensitive, whitespace-collapsed form used for duplicate detection.
pub fn normalized_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Collection-level duplicate check over `(full name, date of birth)` pairs.
///
/// Two travelers collide when their normalized names and birth dates both
/// match. Entries with a blank name or an unparsed date never collide.
/// Returns the first colliding index pair so the host can surface both rows.
pub fn find_duplicate(travelers: &[(String, Option<NaiveDate>)]) -> Option<(usize, usize)> {
    for (i, (name_a, dob_a)) in travelers.iter().enumerate() {
        let key_a = normalized_name(name_a);
        if key_a.is_empty() || dob_a.is_none() {
            continue;
        }
        for (j, (name_b, dob_b)) in travelers.iter().enumerate().skip(i + 1) {
            if dob_a == dob_b && key_a == normalized_name(name_b) {
                return Some((i, j));
            }
        }
    }
    None
}
