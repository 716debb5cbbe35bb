//! Pure field and collection validators plus the free-text sanitization
//! helpers shared by the wizard steps.

pub mod rules;
pub mod sanitize;

pub use rules::{
    age_on, find_duplicate, normalized_name, parse_dob, validate_dob, validate_email,
    validate_full_name, validate_no_whitespace, validate_phone, validate_required, ErrorCode,
    FieldError, FieldResult, DOB_FORMAT,
};
pub use sanitize::{strip_all_whitespace, strip_leading_whitespace, trim_on_commit, SanitizedInput};
