//! Free-text input sanitization.
//!
//! Leading whitespace is stripped while the user types, with the caret shifted
//! left by the number of removed characters so it does not jump. Trailing
//! whitespace goes on blur; email values lose every whitespace character
//! because addresses cannot contain spaces.

/// A sanitized value plus the caret position after stripping.
///
/// `cursor` is a character index into `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedInput {
    pub value: String,
    pub cursor: usize,
}

/// Live keystroke handler: strips leading whitespace and compensates the caret.
pub fn strip_leading_whitespace(value: &str, cursor: usize) -> SanitizedInput {
    let removed = value.chars().take_while(|c| c.is_whitespace()).count();
    let stripped: String = value.chars().skip(removed).collect();
    let max = stripped.chars().count();
    SanitizedInput {
        cursor: cursor.saturating_sub(removed).min(max),
        value: stripped,
    }
}

/// Blur/commit handler: trims leading and trailing whitespace.
pub fn trim_on_commit(value: &str) -> String {
    value.trim().to_string()
}

/// Email commit handler: removes every whitespace character.
pub fn strip_all_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}
