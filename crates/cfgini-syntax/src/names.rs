//! Identifier grammar shared by section names and keys, plus the rules a
//! value must meet to be written back as an entry line.
//!
//! Valid identifiers:
//! - Must be non-empty
//! - Must start with an ASCII letter
//! - May continue with ASCII letters, digits, or `_`

use crate::error::{Result, SyntaxError};

/// Regex fragment matching a single identifier, used by the line rules.
pub const IDENT_PATTERN: &str = "[a-zA-Z][a-zA-Z0-9_]*";

/// Returns `true` if `name` is a valid section name or key.
///
/// # Examples
///
/// ```
/// use cfgini_syntax::names::is_identifier;
///
/// assert!(is_identifier("main"));
/// assert!(is_identifier("log_level2"));
/// assert!(!is_identifier("2fast"));
/// assert!(!is_identifier("has-dash"));
/// ```
pub fn is_identifier(name: &str) -> bool {
    validate_identifier(name).is_ok()
}

/// Validate a section name or key, returning `Ok(())` if valid.
pub fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();

    let Some(first) = chars.next() else {
        return Err(SyntaxError::InvalidIdentifier {
            name: name.to_string(),
            reason: "identifier must not be empty".into(),
        });
    };

    if !first.is_ascii_alphabetic() {
        return Err(SyntaxError::InvalidIdentifier {
            name: name.to_string(),
            reason: format!("must start with an ASCII letter, found {first:?}"),
        });
    }

    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(SyntaxError::InvalidIdentifier {
            name: name.to_string(),
            reason: format!("contains forbidden character: {bad:?}"),
        });
    }

    Ok(())
}

/// Validate a value for storage, returning `Ok(())` if an entry line
/// `key = value` would read back exactly `value`.
///
/// Values must not contain `\n` or `\r`, and must not start or end with a
/// space or tab. Empty values are allowed.
pub fn validate_value(value: &str) -> Result<()> {
    if let Some(bad) = value.chars().find(|c| matches!(c, '\n' | '\r')) {
        return Err(SyntaxError::InvalidValue {
            value: value.to_string(),
            reason: format!("contains line terminator {bad:?}"),
        });
    }

    let is_blank = |c: char| c == ' ' || c == '\t';
    if value.starts_with(is_blank) || value.ends_with(is_blank) {
        return Err(SyntaxError::InvalidValue {
            value: value.to_string(),
            reason: "must not start or end with a space or tab".into(),
        });
    }

    Ok(())
}
