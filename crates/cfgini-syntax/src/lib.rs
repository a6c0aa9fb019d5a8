//! Line grammar for cfgini.
//!
//! INI input is processed one line at a time. Each line is matched against
//! an ordered table of four anchored rules and the first match wins:
//!
//! 1. **Blank** -- spaces/tabs only
//! 2. **Comment** -- first non-blank character is `#`
//! 3. **Section** -- `[name]`
//! 4. **Entry** -- `key = value`
//!
//! The rules are mutually exclusive, so their order only affects how fast
//! a match is found. A line matching no rule is a grammar error; deciding
//! what to do about it is up to the caller.
//!
//! Section names and keys share one identifier grammar,
//! `[a-zA-Z][a-zA-Z0-9_]*`, exposed in [`names`].
//!
//! # Modules
//!
//! - [`error`] — Error types for identifier validation
//! - [`names`] — Identifier grammar and value rules
//! - [`line`] — [`LineKind`], [`Line`], and the [`classify`] entry point

pub mod error;
pub mod line;
pub mod names;

pub use error::{Result, SyntaxError};
pub use line::{classify, matching_kinds, strip_terminator, Line, LineKind};
pub use names::{is_identifier, validate_identifier, validate_value, IDENT_PATTERN};
