//! Strict INI configuration parsing.
//!
//! Input is read line by line. Every line must be blank, a `#` comment, a
//! `[section]` header, or a `key = value` pair; anything else fails the
//! whole parse. There is no partial success.
//!
//! Key-value lines before the first header belong to the default section,
//! named `""` ([`DEFAULT_SECTION`]). Repeated keys overwrite earlier ones.
//!
//! # Quick Start
//!
//! ```rust
//! use cfgini::{parse_str, DEFAULT_SECTION};
//!
//! let config = parse_str("name = demo\n[main]\nversion = 1.4\n").unwrap();
//! assert_eq!(config.version(), Some("1.4"));
//! assert_eq!(config.get(DEFAULT_SECTION, "name"), Some("demo"));
//! assert_eq!(config.get("main", "missing"), None);
//!
//! assert!(parse_str("[main]\nnot valid\n").is_err());
//! ```
//!
//! # Modules
//!
//! - [`error`] — [`ConfigError`] and [`ConfigResult`]
//! - [`section`] / [`store`] — the [`Section`] and [`Config`] data model
//! - [`parser`] — the [`Accumulator`] state machine and [`parse_reader`]
//! - [`loader`] — file and stream entry points, [`Loader`] with required keys
//! - [`config`] — [`LoaderConfig`]
//! - [`shared`] — [`SharedConfig`], a log-and-degrade handle whose lookups
//!   return `""` after a failed load

pub mod config;
pub mod error;
pub mod loader;
pub mod parser;
pub mod section;
pub mod shared;
pub mod store;

#[cfg(test)]
mod test_support;

// Re-exports for convenience.
pub use cfgini_syntax::{Line, LineKind};
pub use config::{LoaderConfig, RequiredKey};
pub use error::{ConfigError, ConfigResult};
pub use loader::{load_from_file, parse_from_stream, Loader};
pub use parser::{parse_reader, parse_str, Accumulator};
pub use section::Section;
pub use shared::SharedConfig;
pub use store::{Config, DEFAULT_SECTION, MAIN_SECTION, VERSION_KEY};
