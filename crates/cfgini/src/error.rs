//! Error types for parsing and loading INI configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be opened, or reading from the stream failed.
    #[error("I/O error{}: {source}", display_path(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// A line matched none of the line rules.
    #[error("illegal INI line {line}{}: {content:?}", display_path(.path))]
    Syntax {
        path: Option<PathBuf>,
        line: usize,
        content: String,
    },

    /// A key required by the loader configuration is absent.
    #[error("missing required key {key:?} in section [{section}]")]
    MissingRequired { section: String, key: String },

    /// A section name, key, or value given to the builder API or found in
    /// deserialized data cannot be represented as INI text.
    #[error(transparent)]
    InvalidEntry(#[from] cfgini_syntax::SyntaxError),
}

impl ConfigError {
    /// Attach a file path to an I/O or grammar error that does not carry
    /// one yet.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Io { path: None, source } => Self::Io {
                path: Some(path.into()),
                source,
            },
            Self::Syntax {
                path: None,
                line,
                content,
            } => Self::Syntax {
                path: Some(path.into()),
                line,
                content,
            },
            other => other,
        }
    }

    /// The 1-based line number of a grammar error.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns `true` if this error came from the underlying I/O source.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
