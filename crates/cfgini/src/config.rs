use serde::{Deserialize, Serialize};

use crate::store::{MAIN_SECTION, VERSION_KEY};

/// A `(section, key)` pair that must be present after loading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredKey {
    pub section: String,
    pub key: String,
}

impl RequiredKey {
    pub fn new(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
        }
    }
}

/// Configuration for a [`Loader`](crate::Loader).
///
/// The parser itself has no options: the grammar is fixed. These settings
/// only add checks on top of a successful parse.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Keys that must exist (with any value, including empty) once the
    /// file has parsed. Checked in order; the first missing key is reported.
    pub required: Vec<RequiredKey>,
}

impl LoaderConfig {
    /// Require `main.version`, the usual marker that a file was loaded.
    pub fn with_version_check() -> Self {
        Self::default().require(MAIN_SECTION, VERSION_KEY)
    }

    /// Add a required key.
    pub fn require(mut self, section: impl Into<String>, key: impl Into<String>) -> Self {
        self.required.push(RequiredKey::new(section, key));
        self
    }
}
