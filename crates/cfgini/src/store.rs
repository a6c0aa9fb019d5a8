use std::collections::BTreeMap;
use std::fmt;

use cfgini_syntax::{validate_identifier, validate_value};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::section::Section;

/// Name of the section that collects key-value lines appearing before any
/// section header.
pub const DEFAULT_SECTION: &str = "";

/// Section that, by convention, carries the file's `version` key.
pub const MAIN_SECTION: &str = "main";

/// Key inside [`MAIN_SECTION`] used to confirm a file was loaded.
pub const VERSION_KEY: &str = "version";

/// A fully parsed INI file: section name to [`Section`].
///
/// A `Config` only ever exists for input that parsed completely. There is
/// no partially-populated state; a failed parse yields an error instead.
///
/// Every name and value held by a `Config` can be written back as INI
/// text. The builder and deserialization both enforce this.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Config {
    sections: BTreeMap<String, Section>,
}

impl Config {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value of `key` in `section`.
    ///
    /// Returns `None` if either the section or the key is absent, so an
    /// empty value (`key=`) is distinguishable from a missing one.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key)
    }

    /// Look up a value, collapsing absence to `""`.
    pub fn get_or_empty(&self, section: &str, key: &str) -> &str {
        self.get(section, key).unwrap_or_default()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Sections in name order. The default section, if present, comes first.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Number of sections, including an implicit default section.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The `version` key of the `main` section.
    pub fn version(&self) -> Option<&str> {
        self.get(MAIN_SECTION, VERSION_KEY)
    }

    /// Set `section.key = value`, creating the section if needed.
    ///
    /// Both names must follow the identifier grammar; `section` may also be
    /// [`DEFAULT_SECTION`]. The value must not contain line terminators or
    /// start or end with a space or tab. Returns the replaced value, if any.
    pub fn insert(
        &mut self,
        section: &str,
        key: &str,
        value: impl Into<String>,
    ) -> ConfigResult<Option<String>> {
        let value = value.into();
        validate_section_name(section)?;
        validate_identifier(key)?;
        validate_value(&value)?;
        Ok(self.section_entry(section).set(key, value))
    }

    /// Get or create a section without validating its name.
    ///
    /// Only the parser calls this, and only with names its line rules
    /// already matched.
    pub(crate) fn section_entry(&mut self, name: &str) -> &mut Section {
        if !self.sections.contains_key(name) {
            tracing::debug!(section = name, "creating section");
        }
        self.sections.entry(name.to_string()).or_default()
    }
}

fn validate_section_name(name: &str) -> ConfigResult<()> {
    if name != DEFAULT_SECTION {
        validate_identifier(name)?;
    }
    Ok(())
}

/// Validates every section name, key, and value.
///
/// An empty default section is dropped: it has no INI spelling.
impl TryFrom<BTreeMap<String, Section>> for Config {
    type Error = ConfigError;

    fn try_from(mut sections: BTreeMap<String, Section>) -> ConfigResult<Self> {
        for (name, section) in &sections {
            validate_section_name(name)?;
            for (key, value) in section {
                validate_identifier(key)?;
                validate_value(value)?;
            }
        }
        if sections.get(DEFAULT_SECTION).is_some_and(Section::is_empty) {
            sections.remove(DEFAULT_SECTION);
        }
        Ok(Self { sections })
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let sections = BTreeMap::<String, Section>::deserialize(deserializer)?;
        Config::try_from(sections).map_err(serde::de::Error::custom)
    }
}

/// Renders canonical INI text that parses back to an equal `Config`.
///
/// Default-section entries come first without a header; every other
/// section is written as `[name]` followed by `key = value` lines.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, section) in self.sections() {
            if name == DEFAULT_SECTION && section.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;
            if name != DEFAULT_SECTION {
                writeln!(f, "[{name}]")?;
            }
            for (key, value) in section {
                if value.is_empty() {
                    writeln!(f, "{key} =")?;
                } else {
                    writeln!(f, "{key} = {value}")?;
                }
            }
        }
        Ok(())
    }
}
