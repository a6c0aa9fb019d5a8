//! Loading configuration from files and streams.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, error};

use crate::config::LoaderConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::parser::{parse_lines, parse_reader};
use crate::store::Config;

/// Open and parse the INI file at `path`.
///
/// The file handle is closed when this returns, on every path. Failures
/// are logged with the file path attached and returned to the caller.
pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "failed to open INI file");
        ConfigError::from(e).with_path(path)
    })?;

    parse_lines(BufReader::new(file), Some(path))
}

/// Parse INI text from any readable source.
pub fn parse_from_stream<R: Read>(reader: R) -> ConfigResult<Config> {
    parse_reader(BufReader::new(reader))
}

/// Loads configuration and enforces a [`LoaderConfig`] on the result.
#[derive(Clone, Debug, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// The current configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a file, then check required keys.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<Config> {
        let parsed = load_from_file(path)?;
        self.check(parsed)
    }

    /// Load from a stream, then check required keys.
    pub fn load_reader<R: Read>(&self, reader: R) -> ConfigResult<Config> {
        let parsed = parse_from_stream(reader)?;
        self.check(parsed)
    }

    fn check(&self, config: Config) -> ConfigResult<Config> {
        for required in &self.config.required {
            if config.get(&required.section, &required.key).is_none() {
                error!(
                    section = %required.section,
                    key = %required.key,
                    "required INI key missing"
                );
                return Err(ConfigError::MissingRequired {
                    section: required.section.clone(),
                    key: required.key.clone(),
                });
            }
        }
        debug!(checked = self.config.required.len(), "required INI keys present");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::test_support::{capture_logs, count_level};

    fn write_ini(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    // -----------------------------------------------------------------------
    // 1. File loading
    // -----------------------------------------------------------------------
    #[test]
    fn load_valid_file() {
        let file = write_ini("# app settings\n[main]\nversion = 1.0\n\n[db]\nhost=localhost\n");
        let config = load_from_file(file.path()).unwrap();
        assert_eq!(config.version(), Some("1.0"));
        assert_eq!(config.get("db", "host"), Some("localhost"));
    }

    #[test]
    fn missing_file_is_io_error_with_path() {
        let err = load_from_file("/nonexistent/cfgini/app.ini").unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("/nonexistent/cfgini/app.ini"));
    }

    #[test]
    fn malformed_file_reports_line() {
        let file = write_ini("[main]\nversion=1\n[bad name]\n");
        let err = load_from_file(file.path()).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn syntax_error_carries_path_in_error_and_log() {
        let file = write_ini("[main]\nnot valid\n");
        let (result, logs) = capture_logs(|| load_from_file(file.path()));
        let err = result.unwrap_err();
        let path = file.path().display().to_string();

        assert!(matches!(
            err,
            ConfigError::Syntax { path: Some(ref p), line: 2, .. } if p == file.path()
        ));
        assert!(err.to_string().contains(&path));

        let warnings: Vec<_> = logs
            .lines()
            .filter(|l| l.trim_start().starts_with("WARN"))
            .collect();
        assert_eq!(warnings.len(), 1, "{logs}");
        assert!(warnings[0].contains(&format!("path={path}")), "{logs}");
        assert!(warnings[0].contains("line=2"), "{logs}");
        assert!(warnings[0].contains("content=not valid"), "{logs}");
    }

    #[test]
    fn open_failure_log_names_path() {
        let (result, logs) = capture_logs(|| load_from_file("/nonexistent/cfgini/app.ini"));
        assert!(result.is_err());
        assert_eq!(count_level(&logs, "ERROR"), 1, "{logs}");
        assert!(logs.contains("path=/nonexistent/cfgini/app.ini"), "{logs}");
    }

    #[test]
    fn directory_is_not_a_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_file(dir.path()).unwrap_err().is_io());
    }

    // -----------------------------------------------------------------------
    // 2. Streams
    // -----------------------------------------------------------------------
    #[test]
    fn parse_from_any_reader() {
        let config = parse_from_stream(&b"[a]\nx=1\n"[..]).unwrap();
        assert_eq!(config.get("a", "x"), Some("1"));
    }

    // -----------------------------------------------------------------------
    // 3. Required keys
    // -----------------------------------------------------------------------
    #[test]
    fn loader_accepts_when_required_present() {
        let loader = Loader::new(LoaderConfig::with_version_check());
        let config = loader.load_reader(&b"[main]\nversion=\n"[..]).unwrap();
        assert_eq!(config.version(), Some(""));
    }

    #[test]
    fn loader_rejects_missing_version() {
        let loader = Loader::new(LoaderConfig::with_version_check());
        let err = loader.load_reader(&b"[main]\nname=x\n"[..]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequired { ref section, ref key }
                if section == "main" && key == "version"
        ));
    }

    #[test]
    fn loader_reports_first_missing_key() {
        let loader = Loader::new(LoaderConfig::default().require("a", "x").require("b", "y"));
        let err = loader.load_reader(&b"[b]\n"[..]).unwrap_err();
        assert_eq!(err.to_string(), "missing required key \"x\" in section [a]");
    }

    #[test]
    fn loader_propagates_parse_errors() {
        let file = write_ini("[main]\nversion=1\n!\n");
        let loader = Loader::new(LoaderConfig::with_version_check());
        assert_eq!(loader.load(file.path()).unwrap_err().line(), Some(3));
    }

    #[test]
    fn default_loader_checks_nothing() {
        let loader = Loader::default();
        assert!(loader.config().required.is_empty());
        assert!(loader.load_reader(&b""[..]).unwrap().is_empty());
    }
}
