//! Line-by-line accumulation of classified lines into a [`Config`].
//!
//! The [`Accumulator`] is a small state machine: it remembers the current
//! section and applies one classified line at a time. A line that matches
//! no rule aborts the parse; the partially built [`Config`] is dropped and
//! never handed to the caller.

use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use cfgini_syntax::{classify, strip_terminator, Line, LineKind};
use tracing::{debug, error, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::store::{Config, DEFAULT_SECTION};

/// Parse state carried across lines.
///
/// The first illegal line is terminal: every later [`feed`](Self::feed)
/// returns the same error without reading its input, and
/// [`finish`](Self::finish) returns it instead of the partial result.
#[derive(Debug, Default)]
pub struct Accumulator {
    current: String,
    config: Config,
    line: usize,
    failure: Option<(usize, String)>,
}

impl Accumulator {
    /// Start with no current section and an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Section that key-value lines are currently written to.
    ///
    /// [`DEFAULT_SECTION`] until the first header is seen.
    pub fn current_section(&self) -> &str {
        &self.current
    }

    /// Number of lines accepted for classification, including the failing
    /// one.
    pub fn lines_seen(&self) -> usize {
        self.line
    }

    /// Returns `true` once a line has failed to match.
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Apply one raw line (terminator included or not).
    ///
    /// - blank and comment lines change nothing
    /// - a header makes its section current, creating it if absent
    /// - an entry is written to the current section, creating it if absent
    ///   and overwriting any earlier value for the same key
    ///
    /// Returns the kind of the line, or [`ConfigError::Syntax`] carrying the
    /// 1-based line number if the line matches no rule. After that error the
    /// partial configuration is dropped.
    pub fn feed(&mut self, raw: &str) -> ConfigResult<LineKind> {
        if let Some(err) = self.failure_error() {
            return Err(err);
        }
        self.line += 1;

        let Some(line) = classify(raw) else {
            let content = strip_terminator(raw).to_string();
            self.config = Config::new();
            self.failure = Some((self.line, content.clone()));
            return Err(ConfigError::Syntax {
                path: None,
                line: self.line,
                content,
            });
        };

        match line {
            Line::Blank | Line::Comment(_) => {}
            Line::Section(name) => {
                self.current = name.to_string();
                self.config.section_entry(name);
            }
            Line::Entry { key, value } => {
                self.config.section_entry(&self.current).set(key, value);
            }
        }

        Ok(line.kind())
    }

    /// Finish the parse: the completed configuration, or the error that
    /// stopped it.
    pub fn finish(self) -> ConfigResult<Config> {
        match self.failure_error() {
            Some(err) => Err(err),
            None => Ok(self.config),
        }
    }

    fn failure_error(&self) -> Option<ConfigError> {
        self.failure.as_ref().map(|(line, content)| ConfigError::Syntax {
            path: None,
            line: *line,
            content: content.clone(),
        })
    }
}

/// Parse a whole stream to end-of-input.
///
/// Stops at the first read failure or illegal line; both are logged and
/// returned as errors.
pub fn parse_reader<R: BufRead>(reader: R) -> ConfigResult<Config> {
    parse_lines(reader, None)
}

/// [`parse_reader`] for input read from `path`, which is logged with every
/// failure and attached to the returned error.
pub(crate) fn parse_lines<R: BufRead>(mut reader: R, path: Option<&Path>) -> ConfigResult<Config> {
    let origin = path.map_or_else(|| "<stream>".to_string(), |p| p.display().to_string());
    let attach = |err: ConfigError| match path {
        Some(path) => err.with_path(path),
        None => err,
    };

    let mut acc = Accumulator::new();
    let mut buf = String::new();

    loop {
        buf.clear();
        let read = match reader.read_line(&mut buf) {
            Ok(read) => read,
            Err(e) => {
                error!(
                    path = %origin,
                    line = acc.lines_seen() + 1,
                    error = %e,
                    "failed to read INI line"
                );
                return Err(attach(e.into()));
            }
        };
        if read == 0 {
            break;
        }

        if let Err(err) = acc.feed(&buf) {
            if let ConfigError::Syntax { line, content, .. } = &err {
                warn!(path = %origin, line, content = %content, "illegal INI line");
            }
            return Err(attach(err));
        }
    }

    let orphaned = acc.config.contains_section(DEFAULT_SECTION);
    let config = acc.finish()?;
    debug!(path = %origin, sections = config.len(), orphaned, "parsed INI input");
    Ok(config)
}

/// Parse INI text held in memory.
pub fn parse_str(input: &str) -> ConfigResult<Config> {
    parse_reader(input.as_bytes())
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}
