use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::names::IDENT_PATTERN;

// ---------------------------------------------------------------------------
// LineKind
// ---------------------------------------------------------------------------

/// The four categories a well-formed line can fall into.
///
/// Variants are declared in evaluation order: the classifier tries them
/// top to bottom and the first rule that matches wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Only spaces/tabs, optionally followed by a line terminator.
    Blank,
    /// First non-blank character is `#`.
    Comment,
    /// `[name]` with optional surrounding spaces/tabs.
    Section,
    /// `key = value`.
    Entry,
}

impl LineKind {
    /// All kinds in evaluation order.
    pub const ALL: [LineKind; 4] = [
        LineKind::Blank,
        LineKind::Comment,
        LineKind::Section,
        LineKind::Entry,
    ];

    /// Anchored regex source for this kind.
    pub fn pattern(self) -> String {
        match self {
            LineKind::Blank => r"^[ \t]*\r?\n?$".to_string(),
            LineKind::Comment => r"^[ \t]*#(.*?)\r?\n?$".to_string(),
            LineKind::Section => {
                format!(r"^[ \t]*\[[ \t]*({IDENT_PATTERN})[ \t]*\][ \t]*\r?\n?$")
            }
            LineKind::Entry => {
                format!(r"^[ \t]*({IDENT_PATTERN})[ \t]*=[ \t]*(.*?)[ \t]*\r?\n?$")
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineKind::Blank => "blank",
            LineKind::Comment => "comment",
            LineKind::Section => "section",
            LineKind::Entry => "entry",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

/// A classified line, borrowing its captures from the raw input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    /// Comment text after the `#`, without the line terminator.
    Comment(&'a str),
    /// Section header carrying the section name.
    Section(&'a str),
    /// Key-value pair. The value has trailing spaces/tabs removed.
    Entry { key: &'a str, value: &'a str },
}

impl Line<'_> {
    pub fn kind(&self) -> LineKind {
        match self {
            Line::Blank => LineKind::Blank,
            Line::Comment(_) => LineKind::Comment,
            Line::Section(_) => LineKind::Section,
            Line::Entry { .. } => LineKind::Entry,
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A compiled line rule: one kind and its anchored regex.
struct LineRule {
    kind: LineKind,
    regex: Regex,
}

impl LineRule {
    fn compile(kind: LineKind) -> Self {
        let regex = Regex::new(&kind.pattern()).expect("line rule pattern must compile");
        Self { kind, regex }
    }

    fn capture<'a>(&self, raw: &'a str) -> Option<Line<'a>> {
        let caps = self.regex.captures(raw)?;
        Some(match self.kind {
            LineKind::Blank => Line::Blank,
            LineKind::Comment => Line::Comment(group(&caps, 1)),
            LineKind::Section => Line::Section(group(&caps, 1)),
            LineKind::Entry => Line::Entry {
                key: group(&caps, 1),
                value: group(&caps, 2),
            },
        })
    }
}

fn group<'a>(caps: &Captures<'a>, index: usize) -> &'a str {
    caps.get(index).map_or("", |m| m.as_str())
}

static RULES: LazyLock<Vec<LineRule>> =
    LazyLock::new(|| LineKind::ALL.into_iter().map(LineRule::compile).collect());

/// Classify one raw line (terminator included or not).
///
/// Returns `None` when the line matches no rule, which callers must treat
/// as a grammar error.
///
/// # Examples
///
/// ```
/// use cfgini_syntax::{classify, Line};
///
/// assert_eq!(classify("  [server]\n"), Some(Line::Section("server")));
/// assert_eq!(
///     classify("port = 8080 \r\n"),
///     Some(Line::Entry { key: "port", value: "8080" }),
/// );
/// assert_eq!(classify("not a line"), None);
/// ```
pub fn classify(raw: &str) -> Option<Line<'_>> {
    RULES.iter().find_map(|rule| rule.capture(raw))
}

/// Every kind whose rule matches `raw`, in evaluation order.
///
/// Well-formed lines yield exactly one kind; unmatched lines yield none.
pub fn matching_kinds(raw: &str) -> Vec<LineKind> {
    RULES
        .iter()
        .filter(|rule| rule.regex.is_match(raw))
        .map(|rule| rule.kind)
        .collect()
}

/// Strip a trailing `\n` or `\r\n` from a raw line.
pub fn strip_terminator(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    line.strip_suffix('\r').unwrap_or(line)
}
