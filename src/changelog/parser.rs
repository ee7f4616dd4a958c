//! Line-oriented state machine that reads `CHANGELOG.md` text into a [`ChangeData`].
//!
//! Every line is classified into a [`LineSignal`]. Signals that name a target
//! state are checked against the [`NEXT_STATES`] table; anything else is plain
//! content, appended to whichever block the current state owns. The footer
//! link block halts the scan because the renderer regenerates it.

use crate::domain::{trim_trailing_blank, ChangeData, Release, ReleaseKey, SectionKind};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::trace;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^# Change").expect("Invalid header regex"));

static RELEASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^## \[([^\]]+)\]( - (.*))?").expect("Invalid release regex")
});

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^### ([A-Z][a-z]+)").expect("Invalid section regex"));

static LINKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[Unreleased\]: https?://").expect("Invalid links regex"));

/// Scanner position within the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseState {
    Initial,
    Header,
    Release,
    Section,
    SectionBody,
    Links,
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseState::Initial => "initial",
            ParseState::Header => "header",
            ParseState::Release => "release",
            ParseState::Section => "section",
            ParseState::SectionBody => "section body",
            ParseState::Links => "links",
        };
        f.write_str(name)
    }
}

/// Allowed transitions, keyed by the state being left.
///
/// `Release -> Release` and `Release -> Links` cover released versions whose
/// sections were all empty, which render as a bare heading.
pub const NEXT_STATES: &[(ParseState, &[ParseState])] = &[
    (ParseState::Initial, &[ParseState::Header]),
    (ParseState::Header, &[ParseState::Header, ParseState::Release]),
    (
        ParseState::Release,
        &[ParseState::Section, ParseState::Release, ParseState::Links],
    ),
    (
        ParseState::Section,
        &[
            ParseState::Section,
            ParseState::SectionBody,
            ParseState::Release,
            ParseState::Links,
        ],
    ),
    (
        ParseState::SectionBody,
        &[ParseState::SectionBody, ParseState::Release, ParseState::Links],
    ),
];

/// States reachable from `from`; empty for terminal states
pub fn next_states(from: ParseState) -> &'static [ParseState] {
    NEXT_STATES
        .iter()
        .find(|(state, _)| *state == from)
        .map(|(_, next)| *next)
        .unwrap_or(&[])
}

pub fn is_allowed(from: ParseState, to: ParseState) -> bool {
    next_states(from).contains(&to)
}

/// What a single input line means to the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSignal<'a> {
    /// `# Change Log` title line
    Header,
    /// `## [key]` with an optional ` - date`
    Release { key: &'a str, date: Option<&'a str> },
    /// `### Name`; the name is not yet validated
    Section { name: &'a str },
    /// First line of the footer link block
    Links,
    Content,
}

impl LineSignal<'_> {
    /// State this signal asks to move into; `None` for plain content
    pub fn target(&self) -> Option<ParseState> {
        match self {
            LineSignal::Header => Some(ParseState::Header),
            LineSignal::Release { .. } => Some(ParseState::Release),
            LineSignal::Section { .. } => Some(ParseState::Section),
            LineSignal::Links => Some(ParseState::Links),
            LineSignal::Content => None,
        }
    }
}

/// Malformed changelog input. Line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: illegal transition from {from} to {to}")]
    IllegalTransition {
        line: usize,
        from: ParseState,
        to: ParseState,
    },

    #[error("line {line}: unknown section name '{name}'")]
    UnknownSection { line: usize, name: String },

    #[error("line {line}: invalid release key '{key}'")]
    InvalidReleaseKey { line: usize, key: String },

    #[error("line {line}: duplicate release '{key}'")]
    DuplicateRelease { line: usize, key: String },
}

/// Blocks collected during the scan, finalized into a [`ChangeData`] at the end.
#[derive(Debug, Default)]
struct ParseAccumulator {
    header: Vec<String>,
    releases: HashMap<ReleaseKey, Release>,
    current_release: Option<ReleaseKey>,
    current_section: Option<SectionKind>,
}

impl ParseAccumulator {
    fn open_release(
        &mut self,
        line: usize,
        key: ReleaseKey,
        date: Option<&str>,
    ) -> Result<(), ParseError> {
        if self.releases.contains_key(&key) {
            return Err(ParseError::DuplicateRelease {
                line,
                key: key.to_string(),
            });
        }
        // Unreleased never carries a date
        let date = date.filter(|_| !key.is_unreleased()).map(str::to_string);
        self.releases.insert(key, Release::new(date));
        self.current_release = Some(key);
        self.current_section = None;
        Ok(())
    }

    fn open_section(&mut self, kind: SectionKind) {
        if let Some(release) = self
            .current_release
            .and_then(|key| self.releases.get_mut(&key))
        {
            release.sections.entry(kind).or_default();
            self.current_section = Some(kind);
        }
    }

    fn push_content(&mut self, state: ParseState, line: &str) {
        match state {
            ParseState::Header => self.header.push(line.to_string()),
            ParseState::Section | ParseState::SectionBody => {
                let block = self.current_release.zip(self.current_section).and_then(
                    |(key, kind)| {
                        self.releases
                            .get_mut(&key)
                            .and_then(|release| release.sections.get_mut(&kind))
                    },
                );
                if let Some(block) = block {
                    block.push(line.to_string());
                }
            }
            // Stray lines before the title or between a release heading and its first section
            ParseState::Initial | ParseState::Release | ParseState::Links => {}
        }
    }

    fn finish(self) -> ChangeData {
        let releases = self
            .releases
            .into_iter()
            .map(|(key, mut release)| {
                for lines in release.sections.values_mut() {
                    *lines = trim_trailing_blank(std::mem::take(lines));
                }
                (key, release)
            })
            .collect();
        ChangeData::new(trim_trailing_blank(self.header), releases)
    }
}

/// Changelog text parser
///
/// The footer is recognised by any `[Unreleased]: http(s)://` link, whatever
/// host it points at, so a changelog written for one host still parses after
/// the configured host changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    /// Classify one line (without its line ending).
    ///
    /// Checks run in fixed priority: header, release, section, links.
    pub fn classify<'a>(&self, line: &'a str) -> LineSignal<'a> {
        if HEADER_RE.is_match(line) {
            return LineSignal::Header;
        }
        if let Some(caps) = RELEASE_RE.captures(line) {
            if let Some(key) = caps.get(1) {
                return LineSignal::Release {
                    key: key.as_str(),
                    date: caps.get(3).map(|m| m.as_str()),
                };
            }
        }
        if let Some(name) = SECTION_RE.captures(line).and_then(|caps| caps.get(1)) {
            return LineSignal::Section {
                name: name.as_str(),
            };
        }
        if LINKS_RE.is_match(line) {
            return LineSignal::Links;
        }
        LineSignal::Content
    }

    /// Parse a whole document. Any failure aborts without a partial model.
    pub fn parse(&self, text: &str) -> Result<ChangeData, ParseError> {
        let mut state = ParseState::Initial;
        let mut acc = ParseAccumulator::default();

        // `lines()` also strips a trailing '\r'
        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let signal = self.classify(line);

            let Some(target) = signal.target() else {
                acc.push_content(state, line);
                continue;
            };

            if !is_allowed(state, target) {
                return Err(ParseError::IllegalTransition {
                    line: line_no,
                    from: state,
                    to: target,
                });
            }
            trace!(line = line_no, from = %state, to = %target, "transition");

            match signal {
                LineSignal::Release { key, date } => {
                    let key: ReleaseKey =
                        key.parse().map_err(|_| ParseError::InvalidReleaseKey {
                            line: line_no,
                            key: key.to_string(),
                        })?;
                    acc.open_release(line_no, key, date)?;
                }
                LineSignal::Section { name } => {
                    let kind = SectionKind::from_display_name(name).ok_or_else(|| {
                        ParseError::UnknownSection {
                            line: line_no,
                            name: name.to_string(),
                        }
                    })?;
                    acc.open_section(kind);
                }
                LineSignal::Links => break,
                LineSignal::Header | LineSignal::Content => {}
            }
            state = target;
        }

        Ok(acc.finish())
    }
}

/// Parse a whole document with a default [Parser]
pub fn parse(text: &str) -> Result<ChangeData, ParseError> {
    Parser.parse(text)
}
