//! Parser for generated PC build descriptions
//!
//! The build service answers with one header line per slot, each followed
//! by a single detail line:
//!
//! ```text
//! Processor (CPU)
//! - AMD Ryzen 5 7600 - £250
//!   Six fast cores for gaming.
//! ```
//!
//! Only the line right after a header is looked at for that slot; anything
//! else (justification lines, preambles) is reported as a mismatch.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use super::{ComponentEntry, ParseMismatch, ParsedBuild};
use crate::slots::ComponentSlot;

static DETAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Currency symbol prepended to the captured price digits
const CURRENCY: &str = "£";

/// Detail line: `- <model> - £<digits and commas>`.
///
/// The model group is lazy, so it stops at the first ` - £` that is
/// followed by a digit or comma. Nothing is required after the price.
fn detail_regex() -> &'static Regex {
    DETAIL_REGEX.get_or_init(|| {
        Regex::new(r"^- (.+?) - £([0-9,]+)").expect("Failed to compile detail line regex")
    })
}

/// Whitespace stripped around lines and models: Unicode `White_Space`
/// except NEL (U+0085), plus the byte order mark (U+FEFF).
fn is_line_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Trim a line the way the parser does before matching it
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(is_line_space)
}

/// Cursor of the line-by-line state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// No slot pending; only a header changes state
    AwaitingHeader,
    /// A header was seen and its detail line is expected next
    AwaitingDetail(ComponentSlot),
}

/// Parser for build descriptions over a fixed set of known slots
#[derive(Debug, Clone)]
pub struct BuildParser {
    slots: BTreeSet<ComponentSlot>,
}

impl BuildParser {
    /// Parser that knows every [`ComponentSlot`]
    pub fn new() -> Self {
        Self::with_slots(ComponentSlot::ALL)
    }

    /// Parser restricted to the given slots.
    ///
    /// Headers of other slots are treated like any unrecognized line.
    pub fn with_slots(slots: impl IntoIterator<Item = ComponentSlot>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    pub fn known_slots(&self) -> impl Iterator<Item = ComponentSlot> + '_ {
        self.slots.iter().copied()
    }

    fn known_header(&self, line: &str) -> Option<ComponentSlot> {
        ComponentSlot::from_header(line).filter(|slot| self.slots.contains(slot))
    }

    /// Parse a build description.
    ///
    /// Always returns an entry for every known slot. Lines that cannot be
    /// used are recorded as [`ParseMismatch`]es and never abort the parse.
    pub fn parse(&self, content: &str) -> ParsedBuild {
        let mut build = ParsedBuild::empty(self.slots.iter().copied());
        let mut state = ParseState::AwaitingHeader;

        for (line_idx, raw) in content.split('\n').enumerate() {
            let line_number = line_idx + 1;
            let line = trim_line(raw);

            if line.is_empty() {
                continue;
            }

            if let Some(slot) = self.known_header(line) {
                tracing::debug!("Found component: {slot}");
                state = ParseState::AwaitingDetail(slot);
                continue;
            }

            match state {
                ParseState::AwaitingDetail(slot) => {
                    match parse_detail_line(line) {
                        Some(entry) => {
                            tracing::debug!(
                                "Updated fields for {slot}: Model: {}, Price: {}",
                                entry.model,
                                entry.price
                            );
                            build.set(slot, entry);
                        }
                        None => {
                            let mismatch = ParseMismatch::UnparsedDetail {
                                slot,
                                line_number,
                                line: line.to_string(),
                            };
                            tracing::warn!("{mismatch}");
                            build.record(mismatch);
                        }
                    }
                    // Each header consumes at most one detail line
                    state = ParseState::AwaitingHeader;
                }
                ParseState::AwaitingHeader => {
                    let mismatch = ParseMismatch::OrphanLine {
                        line_number,
                        line: line.to_string(),
                    };
                    tracing::warn!("{mismatch}");
                    build.record(mismatch);
                }
            }
        }

        tracing::debug!(
            "Parsed build: {}/{} components, {} unparsed lines",
            build.filled(),
            build.len(),
            build.mismatches().len()
        );

        build
    }
}

impl Default for BuildParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Match a trimmed detail line, returning the model and the price with
/// its currency symbol.
fn parse_detail_line(line: &str) -> Option<ComponentEntry> {
    let caps = detail_regex().captures(line)?;
    let model = trim_line(caps.get(1)?.as_str());
    let digits = caps.get(2)?.as_str();

    Some(ComponentEntry::new(model, format!("{CURRENCY}{digits}")))
}
