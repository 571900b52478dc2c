//! Parsers for generated build descriptions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::slots::ComponentSlot;

pub mod build;

/// Model and price recorded for one slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEntry {
    /// Model description, trimmed (e.g., "AMD Ryzen 5 7600")
    pub model: String,
    /// Price text including the currency symbol (e.g., "£1,250")
    pub price: String,
}

impl ComponentEntry {
    pub fn new(model: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            price: price.into(),
        }
    }

    /// True when nothing was found for the slot
    pub fn is_empty(&self) -> bool {
        self.model.is_empty() && self.price.is_empty()
    }
}

/// A line that could not be used while parsing.
///
/// Mismatches never stop a parse; they are collected for diagnostics.
/// Line numbers are 1-based and count blank lines of the raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseMismatch {
    /// A slot header was followed by a line that is not a detail line
    #[error("line {line_number}: could not parse details for {slot}: {line}")]
    UnparsedDetail {
        slot: ComponentSlot,
        line_number: usize,
        line: String,
    },
    /// A line that is neither a known header nor expected as a detail line
    #[error("line {line_number}: does not match any component or details: {line}")]
    OrphanLine { line_number: usize, line: String },
}

impl ParseMismatch {
    pub fn line_number(&self) -> usize {
        match self {
            ParseMismatch::UnparsedDetail { line_number, .. }
            | ParseMismatch::OrphanLine { line_number, .. } => *line_number,
        }
    }

    /// The trimmed text of the offending line
    pub fn line(&self) -> &str {
        match self {
            ParseMismatch::UnparsedDetail { line, .. } | ParseMismatch::OrphanLine { line, .. } => {
                line
            }
        }
    }
}

/// Result of parsing one build description.
///
/// Holds an entry for every slot the parser knows about, empty when the
/// slot was not found, so the mapping is always total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBuild {
    entries: BTreeMap<ComponentSlot, ComponentEntry>,
    mismatches: Vec<ParseMismatch>,
}

impl ParsedBuild {
    /// Create a result with an empty entry for each given slot
    pub fn empty(slots: impl IntoIterator<Item = ComponentSlot>) -> Self {
        Self {
            entries: slots
                .into_iter()
                .map(|slot| (slot, ComponentEntry::default()))
                .collect(),
            mismatches: Vec::new(),
        }
    }

    /// Entry for a slot, `None` if the parser was not configured with it
    pub fn entry(&self, slot: ComponentSlot) -> Option<&ComponentEntry> {
        self.entries.get(&slot)
    }

    /// All entries in slot order
    pub fn entries(&self) -> impl Iterator<Item = (ComponentSlot, &ComponentEntry)> {
        self.entries.iter().map(|(slot, entry)| (*slot, entry))
    }

    pub fn mismatches(&self) -> &[ParseMismatch] {
        &self.mismatches
    }

    /// Number of known slots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of slots that received a model and price
    pub fn filled(&self) -> usize {
        self.entries.values().filter(|e| !e.is_empty()).count()
    }

    /// True when every known slot was filled
    pub fn is_complete(&self) -> bool {
        self.filled() == self.entries.len()
    }

    pub(crate) fn set(&mut self, slot: ComponentSlot, entry: ComponentEntry) {
        if let Some(existing) = self.entries.get_mut(&slot) {
            *existing = entry;
        }
    }

    pub(crate) fn record(&mut self, mismatch: ParseMismatch) {
        self.mismatches.push(mismatch);
    }
}
