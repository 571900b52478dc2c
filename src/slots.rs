//! Hardware component slots
//!
//! The set of slots is closed: the build service is instructed to emit
//! exactly these eight headers, and a header that is not listed here is
//! never turned into a slot.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A hardware category the build form collects a model and a price for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentSlot {
    #[serde(rename = "Processor (CPU)")]
    Cpu,
    #[serde(rename = "Graphics Card (GPU)")]
    Gpu,
    #[serde(rename = "Motherboard")]
    Motherboard,
    #[serde(rename = "Memory (RAM)")]
    Ram,
    #[serde(rename = "Storage")]
    Storage,
    #[serde(rename = "Power Supply (PSU)")]
    Psu,
    #[serde(rename = "Case")]
    Case,
    #[serde(rename = "Cooling")]
    Cooling,
}

impl ComponentSlot {
    /// All slots, in the order the build service lists them
    pub const ALL: [ComponentSlot; 8] = [
        ComponentSlot::Cpu,
        ComponentSlot::Gpu,
        ComponentSlot::Motherboard,
        ComponentSlot::Ram,
        ComponentSlot::Storage,
        ComponentSlot::Psu,
        ComponentSlot::Case,
        ComponentSlot::Cooling,
    ];

    /// Header line that introduces this slot in a build description
    pub fn header(&self) -> &'static str {
        match self {
            ComponentSlot::Cpu => "Processor (CPU)",
            ComponentSlot::Gpu => "Graphics Card (GPU)",
            ComponentSlot::Motherboard => "Motherboard",
            ComponentSlot::Ram => "Memory (RAM)",
            ComponentSlot::Storage => "Storage",
            ComponentSlot::Psu => "Power Supply (PSU)",
            ComponentSlot::Case => "Case",
            ComponentSlot::Cooling => "Cooling",
        }
    }

    /// Short identifier used to build default form field ids (`model-cpu`, `price-cpu`, ...)
    pub fn key(&self) -> &'static str {
        match self {
            ComponentSlot::Cpu => "cpu",
            ComponentSlot::Gpu => "gpu",
            ComponentSlot::Motherboard => "motherboard",
            ComponentSlot::Ram => "ram",
            ComponentSlot::Storage => "storage",
            ComponentSlot::Psu => "psu",
            ComponentSlot::Case => "case",
            ComponentSlot::Cooling => "cooling",
        }
    }

    /// Look up a slot by its exact header text.
    ///
    /// No trimming or case folding is done here; callers pass an already
    /// trimmed line.
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.header() == header)
    }
}

impl fmt::Display for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}
