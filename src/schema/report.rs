use serde::{Deserialize, Serialize};

/// Which corpus table a composition entry was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Sensation,
    Atmosphere,
    Trace,
}

impl ElementKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sensation => "sensation",
            Self::Atmosphere => "atmosphere",
            Self::Trace => "trace",
        }
    }
}

/// One line of the composition breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionEntry {
    pub element: String,
    pub percentage: u8,
    pub kind: ElementKind,
}

/// The generated reading: a fixed three-entry composition (sensation,
/// atmosphere, trace, in that order) whose percentages sum to exactly 100,
/// plus one tasting note. Ephemeral; discarded on restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResonanceReport {
    pub composition: [CompositionEntry; 3],
    pub tasting_note: String,
}

impl ResonanceReport {
    /// Sum of the three composition percentages. Always 100 for reports
    /// produced by the generator; exposed so hosts and tests can assert it.
    pub fn total_percentage(&self) -> u32 {
        self.composition.iter().map(|e| u32::from(e.percentage)).sum()
    }
}
