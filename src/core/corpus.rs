/// Corpus tables — tagged fragments and tasting notes for report composition.
///
/// Tables are loaded once from RON, validated eagerly, and never mutated.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::coordinate::Quadrant;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("empty {table} pool for tag '{tag}'")]
    EmptyPool {
        table: &'static str,
        tag: &'static str,
    },
    #[error("empty tasting note for quadrant '{0}'")]
    EmptyNote(&'static str),
}

/// Thermal quality of a sensation fragment. Selected by the desire axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensationTag {
    Cold,
    Hot,
}

impl SensationTag {
    pub const ALL: [SensationTag; 2] = [SensationTag::Cold, SensationTag::Hot];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Hot => "hot",
        }
    }
}

/// Luminance quality of an atmosphere fragment. Selected by the gravity axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtmosphereTag {
    Light,
    Dark,
}

impl AtmosphereTag {
    pub const ALL: [AtmosphereTag; 2] = [AtmosphereTag::Light, AtmosphereTag::Dark];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// A corpus fragment carrying exactly one semantic tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedItem<T> {
    pub id: String,
    pub text: String,
    pub tag: T,
}

/// The four narrative templates, one per quadrant. A total mapping: every
/// quadrant has a note, so selection needs no fallback branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TastingNotes {
    pub abstinent_redemption: String,
    pub abstinent_possession: String,
    pub feverish_redemption: String,
    pub feverish_possession: String,
}

impl TastingNotes {
    pub fn for_quadrant(&self, quadrant: Quadrant) -> &str {
        match quadrant {
            Quadrant::AbstinentRedemption => &self.abstinent_redemption,
            Quadrant::AbstinentPossession => &self.abstinent_possession,
            Quadrant::FeverishRedemption => &self.feverish_redemption,
            Quadrant::FeverishPossession => &self.feverish_possession,
        }
    }
}

/// The full static dataset for report composition: sensation and atmosphere
/// fragments, the universal trace pool, and the tasting note templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSet {
    pub sensations: Vec<TaggedItem<SensationTag>>,
    pub atmospheres: Vec<TaggedItem<AtmosphereTag>>,
    pub traces: Vec<String>,
    pub notes: TastingNotes,
}

impl CorpusSet {
    /// Load a corpus from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<CorpusSet, CorpusError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a corpus from a RON string.
    pub fn parse_ron(input: &str) -> Result<CorpusSet, CorpusError> {
        Ok(ron::from_str(input)?)
    }

    /// The corpus shipped with the crate, embedded at compile time.
    pub fn builtin() -> Result<CorpusSet, CorpusError> {
        Self::parse_ron(include_str!("../../corpus_data/resonance.ron"))
    }

    /// Check the invariant the generator's filter step relies on: every
    /// coded tag value has at least one entry, the trace pool is non-empty,
    /// and every quadrant has a note. Miscoded tables are a configuration
    /// error and must fail here, at load, not at generation time.
    pub fn validate(&self) -> Result<(), CorpusError> {
        for tag in SensationTag::ALL {
            if self.sensation_pool(tag).is_empty() {
                return Err(CorpusError::EmptyPool {
                    table: "sensation",
                    tag: tag.tag(),
                });
            }
        }
        for tag in AtmosphereTag::ALL {
            if self.atmosphere_pool(tag).is_empty() {
                return Err(CorpusError::EmptyPool {
                    table: "atmosphere",
                    tag: tag.tag(),
                });
            }
        }
        if self.traces.is_empty() {
            return Err(CorpusError::EmptyPool {
                table: "trace",
                tag: "universal",
            });
        }
        for quadrant in Quadrant::ALL {
            if self.notes.for_quadrant(quadrant).is_empty() {
                return Err(CorpusError::EmptyNote(quadrant.key()));
            }
        }
        Ok(())
    }

    /// Sensation fragments carrying the given tag.
    pub fn sensation_pool(&self, tag: SensationTag) -> Vec<&TaggedItem<SensationTag>> {
        self.sensations.iter().filter(|i| i.tag == tag).collect()
    }

    /// Atmosphere fragments carrying the given tag.
    pub fn atmosphere_pool(&self, tag: AtmosphereTag) -> Vec<&TaggedItem<AtmosphereTag>> {
        self.atmospheres.iter().filter(|i| i.tag == tag).collect()
    }
}
