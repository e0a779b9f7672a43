use crate::domain::category::{CategorySet, RelevanceScorer};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Planar position, unit left to the deployment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Point of interest with its cached generated text.
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    pub id: i64,
    pub name: String,
    pub position: Position,
    pub categories: CategorySet,
    pub short_description: String,
    /// Raw facts from the catalog, forwarded to the text generator
    pub source_facts: Vec<String>,
    /// Generated narrative, never regenerated once set
    pub narrative: Option<String>,
    /// Ordered fact items to narrate, one audio asset each
    pub facts: Option<Vec<String>>,
}

impl Poi {
    pub fn new(id: i64, name: impl Into<String>, position: Position, categories: CategorySet) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            categories,
            short_description: String::new(),
            source_facts: Vec::new(),
            narrative: None,
            facts: None,
        }
    }

    pub fn with_short_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = description.into();
        self
    }

    pub fn with_source_facts(mut self, facts: Vec<String>) -> Self {
        self.source_facts = facts;
        self
    }

    pub fn with_facts(mut self, facts: Vec<String>) -> Self {
        self.facts = Some(facts);
        self
    }

    /// Euclidean distance from this POI to `(x, y)`
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.position.x - x).hypot(self.position.y - y)
    }

    /// Cosine similarity between this POI's categories and the user's interests
    pub fn relevance_to(&self, user_categories: &CategorySet) -> f64 {
        RelevanceScorer.score(&self.categories, user_categories)
    }

    /// Facts are present and non-empty
    pub fn has_facts(&self) -> bool {
        self.facts.as_ref().is_some_and(|facts| !facts.is_empty())
    }
}

/// What a caller asks audio for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioKind {
    ShortDesc,
    FactsDesc,
}

impl AudioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioKind::ShortDesc => "short_desc",
            AudioKind::FactsDesc => "facts_desc",
        }
    }
}

impl std::fmt::Display for AudioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AudioKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short_desc" => Ok(AudioKind::ShortDesc),
            "facts_desc" => Ok(AudioKind::FactsDesc),
            other => Err(format!(
                "audio kind must be one of [short_desc, facts_desc], got '{}'",
                other
            )),
        }
    }
}

/// One stored audio file of a POI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetKind {
    ShortDesc,
    Fact(usize),
}

impl AssetKind {
    /// File stem, also the identifier used on the wire
    pub fn file_stem(&self) -> String {
        match self {
            AssetKind::ShortDesc => "short_desc".to_string(),
            AssetKind::Fact(index) => format!("fact_{}", index),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.wav", self.file_stem())
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_stem())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stem = s.strip_suffix(".wav").unwrap_or(s);
        if stem == "short_desc" {
            return Ok(AssetKind::ShortDesc);
        }
        stem.strip_prefix("fact_")
            .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
            .and_then(|digits| digits.parse::<usize>().ok())
            .map(AssetKind::Fact)
            .ok_or_else(|| format!("unknown audio asset '{}'", s))
    }
}
