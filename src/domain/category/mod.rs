pub mod relevance;

pub use relevance::{CategoryVector, RelevanceScorer};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Tourism interest a POI can be tagged with and a user can pick.
///
/// Declaration order is the canonical order: it fixes the vector component
/// each category maps to, so new variants must keep the list alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Architecture,
    ForestHiking,
    Gastronomy,
    History,
    Music,
    Nature,
}

impl Category {
    pub const COUNT: usize = 6;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Architecture,
        Category::ForestHiking,
        Category::Gastronomy,
        Category::History,
        Category::Music,
        Category::Nature,
    ];

    /// Wire identifier, matches the ids used by the mobile client
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Architecture => "architecture",
            Category::ForestHiking => "forest_hiking",
            Category::Gastronomy => "gastronomy",
            Category::History => "history",
            Category::Music => "music",
            Category::Nature => "nature",
        }
    }

    /// Vector component this category occupies
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| UnknownCategory(s.trim().to_string()))
    }
}

/// Set of categories kept in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(BTreeSet<Category>);

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list such as `history, nature`.
    /// Empty items are skipped; unknown ids are rejected.
    pub fn parse_list(input: &str) -> Result<Self, UnknownCategory> {
        input
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(Category::from_str)
            .collect()
    }

    pub fn insert(&mut self, category: Category) -> bool {
        self.0.insert(category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains(&category)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vector(&self) -> CategoryVector {
        CategoryVector::from_set(self)
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
