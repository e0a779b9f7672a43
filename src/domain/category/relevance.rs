use super::{Category, CategorySet};

/// Fixed-length multi-hot encoding of a [`CategorySet`].
/// Component `i` is always `Category::ALL[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryVector {
    components: [f64; Category::COUNT],
}

impl CategoryVector {
    pub fn from_set(set: &CategorySet) -> Self {
        let mut components = [0.0; Category::COUNT];
        for category in set.iter() {
            components[category.index()] = 1.0;
        }
        Self { components }
    }

    pub fn components(&self) -> &[f64; Category::COUNT] {
        &self.components
    }

    pub fn dot(&self, other: &CategoryVector) -> f64 {
        self.components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

/// Cosine similarity between category vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceScorer;

impl RelevanceScorer {
    /// Similarity in [-1, 1]; 0.0 when either side has no categories.
    pub fn score(&self, a: &CategorySet, b: &CategorySet) -> f64 {
        self.score_vectors(&a.to_vector(), &b.to_vector())
    }

    pub fn score_vectors(&self, a: &CategoryVector, b: &CategoryVector) -> f64 {
        let (na, nb) = (a.norm(), b.norm());
        if na == 0.0 || nb == 0.0 {
            return 0.0;
        }
        (a.dot(b) / (na * nb)).clamp(-1.0, 1.0)
    }
}
