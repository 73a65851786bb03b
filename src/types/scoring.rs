use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Score = f64;

/// Facet name to accumulated (or normalized) score for one pool.
pub type FacetScores = BTreeMap<String, Score>;

/// Pool key to that pool's facet scores.
pub type ScoresByGroup = BTreeMap<String, FacetScores>;

/// Responses keyed by item id, each on the 1..=5 Likert scale.
pub type Responses = BTreeMap<String, u8>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterResult {
    pub cluster: String,
    pub score: Score,
    /// Relative to the top-ranked cluster. Only leaves [0, 100] when the
    /// mapping carries negative weights.
    pub percent: i32,
    pub description: String,
    pub suggestions: Vec<String>,
}
