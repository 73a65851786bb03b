use crate::types::scoring::FacetScores;

/// Rescales by the pool maximum. A non-positive maximum falls back to a
/// divisor of 1, so inputs are expected to be non-negative.
pub fn normalize(scores: &FacetScores) -> FacetScores {
    let max = scores.values().copied().fold(f64::NEG_INFINITY, f64::max);
    let divisor = if max > 0.0 { max } else { 1.0 };
    scores
        .iter()
        .map(|(facet, value)| (facet.clone(), value / divisor))
        .collect()
}
