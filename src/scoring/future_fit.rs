use super::normalize::normalize;
use crate::types::config::EmptyPoolPolicy;
use crate::types::scoring::FacetScores;

/// Mean of per-pool normalized facet means, as a 0..=100 index.
pub fn future_fit_index(pools: &[&FacetScores], policy: EmptyPoolPolicy) -> u8 {
    let means: Vec<f64> = pools
        .iter()
        .filter(|scores| match policy {
            EmptyPoolPolicy::Count => true,
            EmptyPoolPolicy::Exclude => !scores.is_empty(),
        })
        .map(|scores| {
            if scores.is_empty() {
                return 0.0;
            }
            let normalized = normalize(scores);
            normalized.values().sum::<f64>() / normalized.len() as f64
        })
        .collect();

    if means.is_empty() {
        return 0;
    }
    let average = means.iter().sum::<f64>() / means.len() as f64;
    (100.0 * average).round_ties_even().clamp(0.0, 100.0) as u8
}
