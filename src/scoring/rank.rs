use super::normalize::normalize;
use crate::types::catalog::ClusterMapping;
use crate::types::scoring::{ClusterResult, FacetScores, Score, ScoresByGroup};
use std::cmp::Ordering;

const SCORE_DECIMALS: i32 = 5;

/// Weighted composite over normalized facets, best cluster first.
///
/// Every cluster in `mapping` appears in the output. Groups or facets a
/// weight table names but `domains` lacks contribute nothing. Equal scores
/// keep their configuration order.
pub fn rank_clusters(domains: &ScoresByGroup, mapping: &ClusterMapping) -> Vec<ClusterResult> {
    let normalized: ScoresByGroup = domains
        .iter()
        .map(|(group, scores)| (group.clone(), normalize(scores)))
        .collect();
    let empty = FacetScores::new();

    let mut results: Vec<ClusterResult> = mapping
        .clusters
        .iter()
        .map(|cluster| {
            let mut total = 0.0;
            for (group, weights) in &cluster.weights {
                let facets = normalized.get(group).unwrap_or(&empty);
                for (facet, weight) in weights {
                    total += weight * facets.get(facet).copied().unwrap_or(0.0);
                }
            }
            ClusterResult {
                cluster: cluster.name.clone(),
                score: round_to(total, SCORE_DECIMALS),
                percent: 0,
                description: cluster.description.clone(),
                suggestions: cluster.suggestions.clone(),
            }
        })
        .collect();

    if results.is_empty() {
        return results;
    }

    // sort_by is stable, which keeps ties in mapping order.
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let top = if results[0].score > 0.0 {
        results[0].score
    } else {
        1.0
    };
    for result in &mut results {
        result.percent = (100.0 * (result.score / top)).round_ties_even() as i32;
    }
    results
}

/// Scales, rounds half away from zero, and scales back. This can differ from
/// correctly rounded decimal output only on binary ties past the 5th place.
fn round_to(value: Score, decimals: i32) -> Score {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
