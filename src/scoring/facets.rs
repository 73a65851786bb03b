use crate::types::catalog::Pool;
use crate::types::scoring::{FacetScores, Responses};

/// Likert complement used for reverse-keyed items.
const REVERSE_PIVOT: f64 = 6.0;

pub fn aggregate_facets(pool: &Pool, responses: &Responses, default_response: u8) -> FacetScores {
    let mut scores = FacetScores::new();
    for item in &pool.items {
        let raw = f64::from(responses.get(&item.id).copied().unwrap_or(default_response));
        let value = if item.reverse { REVERSE_PIVOT - raw } else { raw };
        *scores.entry(item.facet.clone()).or_insert(0.0) += value;
    }
    scores
}
