pub mod facets;
pub mod future_fit;
pub mod normalize;
pub mod rank;

use crate::assessment::Assessment;
use crate::session::Session;
use crate::types::catalog::POOLS;
use crate::types::config::ScoringSettings;
use crate::types::report::AssessmentReport;
use crate::types::scoring::{FacetScores, ScoresByGroup};
use chrono::Utc;

pub use facets::aggregate_facets;
pub use future_fit::future_fit_index;
pub use rank::rank_clusters;

/// One scoring pass over a session snapshot.
pub fn score_session(
    assessment: &Assessment,
    session: &Session,
    settings: &ScoringSettings,
) -> AssessmentReport {
    let facets: ScoresByGroup = POOLS
        .iter()
        .map(|spec| {
            let scores = assessment
                .catalog
                .pool(spec.key)
                .map(|pool| aggregate_facets(pool, &session.responses, settings.default_response))
                .unwrap_or_default();
            (spec.key.to_string(), scores)
        })
        .collect();

    let ranked: ScoresByGroup = POOLS
        .iter()
        .filter(|spec| spec.ranked)
        .map(|spec| (spec.key.to_string(), facets[spec.key].clone()))
        .collect();
    let clusters = rank_clusters(&ranked, &assessment.mapping);

    let future_fit = if clusters.is_empty() {
        None
    } else {
        let parts: Vec<&FacetScores> = POOLS
            .iter()
            .filter(|spec| spec.future_fit)
            .map(|spec| &facets[spec.key])
            .collect();
        Some(future_fit_index(&parts, settings.empty_pool_policy))
    };

    tracing::info!(
        clusters = clusters.len(),
        top = clusters.first().map(|c| c.cluster.as_str()).unwrap_or(""),
        "scored session"
    );

    AssessmentReport {
        generated_at: Utc::now().to_rfc3339(),
        config_digest: assessment.digest.clone(),
        student: session.student.clone(),
        facets,
        clusters,
        future_fit,
        top_clusters: settings.top_clusters,
    }
}
