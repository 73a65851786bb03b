pub mod html;
pub mod json;
pub mod md;

use crate::error::CareerError;
use crate::types::report::AssessmentReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Html,
}

pub fn render(report: &AssessmentReport, format: OutputFormat) -> Result<String, CareerError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(CareerError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
        OutputFormat::Html => Ok(html::to_html(report)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::session::StudentProfile;
    use crate::types::scoring::{ClusterResult, FacetScores, ScoresByGroup};

    pub(crate) fn sample_report() -> AssessmentReport {
        let facets = ScoresByGroup::from([
            (
                "riasec".to_string(),
                FacetScores::from([("Realistic".to_string(), 5.0), ("Artistic".to_string(), 2.0)]),
            ),
            (
                "ai_future".to_string(),
                FacetScores::from([("Curiosity".to_string(), 8.0)]),
            ),
            ("big5".to_string(), FacetScores::new()),
        ]);
        AssessmentReport {
            generated_at: "2026-03-14T09:30:00+00:00".to_string(),
            config_digest: "digest".to_string(),
            student: StudentProfile {
                name: "Meera".to_string(),
                grade: "12".to_string(),
                ..StudentProfile::default()
            },
            facets,
            clusters: vec![
                ClusterResult {
                    cluster: "Engineer".to_string(),
                    score: 2.0,
                    percent: 100,
                    description: "Builds and fixes systems.".to_string(),
                    suggestions: vec!["Join a robotics club".to_string()],
                },
                ClusterResult {
                    cluster: "Designer".to_string(),
                    score: 0.8,
                    percent: 40,
                    description: String::new(),
                    suggestions: Vec::new(),
                },
            ],
            future_fit: Some(64),
            top_clusters: 5,
        }
    }

    #[test]
    fn render_dispatches_every_format() {
        let report = sample_report();
        assert!(render(&report, OutputFormat::Md)
            .expect("md should render")
            .starts_with("# Career Assessment Report"));
        assert!(render(&report, OutputFormat::Json)
            .expect("json should render")
            .starts_with('{'));
        assert!(render(&report, OutputFormat::Html)
            .expect("html should render")
            .starts_with("<html>"));
    }
}
