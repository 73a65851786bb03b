use crate::session::StudentProfile;
use crate::types::scoring::{ClusterResult, ScoresByGroup};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub generated_at: String,
    pub config_digest: String,
    pub student: StudentProfile,
    pub facets: ScoresByGroup,
    pub clusters: Vec<ClusterResult>,
    pub future_fit: Option<u8>,
    #[serde(skip)]
    pub top_clusters: usize,
}

impl AssessmentReport {
    pub fn top(&self) -> &[ClusterResult] {
        let end = self.top_clusters.min(self.clusters.len());
        &self.clusters[..end]
    }

    pub fn top_cluster(&self) -> Option<&ClusterResult> {
        self.clusters.first()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
    pub blocking: bool,
}

impl Finding {
    pub fn warning(id: &str, title: &str, body: String) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body,
            blocking: false,
        }
    }

    pub fn blocking(id: &str, title: &str, body: String) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body,
            blocking: true,
        }
    }
}
