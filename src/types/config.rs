use crate::error::CareerError;
use serde::Deserialize;

pub const DEFAULT_ITEMS_PATH: &str = "assessment/items.json";
pub const DEFAULT_MAPPING_PATH: &str = "assessment/mapping.json";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_COHORT_FILE: &str = "responses.csv";
pub const DEFAULT_RESPONSE: u8 = 3;
pub const DEFAULT_TOP_CLUSTERS: usize = 5;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CareerConfig {
    pub assessment: Option<AssessmentConfig>,
    pub scoring: Option<ScoringConfig>,
    pub data: Option<DataConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentConfig {
    pub items: Option<String>,
    pub mapping: Option<String>,
}

/// How FutureFit treats a pool whose facet scores are empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyPoolPolicy {
    /// Empty pool adds 0 and still counts in the denominator.
    #[default]
    Count,
    /// Empty pool is left out of the denominator.
    Exclude,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub default_response: Option<u8>,
    pub future_fit_empty_pools: Option<EmptyPoolPolicy>,
    pub top_clusters: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub dir: Option<String>,
    pub cohort_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringSettings {
    pub default_response: u8,
    pub empty_pool_policy: EmptyPoolPolicy,
    pub top_clusters: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            default_response: DEFAULT_RESPONSE,
            empty_pool_policy: EmptyPoolPolicy::Count,
            top_clusters: DEFAULT_TOP_CLUSTERS,
        }
    }
}

impl CareerConfig {
    pub fn items_path(&self) -> &str {
        self.assessment
            .as_ref()
            .and_then(|assessment| assessment.items.as_deref())
            .unwrap_or(DEFAULT_ITEMS_PATH)
    }

    pub fn mapping_path(&self) -> &str {
        self.assessment
            .as_ref()
            .and_then(|assessment| assessment.mapping.as_deref())
            .unwrap_or(DEFAULT_MAPPING_PATH)
    }

    pub fn data_dir(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|data| data.dir.as_deref())
            .unwrap_or(DEFAULT_DATA_DIR)
    }

    pub fn cohort_file(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|data| data.cohort_file.as_deref())
            .unwrap_or(DEFAULT_COHORT_FILE)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|logging| logging.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn scoring_settings(&self) -> ScoringSettings {
        let defaults = ScoringSettings::default();
        match &self.scoring {
            Some(scoring) => ScoringSettings {
                default_response: scoring
                    .default_response
                    .unwrap_or(defaults.default_response),
                empty_pool_policy: scoring
                    .future_fit_empty_pools
                    .unwrap_or(defaults.empty_pool_policy),
                top_clusters: scoring.top_clusters.unwrap_or(defaults.top_clusters),
            },
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), CareerError> {
        if let Some(scoring) = &self.scoring {
            if let Some(default_response) = scoring.default_response {
                if !(1..=5).contains(&default_response) {
                    return Err(CareerError::ConfigParse(
                        "scoring.default_response must be between 1 and 5".to_string(),
                    ));
                }
            }
            if scoring.top_clusters == Some(0) {
                return Err(CareerError::ConfigParse(
                    "scoring.top_clusters must be greater than 0".to_string(),
                ));
            }
        }

        for (field, value) in [
            ("assessment.items", self.items_path()),
            ("assessment.mapping", self.mapping_path()),
            ("data.dir", self.data_dir()),
            ("data.cohort_file", self.cohort_file()),
        ] {
            if value.trim().is_empty() {
                return Err(CareerError::ConfigParse(format!(
                    "{field} must be a non-empty path"
                )));
            }
        }

        if !matches!(
            self.log_level(),
            "error" | "warn" | "info" | "debug" | "trace" | "off"
        ) {
            return Err(CareerError::ConfigParse(format!(
                "unsupported logging.level: {}",
                self.log_level()
            )));
        }

        Ok(())
    }
}
