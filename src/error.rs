use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareerError {
    #[error("session file not found: {0}")]
    SessionNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("assessment parse error: {0}")]
    AssessmentParse(String),

    #[error("response for {item} must be between 1 and 5 (got {value})")]
    InvalidResponse { item: String, value: i64 },

    #[error("unknown item id: {0}")]
    UnknownItem(String),

    #[error("invalid answer '{0}': expected <item>=<1-5>")]
    InvalidAnswer(String),

    #[error("invalid grade: {0}")]
    InvalidGrade(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, CareerError>;
