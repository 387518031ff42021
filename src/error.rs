#[derive(Debug, thiserror::Error)]
pub enum PriceTrackerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl PriceTrackerError {
    /// Whether this failure is an expected, locally handled outcome
    /// (resource absent or request rejected by validation).
    pub fn is_expected_absence(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Validation(_))
    }

    /// HTTP status of the failed response, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(422),
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PriceTrackerError>;
