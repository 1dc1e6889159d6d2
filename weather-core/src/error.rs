/// Errors produced by a [`crate::WeatherProvider`] lookup.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The service answered with a non-success status and an explanation.
    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
