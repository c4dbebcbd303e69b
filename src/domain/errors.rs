use thiserror::Error;

/// Failures raised before the request ever leaves the process
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Malformed JSON in {source_name}: {source}")]
    MalformedJson {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid headers in {source_name}: {reason}")]
    InvalidHeaders { source_name: String, reason: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported URL scheme in '{0}': only http:// and https:// targets are supported")]
    UnsupportedScheme(String),
}
