use thiserror::Error;

/// Failures while pulling data from the stats API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("endpoint {endpoint} returned no result set named {name}")]
    MissingResultSet { endpoint: &'static str, name: &'static str },

    #[error("endpoint {endpoint} returned malformed data: {detail}")]
    MalformedResponse { endpoint: &'static str, detail: String },
}
