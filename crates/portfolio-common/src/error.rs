/// Error types shared across the portfolio crates.
///
/// These errors represent failures in infrastructure components (HTTP transport, filesystem)
/// that any site tool may hit. Application-specific errors should be defined in each crate
/// and wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("http status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
