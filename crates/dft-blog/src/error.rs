#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("content index error: {0}")]
    Index(String),

    #[error("invalid content index JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] portfolio_common::error::CommonError),
}
