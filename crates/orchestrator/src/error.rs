#![forbid(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status} ({url})")]
    Status { url: String, status: u16 },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sync task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
