// Errors raised at the fetcher boundary
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("backend answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected payload: {0}")]
    Decode(String),

    #[error("no answer within {0:?}")]
    Timeout(Duration),

    #[error("mount point '{0}' does not exist")]
    MissingMountPoint(String),

    #[error("mount point '{0}' already hosts a chart")]
    MountPointBusy(String),

    #[error("render for epoch {epoch} arrived after the registry moved to {current}")]
    StaleEpoch { epoch: u64, current: u64 },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
