use std::path::PathBuf;
use thiserror::Error;
use twilio::TwilioError;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("no recording found")]
    NoRecordingFound,

    #[error("Twilio request failed: {0}")]
    Twilio(#[from] TwilioError),

    #[error("failed to fetch recording media: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("path {0} has no file name to use as an object key")]
    InvalidPath(PathBuf),

    #[error("failed to upload {key}: {message}")]
    Upload { key: String, message: String },
}
