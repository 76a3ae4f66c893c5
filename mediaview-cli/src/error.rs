use inquire::error::InquireError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaviewCliError {
    #[error("Input error: {0}")]
    Input(String),
    #[error("{0}")]
    Library(#[from] mediaview::LibraryError),
    #[error("{0}")]
    Mount(#[from] mediaview::fuse::MountError),
    #[error("{0}")]
    Fs(#[from] mediaview::fuse::FsError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    InteractionError(#[from] InquireError),
}

pub type Result<T> = std::result::Result<T, MediaviewCliError>;
