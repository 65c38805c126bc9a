use thiserror::Error;
use vento_model::ModelError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    #[error("Gallery mount point is required")]
    MissingMount,

    #[error("Gallery requires at least one frame")]
    NoFrames,

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
