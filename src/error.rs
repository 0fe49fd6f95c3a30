/// Error type shared by loading, saving and the background workers

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnotatorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported image format '{0}' (expected png, jpg or bmp)")]
    UnsupportedFormat(String),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, AnnotatorError>;
