use thiserror::Error;

/// Failures while turning a raw DICOM file into a [`crate::Dataset`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read dataset: {0}")]
    Read(String),

    #[error("failed to decode pixel data: {0}")]
    Pixel(String),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
