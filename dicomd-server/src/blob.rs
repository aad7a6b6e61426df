//! Filesystem blob store for rendered images.
//!
//! Keyed by location strings resolved under a root directory; each location
//! holds one PNG. Writes overwrite, reads distinguish a missing location
//! from I/O and codec failures.

use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Errors that can occur when reading or writing image blobs.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("no image stored at {0}")]
    NotFound(String),

    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// PNG-encode `raster` and persist it at `location`, creating parent
    /// directories as needed. Overwrites any existing blob there.
    pub async fn write_image(
        &self,
        raster: &DynamicImage,
        location: &str,
    ) -> Result<(), BlobError> {
        let mut encoded = Cursor::new(Vec::new());
        raster.write_to(&mut encoded, ImageFormat::Png)?;

        let path = self.resolve(location);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, encoded.into_inner()).await?;

        tracing::debug!(location, "stored image blob");
        Ok(())
    }

    /// Load and decode the blob at `location`.
    pub async fn read_image(&self, location: &str) -> Result<DynamicImage, BlobError> {
        let path = self.resolve(location);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BlobError::NotFound(location.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(image::load_from_memory(&bytes)?)
    }

    fn resolve(&self, location: &str) -> PathBuf {
        self.root.join(location)
    }
}
