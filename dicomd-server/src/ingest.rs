//! Ingestion coordinator.
//!
//! Orchestrates decode -> record registration -> image write -> metadata
//! extraction as a strict sequence. Steps already persisted are not rolled
//! back when a later step fails; a mid-ingest failure can leave an orphaned
//! record with partial metadata, which callers see as the returned error.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use dicomd_core::{short_id, tag_name, DecodeError, DicomDecoder};

use crate::blob::{BlobError, BlobStore};
use crate::catalog::{CatalogError, NewTag, SqliteCatalog};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Blob(#[from] BlobError),
}

pub struct Ingestor {
    decoder: Arc<dyn DicomDecoder + Send + Sync>,
    catalog: SqliteCatalog,
    blobs: BlobStore,
    id_source: fn() -> String,
}

impl Ingestor {
    pub fn new(
        decoder: Arc<dyn DicomDecoder + Send + Sync>,
        catalog: SqliteCatalog,
        blobs: BlobStore,
    ) -> Self {
        Self {
            decoder,
            catalog,
            blobs,
            id_source: short_id,
        }
    }

    /// Replace the identifier source, for deterministic identifiers.
    pub fn with_id_source(mut self, id_source: fn() -> String) -> Self {
        self.id_source = id_source;
        self
    }

    /// Ingest the file at `path`, returning its new external identifier.
    ///
    /// An identifier collision at record registration fails the whole
    /// ingestion; no retry with a fresh identifier happens here. Retry
    /// policy belongs to the caller.
    pub async fn ingest(&self, path: &Path) -> Result<String, IngestError> {
        let dataset = self.decoder.decode(path)?;

        let external_id = (self.id_source)();
        let image_location = format!("output/image_{external_id}.png");
        let record_id = self
            .catalog
            .insert_record(&image_location, &external_id)
            .await?;

        tracing::info!(
            external_id,
            frames = dataset.frames.len(),
            elements = dataset.elements.len(),
            "registered record"
        );

        // Zero frames leaves the record imageless; image retrieval then
        // reports not-found. Multiple frames land at the same location,
        // last one wins.
        for frame in &dataset.frames {
            self.blobs.write_image(frame, &image_location).await?;
        }

        for element in &dataset.elements {
            let name = tag_name(element.tag).unwrap_or_default();
            let tag_id = self
                .catalog
                .insert_tag(NewTag {
                    tag: element.tag.to_string(),
                    vr: element.vr.clone(),
                    value: element.value.clone(),
                    name,
                })
                .await?;
            self.catalog.link_tag(record_id, tag_id).await?;
        }

        Ok(external_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::{DynamicImage, GenericImageView, RgbImage};
    use sqlx::sqlite::SqlitePoolOptions;

    use dicomd_core::{Dataset, Tag, TagValue};

    use crate::fetch::Fetcher;

    /// Decoder returning a fixed two-element dataset with one 100x100 frame.
    struct FixedDecoder {
        frames: usize,
    }

    impl DicomDecoder for FixedDecoder {
        fn decode(&self, _path: &Path) -> dicomd_core::Result<Dataset> {
            let frames = (0..self.frames)
                .map(|_| DynamicImage::ImageRgb8(RgbImage::new(100, 100)))
                .collect();
            Ok(Dataset {
                elements: vec![
                    TagValue {
                        tag: Tag(0x0008, 0x0020),
                        vr: "DA".into(),
                        value: "20240101".into(),
                    },
                    TagValue {
                        tag: Tag(0x0010, 0x0010),
                        vr: "PN".into(),
                        value: "Doe^John".into(),
                    },
                ],
                frames,
            })
        }
    }

    /// Decoder that always fails, as with a malformed file.
    struct FailingDecoder;

    impl DicomDecoder for FailingDecoder {
        fn decode(&self, _path: &Path) -> dicomd_core::Result<Dataset> {
            Err(DecodeError::Read("unexpected end of file".into()))
        }
    }

    async fn catalog() -> SqliteCatalog {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let catalog = SqliteCatalog::from_pool(pool);
        catalog.migrate().await.unwrap();
        catalog
    }

    #[tokio::test]
    async fn ingest_persists_record_tags_and_image() {
        let catalog = catalog().await;
        let dir = tempfile::tempdir().unwrap();
        let blobs = BlobStore::new(dir.path());
        let ingestor = Ingestor::new(
            Arc::new(FixedDecoder { frames: 1 }),
            catalog.clone(),
            blobs.clone(),
        );

        let id = ingestor.ingest(Path::new("scans/im1")).await.unwrap();
        assert!(!id.is_empty());

        let record = catalog.record_by_external_id(&id).await.unwrap();
        assert_eq!(record.image_location, format!("output/image_{id}.png"));

        let tags = catalog.tags_by_external_id(&id).await.unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].tag, "(0008,0020)");
        assert_eq!(tags[0].vr, "DA");
        assert_eq!(tags[0].value, "20240101");
        assert_eq!(tags[0].name, "StudyDate");
        assert_eq!(tags[1].name, "PatientName");

        let raster = blobs.read_image(&record.image_location).await.unwrap();
        assert_eq!(raster.dimensions(), (100, 100));
    }

    #[tokio::test]
    async fn zero_frames_leaves_record_imageless() {
        let catalog = catalog().await;
        let dir = tempfile::tempdir().unwrap();
        let blobs = BlobStore::new(dir.path());
        let ingestor = Ingestor::new(
            Arc::new(FixedDecoder { frames: 0 }),
            catalog.clone(),
            blobs.clone(),
        );

        let id = ingestor.ingest(Path::new("scans/no-pixels")).await.unwrap();

        let fetcher = Fetcher::new(catalog.clone(), blobs);
        let err = fetcher.get_image(&id).await;
        assert!(matches!(
            err,
            Err(crate::fetch::FetchError::Blob(BlobError::NotFound(_)))
        ));

        let tags = fetcher.get_tags(&id).await.unwrap();
        assert_eq!(tags.len(), 2);
    }

    #[tokio::test]
    async fn identifier_collision_fails_whole_ingest() {
        let catalog = catalog().await;
        let dir = tempfile::tempdir().unwrap();
        let ingestor = Ingestor::new(
            Arc::new(FixedDecoder { frames: 1 }),
            catalog.clone(),
            BlobStore::new(dir.path()),
        )
        .with_id_source(|| "fixedid".to_string());

        ingestor.ingest(Path::new("scans/first")).await.unwrap();
        let err = ingestor.ingest(Path::new("scans/second")).await;
        assert!(matches!(
            err,
            Err(IngestError::Catalog(CatalogError::Conflict(_)))
        ));

        // The first ingestion's data stays untouched.
        let tags = catalog.tags_by_external_id("fixedid").await.unwrap();
        assert_eq!(tags.len(), 2);
    }

    #[tokio::test]
    async fn decode_failure_persists_nothing() {
        let catalog = catalog().await;
        let dir = tempfile::tempdir().unwrap();
        let ingestor = Ingestor::new(
            Arc::new(FailingDecoder),
            catalog,
            BlobStore::new(dir.path()),
        );

        let err = ingestor.ingest(Path::new("scans/broken")).await;
        assert!(matches!(err, Err(IngestError::Decode(_))));

        // Nothing reached the blob root.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
