//! Retrieval service: resolve an external identifier to its stored image or
//! its metadata rows.

use image::DynamicImage;
use thiserror::Error;

use crate::blob::{BlobError, BlobStore};
use crate::catalog::{CatalogError, SqliteCatalog, TagEntry};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Blob(#[from] BlobError),
}

pub struct Fetcher {
    catalog: SqliteCatalog,
    blobs: BlobStore,
}

impl Fetcher {
    pub fn new(catalog: SqliteCatalog, blobs: BlobStore) -> Self {
        Self { catalog, blobs }
    }

    /// Look up the record, then read its image from the blob store.
    ///
    /// Not-found from either step propagates; which step failed shows up in
    /// the logs, not in the error kind.
    pub async fn get_image(&self, external_id: &str) -> Result<DynamicImage, FetchError> {
        let record = self.catalog.record_by_external_id(external_id).await?;
        let raster = self.blobs.read_image(&record.image_location).await?;
        Ok(raster)
    }

    /// All metadata rows linked to the record, in extraction order. An
    /// empty vec is a valid answer for a record with no rows.
    pub async fn get_tags(&self, external_id: &str) -> Result<Vec<TagEntry>, FetchError> {
        Ok(self.catalog.tags_by_external_id(external_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use sqlx::sqlite::SqlitePoolOptions;

    async fn fetcher_with_catalog() -> (Fetcher, SqliteCatalog, tempfile::TempDir) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let catalog = SqliteCatalog::from_pool(pool);
        catalog.migrate().await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(catalog.clone(), BlobStore::new(dir.path()));
        (fetcher, catalog, dir)
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_for_both_lookups() {
        let (fetcher, _catalog, _dir) = fetcher_with_catalog().await;

        assert!(matches!(
            fetcher.get_image("nonexistent").await,
            Err(FetchError::Catalog(CatalogError::NotFound(_)))
        ));
        assert!(matches!(
            fetcher.get_tags("nonexistent").await,
            Err(FetchError::Catalog(CatalogError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn record_without_tags_yields_empty_vec() {
        let (fetcher, catalog, _dir) = fetcher_with_catalog().await;

        catalog
            .insert_record("output/image_lone.png", "lone")
            .await
            .unwrap();

        let tags = fetcher.get_tags("lone").await.unwrap();
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn record_without_image_reports_blob_not_found() {
        let (fetcher, catalog, _dir) = fetcher_with_catalog().await;

        catalog
            .insert_record("output/image_lone.png", "lone")
            .await
            .unwrap();

        let err = fetcher.get_image("lone").await;
        assert!(matches!(err, Err(FetchError::Blob(BlobError::NotFound(_)))));
    }
}
