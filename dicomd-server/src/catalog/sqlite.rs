//! SQLite implementation of the catalog.

use std::path::Path;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use dicomd_core::short_id;

use super::{CatalogError, NewTag, Record, TagEntry};

/// SQLite-backed catalog over a connection pool.
///
/// Uniqueness and referential integrity live in the schema; connections run
/// with foreign keys enabled so a link to a missing parent surfaces as
/// [`CatalogError::NotFound`] rather than silently persisting.
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Open (creating if missing) the catalog database at `path` and apply
    /// migrations.
    pub async fn open(path: &Path) -> Result<Self, CatalogError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| CatalogError::Connection(e.to_string()))?;

        let catalog = Self::from_pool(pool);
        catalog.migrate().await?;
        Ok(catalog)
    }

    /// Create a catalog from an existing pool (for testing).
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<(), CatalogError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("catalog schema up to date");
        Ok(())
    }

    /// Register a record, reserving both its identifier and its image
    /// location.
    pub async fn insert_record(
        &self,
        image_location: &str,
        external_id: &str,
    ) -> Result<i64, CatalogError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO records (external_id, image_location, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING id
            "#,
        )
        .bind(external_id)
        .bind(image_location)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_insert(e, "record"))?;

        tracing::debug!(external_id, id, "inserted record");
        Ok(id)
    }

    /// Insert a tag row; the row's own short uid is generated here.
    pub async fn insert_tag(&self, input: NewTag) -> Result<i64, CatalogError> {
        let uid = short_id();
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO tags (uid, tag, vr, value, name)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id
            "#,
        )
        .bind(&uid)
        .bind(&input.tag)
        .bind(&input.vr)
        .bind(&input.value)
        .bind(&input.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_insert(e, "tag"))?;

        Ok(id)
    }

    /// Associate a record with a tag row. Both parents must already be
    /// committed.
    pub async fn link_tag(&self, record_id: i64, tag_id: i64) -> Result<(), CatalogError> {
        sqlx::query("INSERT INTO record_tags (record_id, tag_id) VALUES (?1, ?2)")
            .bind(record_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    CatalogError::NotFound("record or tag")
                }
                _ => CatalogError::Query(e.to_string()),
            })?;
        Ok(())
    }

    pub async fn record_by_external_id(&self, external_id: &str) -> Result<Record, CatalogError> {
        sqlx::query_as::<_, Record>(
            "SELECT id, external_id, image_location, created_at FROM records WHERE external_id = ?1",
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::NotFound("record"))
    }

    /// All tag rows linked to a record, in insertion order.
    ///
    /// A record with no linked rows yields an empty vec; only a missing
    /// record is an error.
    pub async fn tags_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Vec<TagEntry>, CatalogError> {
        let record = self.record_by_external_id(external_id).await?;

        let rows = sqlx::query_as::<_, TagEntry>(
            r#"
            SELECT t.id, t.uid, t.tag, t.vr, t.value, t.name
            FROM tags t
            JOIN record_tags rt ON rt.tag_id = t.id
            WHERE rt.record_id = ?1
            ORDER BY t.id
            "#,
        )
        .bind(record.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

fn classify_insert(err: sqlx::Error, entity: &'static str) -> CatalogError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => CatalogError::Conflict(entity),
        _ => CatalogError::Query(err.to_string()),
    }
}
