//! dicomd - DICOM ingestion and retrieval service.
//!
//! Decodes DICOM files into a relational catalog of metadata elements and a
//! filesystem store of rendered PNG images, addressable over HTTP by a
//! short identifier.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use dicomd_core::FileDecoder;
use dicomd_server::{
    create_router_with_config, AppState, BlobStore, Config, Fetcher, Ingestor, SqliteCatalog,
};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dicomd_server=info,tower_http=info,info")),
        )
        .init();

    let config = Config::from_env();

    let catalog = SqliteCatalog::open(&config.database_path)
        .await
        .expect("failed to open catalog database");
    let blobs = BlobStore::new(&config.blob_root);

    let state = AppState {
        ingestor: Arc::new(Ingestor::new(
            Arc::new(FileDecoder),
            catalog.clone(),
            blobs.clone(),
        )),
        fetcher: Arc::new(Fetcher::new(catalog, blobs)),
    };

    let app = create_router_with_config(state, &config);

    let addr = config.socket_addr();
    tracing::info!(%addr, "dicomd listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app).await.expect("server error");
}
