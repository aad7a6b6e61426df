//! HTTP request handlers.
//!
//! This module contains all the request handlers for the API endpoints.

pub mod health;
pub mod image;
pub mod ingest;
pub mod tags;

pub use health::{health, heartbeat};
pub use image::image_handler;
pub use ingest::{ingest_handler, IngestRequest, IngestResponse};
pub use tags::{tags_handler, TagDto, TagsResponse};
