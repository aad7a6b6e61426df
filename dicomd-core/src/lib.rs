//! dicomd-core - decoding domain for the dicomd imaging service.
//!
//! This crate owns everything the ingestion pipeline needs to know about a
//! DICOM file before it touches a store:
//!
//! - The decoder output contract: a [`Dataset`] of rendered tag/value
//!   elements plus the raster pixel frames extracted from the file
//! - The [`DicomDecoder`] trait and its production implementation
//!   [`FileDecoder`], built on the dicom-rs ecosystem
//! - Short client-facing identifier generation ([`short_id`])
//! - Best-effort tag-name resolution against the standard DICOM data
//!   dictionary ([`tag_name`])
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use dicomd_core::{DicomDecoder, FileDecoder};
//!
//! # fn run() -> dicomd_core::Result<()> {
//! let decoder = FileDecoder;
//! let dataset = decoder.decode(Path::new("scans/IM000001"))?;
//! println!(
//!     "{} elements, {} frames",
//!     dataset.elements.len(),
//!     dataset.frames.len()
//! );
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod decode;
pub mod dictionary;
pub mod error;
pub mod ident;

pub use dataset::{Dataset, TagValue};
pub use decode::{DicomDecoder, FileDecoder};
pub use dictionary::tag_name;
pub use error::{DecodeError, Result};
pub use ident::short_id;

// Re-export the tag type so downstream crates name one `Tag`.
pub use dicom_core::Tag;
