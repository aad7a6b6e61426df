//! Decoder adapter over the dicom-rs ecosystem.
//!
//! [`FileDecoder`] is the production implementation; the [`DicomDecoder`]
//! trait is the seam that lets the pipeline run against substitutes in
//! tests.

use std::path::Path;

use dicom_core::value::Value;
use dicom_dictionary_std::tags;
use dicom_object::{open_file, DefaultDicomObject};
use dicom_pixeldata::PixelDecoder;
use image::DynamicImage;

use crate::dataset::{Dataset, TagValue};
use crate::error::DecodeError;

/// Turns a raw encoded file into a [`Dataset`].
pub trait DicomDecoder {
    fn decode(&self, path: &Path) -> Result<Dataset, DecodeError>;
}

/// Production decoder reading DICOM files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDecoder;

impl DicomDecoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<Dataset, DecodeError> {
        let obj = open_file(path).map_err(|e| DecodeError::Read(e.to_string()))?;

        let frames = extract_frames(&obj)?;
        let elements = render_elements(&obj);

        tracing::debug!(
            path = %path.display(),
            elements = elements.len(),
            frames = frames.len(),
            "decoded dataset"
        );

        Ok(Dataset { elements, frames })
    }
}

/// Render every data element in iteration order.
///
/// The pixel-data element's bulk value is not rendered into a string; its
/// row keeps an empty value while the frames carry the actual raster.
fn render_elements(obj: &DefaultDicomObject) -> Vec<TagValue> {
    obj.iter()
        .map(|elem| {
            let tag = elem.tag();
            let value = if tag == tags::PIXEL_DATA {
                String::new()
            } else {
                render_value(elem.value())
            };
            TagValue {
                tag,
                vr: elem.vr().to_string().to_owned(),
                value,
            }
        })
        .collect()
}

/// Render a value to its string form; multi-valued elements are joined with
/// the standard backslash delimiter. Nested sequences are not flattened.
fn render_value<I, P>(value: &Value<I, P>) -> String {
    match value {
        Value::Primitive(primitive) => primitive.to_multi_str().join("\\"),
        _ => String::new(),
    }
}

/// Decode every pixel frame to a raster image.
///
/// A file without a pixel-data element yields no frames; that is not an
/// error here, the record simply ends up imageless.
fn extract_frames(obj: &DefaultDicomObject) -> Result<Vec<DynamicImage>, DecodeError> {
    if obj.element(tags::PIXEL_DATA).is_err() {
        return Ok(Vec::new());
    }

    let decoded = obj
        .decode_pixel_data()
        .map_err(|e| DecodeError::Pixel(e.to_string()))?;

    let mut frames = Vec::with_capacity(decoded.number_of_frames() as usize);
    for index in 0..decoded.number_of_frames() {
        let frame = decoded
            .to_dynamic_image(index)
            .map_err(|e| DecodeError::Pixel(e.to_string()))?;
        frames.push(frame);
    }
    Ok(frames)
}
