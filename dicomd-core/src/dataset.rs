//! Decoder output contract.
//!
//! A [`Dataset`] is the only shape through which the rest of the system sees
//! a decoded file: an ordered sequence of rendered data elements and the
//! raster images extracted from its pixel data.

use dicom_core::Tag;
use image::DynamicImage;

/// One decoded data element, rendered to catalog-ready strings.
#[derive(Debug, Clone)]
pub struct TagValue {
    /// Element tag; its canonical string form is `(GGGG,EEEE)`.
    pub tag: Tag,
    /// Declared value representation, as its two-letter code.
    pub vr: String,
    /// Rendered value; multi-valued elements are backslash-delimited.
    pub value: String,
}

/// A fully decoded DICOM file.
///
/// Element order follows the file's element iteration order. `frames` holds
/// zero or more rasters; files without pixel data decode to an empty vec.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub elements: Vec<TagValue>,
    pub frames: Vec<DynamicImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_renders_as_canonical_pair() {
        assert_eq!(Tag(0x0008, 0x0020).to_string(), "(0008,0020)");
        assert_eq!(Tag(0x7FE0, 0x0010).to_string(), "(7FE0,0010)");
    }
}
