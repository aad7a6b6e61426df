//! Best-effort tag-name resolution.

use dicom_core::dictionary::{DataDictionary, DataDictionaryEntry};
use dicom_core::Tag;
use dicom_dictionary_std::StandardDataDictionary;

/// Resolve the human-readable name of a tag from the standard dictionary.
///
/// A miss (private or retired tags) is data, not an error; callers store an
/// empty name in that case.
pub fn tag_name(tag: Tag) -> Option<String> {
    StandardDataDictionary
        .by_tag(tag)
        .map(|entry| entry.alias().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_standard_tags() {
        assert_eq!(tag_name(Tag(0x0008, 0x0020)).as_deref(), Some("StudyDate"));
        assert_eq!(
            tag_name(Tag(0x0010, 0x0010)).as_deref(),
            Some("PatientName")
        );
    }

    #[test]
    fn unknown_tag_resolves_to_none() {
        assert_eq!(tag_name(Tag(0x0009, 0x0001)), None);
    }
}
