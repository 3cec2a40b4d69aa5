//! Tag name lookup by (canonical IFD path, tag id).

use std::collections::HashMap;

use crate::error::DecodeError;
use crate::format::tiff::FieldType;

use super::tags::STANDARD_TAGS;

/// Name and accepted types of a known tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDescriptor {
    pub ifd_path: String,
    pub id: u16,
    pub name: String,
    pub types: Vec<FieldType>,
}

impl TagDescriptor {
    /// Whether the standard allows `field_type` for this tag.
    ///
    /// A mismatch is tolerated by extraction; writers disagree often enough.
    pub fn accepts(&self, field_type: FieldType) -> bool {
        self.types.contains(&field_type)
    }
}

/// Index of known tags, keyed by canonical IFD path then tag id.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    by_path: HashMap<String, HashMap<u16, TagDescriptor>>,
}

impl TagIndex {
    /// An index with no tags.
    pub fn new() -> Self {
        Self::default()
    }

    /// An index seeded with every standard TIFF/EXIF/GPS/Interop tag.
    pub fn standard() -> Self {
        let mut index = Self::new();
        for tag in STANDARD_TAGS {
            index.add(TagDescriptor {
                ifd_path: tag.ifd_path.to_string(),
                id: tag.id,
                name: tag.name.to_string(),
                types: tag.types.to_vec(),
            });
        }
        index
    }

    /// Insert or replace a descriptor.
    pub fn add(&mut self, descriptor: TagDescriptor) {
        self.by_path
            .entry(descriptor.ifd_path.clone())
            .or_default()
            .insert(descriptor.id, descriptor);
    }

    /// Look up a tag.
    ///
    /// # Errors
    /// `TagNotFound` when the tag is not defined for `ifd_path`.
    pub fn get(&self, ifd_path: &str, tag_id: u16) -> Result<&TagDescriptor, DecodeError> {
        self.by_path
            .get(ifd_path)
            .and_then(|tags| tags.get(&tag_id))
            .ok_or_else(|| DecodeError::TagNotFound {
                ifd_path: ifd_path.to_string(),
                tag_id,
            })
    }

    /// Number of indexed tags across all IFDs.
    pub fn len(&self) -> usize {
        self.by_path.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
