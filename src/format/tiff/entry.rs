//! IFD directory entries.
//!
//! # Entry Layout (12 bytes)
//!
//! ```text
//! Bytes 0-1:  Tag id
//! Bytes 2-3:  Field type id
//! Bytes 4-7:  Unit count (number of elements, not bytes)
//! Bytes 8-11: Value, if it fits in 4 bytes; otherwise offset to the value
//! ```

use std::fmt;

use crate::error::DecodeError;

use super::parser::ByteOrder;
use super::types::FieldType;

/// Size of one classic TIFF IFD entry in bytes.
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count at the start of an IFD.
pub const IFD_COUNT_SIZE: usize = 2;

/// Size of the next-IFD offset at the end of an IFD.
pub const IFD_NEXT_OFFSET_SIZE: usize = 4;

/// Where in the IFD tree an entry was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdLocation {
    /// Canonical path, e.g. `IFD/Exif`
    pub ifd_path: String,

    /// Path with per-level occurrence indices, e.g. `IFD0/Exif0`
    pub fq_ifd_path: String,

    /// Occurrence index of this IFD among siblings sharing its path
    pub ifd_index: usize,
}

/// One decoded directory slot.
///
/// Created by the walker while scanning a directory; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdTagEntry {
    pub tag_id: u16,

    /// Position of the entry within its directory
    pub tag_index: usize,

    /// Raw field type id (may be unknown to the registry)
    pub tag_type: u16,

    pub unit_count: u32,

    /// The value field read as an offset
    pub value_offset: u32,

    /// The value field as stored, used when the value is inline
    pub raw_value_offset: [u8; 4],

    pub ifd_path: String,
    pub fq_ifd_path: String,
    pub ifd_index: usize,
}

impl IfdTagEntry {
    /// Parse the 12-byte entry at `offset` in `data`.
    pub fn parse(
        data: &[u8],
        offset: usize,
        tag_index: usize,
        byte_order: ByteOrder,
        location: &IfdLocation,
    ) -> Result<Self, DecodeError> {
        let tag_id = byte_order.read_u16(data, offset)?;
        let tag_type = byte_order.read_u16(data, offset + 2)?;
        let unit_count = byte_order.read_u32(data, offset + 4)?;
        let value_offset = byte_order.read_u32(data, offset + 8)?;
        let raw_value_offset = [
            data[offset + 8],
            data[offset + 9],
            data[offset + 10],
            data[offset + 11],
        ];

        Ok(Self {
            tag_id,
            tag_index,
            tag_type,
            unit_count,
            value_offset,
            raw_value_offset,
            ifd_path: location.ifd_path.clone(),
            fq_ifd_path: location.fq_ifd_path.clone(),
            ifd_index: location.ifd_index,
        })
    }

    /// The known field type, if any.
    #[inline]
    pub fn field_type(&self) -> Option<FieldType> {
        FieldType::from_u16(self.tag_type)
    }
}

impl fmt::Display for IfdTagEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = self.field_type().map_or("UNKNOWN", FieldType::name);
        write!(
            f,
            "IfdTagEntry<path={} tag=0x{:04x} type={} count={}>",
            self.fq_ifd_path, self.tag_id, type_name, self.unit_count
        )
    }
}
