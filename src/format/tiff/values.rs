//! Tag value resolution.
//!
//! A value is stored either inline in the 4-byte value field of its IFD entry
//! (when `unit_count * element_size <= 4`) or in the addressable data at the
//! offset held by that field.
//!
//! [`ValueResolver`] picks the right location, bounds-checks it, and decodes
//! the bytes through the [`TagTypeRegistry`].

use serde::Serialize;

use crate::error::DecodeError;

use super::entry::IfdTagEntry;
use super::parser::ByteOrder;
use super::types::{render_ascii, FieldType, Primitive, TagType, TagTypeRegistry};

// =============================================================================
// TagValue
// =============================================================================

/// A resolved, typed tag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Zero elements
    Empty,

    /// ASCII text, cut at the first NUL
    Ascii(String),

    /// Raw bytes of an UNDEFINED value; interpretation is up to the caller
    Undefined(Vec<u8>),

    /// Exactly one element
    Scalar(Primitive),

    /// More than one element
    List(Vec<Primitive>),
}

// =============================================================================
// ValueContext
// =============================================================================

/// Resolver-only view over one entry's value field and the addressable data.
#[derive(Debug, Clone, Copy)]
pub struct ValueContext<'a> {
    pub unit_count: u32,
    pub value_offset: u32,
    pub raw_value_offset: [u8; 4],
    pub addressable_data: &'a [u8],
    pub byte_order: ByteOrder,
}

impl<'a> ValueContext<'a> {
    /// Build the context for `entry`.
    pub fn for_entry(entry: &IfdTagEntry, addressable_data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self {
            unit_count: entry.unit_count,
            value_offset: entry.value_offset,
            raw_value_offset: entry.raw_value_offset,
            addressable_data,
            byte_order,
        }
    }

    /// Locate the value bytes for elements of `element_size` bytes.
    ///
    /// `tag_id` is only used to label a `TruncatedValue` error.
    pub fn value_bytes(&self, element_size: usize, tag_id: u16) -> Result<&[u8], DecodeError> {
        let byte_count = element_size as u64 * self.unit_count as u64;

        if byte_count <= FieldType::INLINE_THRESHOLD as u64 {
            return Ok(&self.raw_value_offset[..byte_count as usize]);
        }

        let start = self.value_offset as u64;
        let available = self.addressable_data.len() as u64;
        let end = start + byte_count;
        if end > available {
            return Err(DecodeError::TruncatedValue {
                tag_id,
                offset: start,
                byte_count,
                available: available.saturating_sub(start),
            });
        }

        Ok(&self.addressable_data[start as usize..end as usize])
    }
}

// =============================================================================
// ValueResolver
// =============================================================================

/// Resolves entry values against one EXIF block.
///
/// This struct combines the type registry with the block's addressable data
/// and byte order so values can be read without threading them everywhere.
#[derive(Debug, Clone, Copy)]
pub struct ValueResolver<'a> {
    types: &'a TagTypeRegistry,
    addressable_data: &'a [u8],
    byte_order: ByteOrder,
}

impl<'a> ValueResolver<'a> {
    pub fn new(types: &'a TagTypeRegistry, addressable_data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self {
            types,
            addressable_data,
            byte_order,
        }
    }

    /// Context for reading `entry`'s value.
    pub fn context(&self, entry: &IfdTagEntry) -> ValueContext<'a> {
        ValueContext::for_entry(entry, self.addressable_data, self.byte_order)
    }

    /// The exact value bytes of `entry`, inline or from its offset.
    pub fn value_bytes(&self, entry: &IfdTagEntry) -> Result<Vec<u8>, DecodeError> {
        let tag_type = self.types.lookup(entry.tag_type)?;
        let ctx = self.context(entry);
        Ok(ctx.value_bytes(tag_type.size(), entry.tag_id)?.to_vec())
    }

    /// The typed value of `entry`.
    pub fn value(&self, entry: &IfdTagEntry) -> Result<TagValue, DecodeError> {
        let tag_type = self.types.lookup(entry.tag_type)?;
        self.value_with_type(entry, tag_type)
    }

    /// The typed value of `entry` with an already resolved descriptor.
    pub fn value_with_type(
        &self,
        entry: &IfdTagEntry,
        tag_type: &TagType,
    ) -> Result<TagValue, DecodeError> {
        let ctx = self.context(entry);
        let bytes = ctx.value_bytes(tag_type.size(), entry.tag_id)?;

        match tag_type.field_type() {
            FieldType::Undefined => Ok(TagValue::Undefined(bytes.to_vec())),
            _ if entry.unit_count == 0 => Ok(TagValue::Empty),
            FieldType::Ascii => Ok(TagValue::Ascii(render_ascii(bytes))),
            _ => {
                let mut elements =
                    tag_type.decode_elements(bytes, entry.unit_count as usize, self.byte_order)?;
                if elements.len() == 1 {
                    Ok(TagValue::Scalar(elements.remove(0)))
                } else {
                    Ok(TagValue::List(elements))
                }
            }
        }
    }

    /// The display string of `entry`'s value.
    ///
    /// `truncate` caps the number of rendered elements, see
    /// [`TagTypeRegistry::decode_as_string`].
    pub fn value_string(
        &self,
        entry: &IfdTagEntry,
        truncate: Option<usize>,
    ) -> Result<String, DecodeError> {
        let tag_type = self.types.lookup(entry.tag_type)?;
        let ctx = self.context(entry);
        let bytes = ctx.value_bytes(tag_type.size(), entry.tag_id)?;

        self.types.decode_as_string(
            entry.tag_type,
            bytes,
            entry.unit_count,
            self.byte_order,
            truncate,
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
