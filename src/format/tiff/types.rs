//! TIFF field types and the type registry.
//!
//! Every IFD entry declares a field type id. The id decides how many bytes one
//! element occupies (and therefore whether the value fits inline in the entry)
//! and how each element is decoded and rendered.
//!
//! The registry is a closed lookup table from type id to [`TagType`]
//! descriptor. It is built once and only read afterwards.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::DecodeError;

use super::parser::{ByteOrder, Rational, SRational};

// =============================================================================
// FieldType
// =============================================================================

/// TIFF field types that determine how values are encoded.
///
/// FLOAT (11), DOUBLE (12) and IFD (13) are not used by the standard EXIF
/// tags and resolve to [`DecodeError::UnknownType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character, NUL terminated (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two LONGs: numerator and denominator (8 bytes)
    Rational = 5,

    /// Signed 8-bit integer (1 byte)
    SByte = 6,

    /// Opaque byte data (1 byte per element)
    Undefined = 7,

    /// Signed 16-bit integer (2 bytes)
    SShort = 8,

    /// Signed 32-bit integer (4 bytes)
    SLong = 9,

    /// Two SLONGs: numerator and denominator (8 bytes)
    SRational = 10,
}

impl FieldType {
    /// Maximum bytes that can be stored inline in a classic TIFF IFD entry.
    pub const INLINE_THRESHOLD: usize = 4;

    /// All supported field types, in id order.
    pub const ALL: [FieldType; 10] = [
        FieldType::Byte,
        FieldType::Ascii,
        FieldType::Short,
        FieldType::Long,
        FieldType::Rational,
        FieldType::SByte,
        FieldType::Undefined,
        FieldType::SShort,
        FieldType::SLong,
        FieldType::SRational,
    ];

    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong => 4,
            FieldType::Rational | FieldType::SRational => 8,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unsupported or unknown type values.
    pub fn from_u16(value: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_u16() == value)
    }

    /// Get the numeric type id.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Human-readable type name.
    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::SByte => "SBYTE",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SShort => "SSHORT",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
        }
    }

    /// Check if `count` values of this type fit inline in an IFD entry.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        self.size_in_bytes() as u64 * count as u64 <= Self::INLINE_THRESHOLD as u64
    }
}

// =============================================================================
// Primitive
// =============================================================================

/// One decoded element of a fixed-width field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Primitive {
    Byte(u8),
    SByte(i8),
    Short(u16),
    SShort(i16),
    Long(u32),
    SLong(i32),
    Rational(Rational),
    SRational(SRational),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Byte(v) => write!(f, "{}", v),
            Primitive::SByte(v) => write!(f, "{}", v),
            Primitive::Short(v) => write!(f, "{}", v),
            Primitive::SShort(v) => write!(f, "{}", v),
            Primitive::Long(v) => write!(f, "{}", v),
            Primitive::SLong(v) => write!(f, "{}", v),
            Primitive::Rational(v) => write!(f, "{}", v),
            Primitive::SRational(v) => write!(f, "{}", v),
        }
    }
}

/// Decodes the element starting at a byte offset.
pub type DecodeElementFn = fn(&[u8], usize, ByteOrder) -> Result<Primitive, DecodeError>;

fn decode_byte(bytes: &[u8], offset: usize, bo: ByteOrder) -> Result<Primitive, DecodeError> {
    bo.read_u8(bytes, offset).map(Primitive::Byte)
}

fn decode_sbyte(bytes: &[u8], offset: usize, bo: ByteOrder) -> Result<Primitive, DecodeError> {
    bo.read_i8(bytes, offset).map(Primitive::SByte)
}

fn decode_short(bytes: &[u8], offset: usize, bo: ByteOrder) -> Result<Primitive, DecodeError> {
    bo.read_u16(bytes, offset).map(Primitive::Short)
}

fn decode_sshort(bytes: &[u8], offset: usize, bo: ByteOrder) -> Result<Primitive, DecodeError> {
    bo.read_i16(bytes, offset).map(Primitive::SShort)
}

fn decode_long(bytes: &[u8], offset: usize, bo: ByteOrder) -> Result<Primitive, DecodeError> {
    bo.read_u32(bytes, offset).map(Primitive::Long)
}

fn decode_slong(bytes: &[u8], offset: usize, bo: ByteOrder) -> Result<Primitive, DecodeError> {
    bo.read_i32(bytes, offset).map(Primitive::SLong)
}

fn decode_rational(bytes: &[u8], offset: usize, bo: ByteOrder) -> Result<Primitive, DecodeError> {
    bo.read_rational(bytes, offset).map(Primitive::Rational)
}

fn decode_srational(bytes: &[u8], offset: usize, bo: ByteOrder) -> Result<Primitive, DecodeError> {
    bo.read_srational(bytes, offset).map(Primitive::SRational)
}

// =============================================================================
// TagType
// =============================================================================

/// Descriptor for one wire type: size, name and element decoder.
#[derive(Debug, Clone, Copy)]
pub struct TagType {
    field_type: FieldType,
    decode_element: Option<DecodeElementFn>,
}

impl TagType {
    fn new(field_type: FieldType) -> Self {
        let decode_element: Option<DecodeElementFn> = match field_type {
            FieldType::Byte | FieldType::Ascii => Some(decode_byte),
            FieldType::SByte => Some(decode_sbyte),
            FieldType::Short => Some(decode_short),
            FieldType::SShort => Some(decode_sshort),
            FieldType::Long => Some(decode_long),
            FieldType::SLong => Some(decode_slong),
            FieldType::Rational => Some(decode_rational),
            FieldType::SRational => Some(decode_srational),
            // No generic rule: callers receive the raw bytes
            FieldType::Undefined => None,
        };

        Self {
            field_type,
            decode_element,
        }
    }

    #[inline]
    pub fn id(&self) -> u16 {
        self.field_type.as_u16()
    }

    #[inline]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.field_type.name()
    }

    /// Fixed size of one element in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.field_type.size_in_bytes()
    }

    /// Decode `count` consecutive elements from the start of `bytes`.
    ///
    /// Returns `UnknownType` for UNDEFINED, which has no element decoder.
    pub fn decode_elements(
        &self,
        bytes: &[u8],
        count: usize,
        byte_order: ByteOrder,
    ) -> Result<Vec<Primitive>, DecodeError> {
        let decode = self
            .decode_element
            .ok_or(DecodeError::UnknownType(self.id()))?;

        (0..count)
            .map(|i| decode(bytes, i * self.size(), byte_order))
            .collect()
    }
}

// =============================================================================
// TagTypeRegistry
// =============================================================================

/// Lookup table from field type id to [`TagType`].
#[derive(Debug, Clone)]
pub struct TagTypeRegistry {
    types: HashMap<u16, TagType>,
}

impl Default for TagTypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl TagTypeRegistry {
    /// Registry with every supported EXIF field type.
    pub fn standard() -> Self {
        let types = FieldType::ALL
            .into_iter()
            .map(|ft| (ft.as_u16(), TagType::new(ft)))
            .collect();
        Self { types }
    }

    /// Look up the descriptor for a type id.
    pub fn lookup(&self, type_id: u16) -> Result<&TagType, DecodeError> {
        self.types
            .get(&type_id)
            .ok_or(DecodeError::UnknownType(type_id))
    }

    /// Size in bytes of one element of `type_id`.
    pub fn element_size(&self, type_id: u16) -> Result<usize, DecodeError> {
        self.lookup(type_id).map(TagType::size)
    }

    /// Render `count` elements of `type_id` read from `bytes`.
    ///
    /// - ASCII is cut at the first NUL.
    /// - UNDEFINED is shown as text when printable, hex otherwise.
    /// - Everything else is a `", "`-separated list.
    ///
    /// With `truncate = Some(n)` only the first `n` elements are rendered,
    /// followed by `...` when more were present. For ASCII and UNDEFINED an
    /// element is a character or byte.
    pub fn decode_as_string(
        &self,
        type_id: u16,
        bytes: &[u8],
        count: u32,
        byte_order: ByteOrder,
        truncate: Option<usize>,
    ) -> Result<String, DecodeError> {
        let tag_type = self.lookup(type_id)?;
        let count = count as usize;
        let byte_count = count.saturating_mul(tag_type.size());

        if bytes.len() < byte_count {
            return Err(DecodeError::OutOfBounds {
                offset: 0,
                requested: byte_count as u64,
                size: bytes.len() as u64,
            });
        }

        match tag_type.field_type() {
            FieldType::Ascii => {
                let text = render_ascii(&bytes[..byte_count]);
                match truncate {
                    Some(n) if text.chars().count() > n => {
                        let mut capped: String = text.chars().take(n).collect();
                        capped.push_str("...");
                        Ok(capped)
                    }
                    _ => Ok(text),
                }
            }
            FieldType::Undefined => {
                let shown = truncate.map_or(count, |n| n.min(count));
                let mut rendered = render_undefined(&bytes[..shown]);
                if shown < count {
                    rendered.push_str("...");
                }
                Ok(rendered)
            }
            _ => {
                let shown = truncate.map_or(count, |n| n.min(count));
                let mut parts: Vec<String> = tag_type
                    .decode_elements(bytes, shown, byte_order)?
                    .iter()
                    .map(Primitive::to_string)
                    .collect();
                if shown < count {
                    parts.push("...".to_string());
                }
                Ok(parts.join(", "))
            }
        }
    }
}

/// Render ASCII bytes up to the first NUL.
pub fn render_ascii(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Render an UNDEFINED blob for display.
///
/// Blobs that are printable ASCII once trailing NULs are dropped (ExifVersion
/// "0230", InteroperabilityVersion "0100") are shown as text, anything else as
/// lowercase hex.
pub fn render_undefined(bytes: &[u8]) -> String {
    let trimmed_len = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    let trimmed = &bytes[..trimmed_len];

    if !trimmed.is_empty() && trimmed.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        String::from_utf8_lossy(trimmed).into_owned()
    } else {
        hex::encode(bytes)
    }
}

// =============================================================================
// Tests
// =============================================================================
