//! TIFF header and primitive value decoding.
//!
//! # TIFF Header Structure
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD (4 bytes)
//! ```
//!
//! All offsets inside an EXIF block are relative to the first byte of this
//! header, which makes the header start the origin of the addressable data.

use serde::Serialize;

use crate::error::{DecodeError, LocateError};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Size of classic TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

// =============================================================================
// Rationals
// =============================================================================

/// Unsigned rational: two u32 values, numerator over denominator.
///
/// The denominator may be zero; it is kept as-is and never divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

/// Signed rational: two i32 values, numerator over denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl std::fmt::Display for SRational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF block.
///
/// Every multi-byte read takes the slice, an offset into it, and fails with
/// [`DecodeError::OutOfBounds`] instead of panicking on short input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Detect the byte order from the two marker bytes of a TIFF header.
    pub fn from_marker(marker: [u8; 2]) -> Option<Self> {
        match u16::from_le_bytes(marker) {
            BYTE_ORDER_LITTLE_ENDIAN => Some(ByteOrder::LittleEndian),
            BYTE_ORDER_BIG_ENDIAN => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    /// Borrow `N` bytes at `offset`.
    #[inline]
    fn take<const N: usize>(bytes: &[u8], offset: usize) -> Result<[u8; N], DecodeError> {
        offset
            .checked_add(N)
            .and_then(|end| bytes.get(offset..end))
            .and_then(|slice| slice.try_into().ok())
            .ok_or(DecodeError::OutOfBounds {
                offset: offset as u64,
                requested: N as u64,
                size: bytes.len() as u64,
            })
    }

    #[inline]
    pub fn read_u8(self, bytes: &[u8], offset: usize) -> Result<u8, DecodeError> {
        Ok(Self::take::<1>(bytes, offset)?[0])
    }

    #[inline]
    pub fn read_i8(self, bytes: &[u8], offset: usize) -> Result<i8, DecodeError> {
        Ok(i8::from_ne_bytes(Self::take::<1>(bytes, offset)?))
    }

    /// Read a u16 at `offset` using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8], offset: usize) -> Result<u16, DecodeError> {
        let raw = Self::take::<2>(bytes, offset)?;
        Ok(match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(raw),
            ByteOrder::BigEndian => u16::from_be_bytes(raw),
        })
    }

    #[inline]
    pub fn read_i16(self, bytes: &[u8], offset: usize) -> Result<i16, DecodeError> {
        self.read_u16(bytes, offset).map(|v| v as i16)
    }

    /// Read a u32 at `offset` using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8], offset: usize) -> Result<u32, DecodeError> {
        let raw = Self::take::<4>(bytes, offset)?;
        Ok(match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(raw),
            ByteOrder::BigEndian => u32::from_be_bytes(raw),
        })
    }

    #[inline]
    pub fn read_i32(self, bytes: &[u8], offset: usize) -> Result<i32, DecodeError> {
        self.read_u32(bytes, offset).map(|v| v as i32)
    }

    /// Read an unsigned rational (numerator then denominator) at `offset`.
    pub fn read_rational(self, bytes: &[u8], offset: usize) -> Result<Rational, DecodeError> {
        // Bounds-check the full 8 bytes up front so a half-present rational
        // reports the whole element as missing.
        Self::take::<8>(bytes, offset)?;
        Ok(Rational {
            numerator: self.read_u32(bytes, offset)?,
            denominator: self.read_u32(bytes, offset + 4)?,
        })
    }

    /// Read a signed rational (numerator then denominator) at `offset`.
    pub fn read_srational(self, bytes: &[u8], offset: usize) -> Result<SRational, DecodeError> {
        Self::take::<8>(bytes, offset)?;
        Ok(SRational {
            numerator: self.read_i32(bytes, offset)?,
            denominator: self.read_i32(bytes, offset + 4)?,
        })
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed classic TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the block
    pub byte_order: ByteOrder,

    /// Offset of the root IFD, relative to the header start
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse a TIFF header from the start of `bytes`.
    ///
    /// `bytes` is the whole TIFF block so the first IFD offset can be checked
    /// against its length.
    ///
    /// # Errors
    /// - `FileTooSmall` if there aren't enough bytes for the header
    /// - `InvalidMagic` if byte order bytes are not II or MM
    /// - `InvalidVersion` if version is not 42 (BigTIFF is not used for EXIF)
    /// - `InvalidIfdOffset` if the first IFD offset is outside the block
    pub fn parse(bytes: &[u8]) -> Result<Self, LocateError> {
        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(LocateError::FileTooSmall {
                required: TIFF_HEADER_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        let byte_order = ByteOrder::from_marker([bytes[0], bytes[1]])
            .ok_or(LocateError::InvalidMagic(u16::from_le_bytes([bytes[0], bytes[1]])))?;

        let raw_version = [bytes[2], bytes[3]];
        let raw_offset = [bytes[4], bytes[5], bytes[6], bytes[7]];
        let (version, first_ifd_offset) = match byte_order {
            ByteOrder::LittleEndian => (
                u16::from_le_bytes(raw_version),
                u32::from_le_bytes(raw_offset),
            ),
            ByteOrder::BigEndian => (
                u16::from_be_bytes(raw_version),
                u32::from_be_bytes(raw_offset),
            ),
        };

        if version != VERSION_TIFF {
            return Err(LocateError::InvalidVersion(version));
        }

        if first_ifd_offset as usize >= bytes.len() {
            return Err(LocateError::InvalidIfdOffset(first_ifd_offset as u64));
        }

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
