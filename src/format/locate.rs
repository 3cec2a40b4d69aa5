//! Locating the EXIF block inside an image container.
//!
//! Supported inputs:
//!
//! - **TIFF**: the file itself is the EXIF block (`II*\0` / `MM\0*`)
//! - **JPEG**: the block is the payload of the first APP1 segment that starts
//!   with `Exif\0\0`
//! - **Anything else**: the first `Exif\0\0` marker followed by a valid TIFF
//!   header (HEIF, PNG eXIf chunks wrapped by some encoders, raw APP1 dumps)
//!
//! The returned [`ExifBlock`] starts at the TIFF byte-order marker. IFD and
//! value offsets are relative to that point, so the block is also the
//! addressable data region for value resolution.

use tracing::debug;

use crate::error::LocateError;

use super::tiff::{ByteOrder, TiffHeader, TIFF_HEADER_SIZE};

// =============================================================================
// Markers
// =============================================================================

/// Prefix of the EXIF payload in APP1 segments
pub const EXIF_MARKER: &[u8; 6] = b"Exif\0\0";

/// Start Of Image marker
const SOI: [u8; 2] = [0xFF, 0xD8];

/// Application segment 1 (EXIF/XMP)
const APP1: u8 = 0xE1;

/// Start Of Scan: entropy-coded data follows, no more metadata segments
const SOS: u8 = 0xDA;

/// End Of Image
const EOI: u8 = 0xD9;

// =============================================================================
// ExifBlock
// =============================================================================

/// Kind of container the EXIF block was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Tiff,
    Jpeg,
    /// Found by scanning for the `Exif\0\0` marker
    Embedded,
}

/// A located EXIF/TIFF block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExifBlock<'a> {
    /// TIFF stream starting at the byte-order marker
    pub data: &'a [u8],

    pub byte_order: ByteOrder,

    /// Offset of the root IFD within `data`
    pub first_ifd_offset: u32,

    pub container: ContainerKind,
}

impl<'a> ExifBlock<'a> {
    fn parse(data: &'a [u8], container: ContainerKind) -> Result<Self, LocateError> {
        let header = TiffHeader::parse(data)?;
        Ok(Self {
            data,
            byte_order: header.byte_order,
            first_ifd_offset: header.first_ifd_offset,
            container,
        })
    }
}

// =============================================================================
// Detection
// =============================================================================

/// Check if bytes start with a classic TIFF header.
pub fn is_tiff_header(bytes: &[u8]) -> bool {
    if bytes.len() < TIFF_HEADER_SIZE {
        return false;
    }

    match ByteOrder::from_marker([bytes[0], bytes[1]]) {
        Some(ByteOrder::LittleEndian) => bytes[2..4] == [0x2A, 0x00],
        Some(ByteOrder::BigEndian) => bytes[2..4] == [0x00, 0x2A],
        None => false,
    }
}

/// Find the EXIF block in `container`.
///
/// # Errors
/// - `NoExifFound` when no candidate block exists
/// - Header errors (`InvalidMagic`, `InvalidVersion`, ...) when a JPEG APP1
///   EXIF segment is present but its TIFF header is broken
pub fn locate_ifd(container: &[u8]) -> Result<ExifBlock<'_>, LocateError> {
    if is_tiff_header(container) {
        debug!(size = container.len(), "Input is a TIFF stream");
        return ExifBlock::parse(container, ContainerKind::Tiff);
    }

    if container.starts_with(&SOI) {
        if let Some(payload) = find_jpeg_exif_payload(container) {
            debug!(size = payload.len(), "Found EXIF APP1 segment");
            return ExifBlock::parse(payload, ContainerKind::Jpeg);
        }
    }

    search_exif_marker(container)
}

/// Walk JPEG marker segments and return the TIFF payload of the EXIF APP1.
fn find_jpeg_exif_payload(data: &[u8]) -> Option<&[u8]> {
    let mut pos = SOI.len();

    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return None;
        }

        let marker = data[pos + 1];

        // Fill bytes before a marker
        if marker == 0xFF {
            pos += 1;
            continue;
        }

        if marker == SOS || marker == EOI {
            return None;
        }

        // Standalone markers carry no length
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            pos += 2;
            continue;
        }

        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if length < 2 {
            return None;
        }

        let segment_end = (pos + 2 + length).min(data.len());
        if marker == APP1 {
            let payload = &data[pos + 4..segment_end];
            if let Some(tiff) = payload.strip_prefix(EXIF_MARKER.as_slice()) {
                return Some(tiff);
            }
        }

        pos += 2 + length;
    }

    None
}

/// Scan for `Exif\0\0` followed by a parseable TIFF header.
fn search_exif_marker(data: &[u8]) -> Result<ExifBlock<'_>, LocateError> {
    let candidates = data
        .windows(EXIF_MARKER.len())
        .enumerate()
        .filter(|(_, window)| *window == EXIF_MARKER.as_slice())
        .map(|(pos, _)| pos + EXIF_MARKER.len());

    for start in candidates {
        match ExifBlock::parse(&data[start..], ContainerKind::Embedded) {
            Ok(block) => {
                debug!(offset = start, "Found EXIF marker");
                return Ok(block);
            }
            Err(e) => debug!(offset = start, error = %e, "Ignoring EXIF marker"),
        }
    }

    Err(LocateError::NoExifFound)
}

// =============================================================================
// Tests
// =============================================================================
