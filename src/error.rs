use thiserror::Error;

/// Errors raised while decoding an IFD tree.
///
/// Some variants only affect a single directory entry and are recovered by the
/// walker (see [`DecodeError::is_recoverable`]); the rest abort the whole walk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A read needed more bytes than the slice holds
    #[error("Read out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    OutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// Field type id not present in the type registry
    #[error("Unknown field type: {0}")]
    UnknownType(u16),

    /// IFD path not present in the standard IFD tree
    #[error("Unknown IFD path: {0}")]
    UnknownIfdPath(String),

    /// No tag descriptor for this (IFD path, tag id) pair
    #[error("Tag 0x{tag_id:04x} not found in {ifd_path}")]
    TagNotFound { ifd_path: String, tag_id: u16 },

    /// Declared value size exceeds the addressable data
    #[error(
        "Truncated value for tag 0x{tag_id:04x}: {byte_count} bytes at offset {offset}, only {available} available"
    )]
    TruncatedValue {
        tag_id: u16,
        offset: u64,
        byte_count: u64,
        available: u64,
    },

    /// An IFD offset points back into a directory that was already decoded
    #[error("Malformed IFD chain: directory at offset {0} visited twice")]
    MalformedChain(u32),
}

impl DecodeError {
    /// Whether the error only invalidates the entry being decoded.
    ///
    /// Recoverable errors are reported to the visitor as skips; everything
    /// else is structural and aborts the walk.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DecodeError::UnknownType(_)
                | DecodeError::UnknownIfdPath(_)
                | DecodeError::TagNotFound { .. }
                | DecodeError::TruncatedValue { .. }
        )
    }
}

/// Errors raised while searching a container for its EXIF/TIFF block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    /// No EXIF marker or TIFF header anywhere in the input
    #[error("No EXIF found in image")]
    NoExifFound,

    /// Invalid TIFF magic bytes (not II or MM)
    #[error("Invalid TIFF magic bytes: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Invalid TIFF version number
    #[error("Invalid TIFF version: expected 42, got {0}")]
    InvalidVersion(u16),

    /// Not enough bytes for a TIFF header
    #[error("EXIF block too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: u64, actual: u64 },

    /// First IFD offset points outside the block
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u64),
}

/// Top-level extraction errors.
///
/// Keeps "this image carries no metadata" apart from "the metadata is broken".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The image does not contain a usable EXIF block
    #[error("{0}")]
    NoExif(#[from] LocateError),

    /// The EXIF block was found but its structure is malformed
    #[error("Malformed EXIF: {0}")]
    Decode(#[from] DecodeError),
}

/// Errors returned by the HTTP extraction endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServeError {
    /// The request body is not an image or base64-encoded image
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}
