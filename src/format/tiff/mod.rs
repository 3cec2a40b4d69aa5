//! TIFF IFD decoding primitives.
//!
//! EXIF metadata is stored as a small TIFF stream: a header followed by a
//! chain of Image File Directories (IFDs).
//!
//! # Key Concepts
//!
//! - **Byte order**: the header declares its endianness (II = little-endian,
//!   MM = big-endian). All multi-byte values must be read respecting this order.
//!
//! - **IFD entry**: a 12-byte record of tag id, field type, unit count and a
//!   4-byte value field.
//!
//! - **Inline vs offset values**: values of at most 4 bytes are stored in the
//!   value field itself, larger values live at the offset it holds.

mod entry;
mod parser;
mod types;
mod values;

pub use entry::{IfdLocation, IfdTagEntry, IFD_COUNT_SIZE, IFD_ENTRY_SIZE, IFD_NEXT_OFFSET_SIZE};
pub use parser::{ByteOrder, Rational, SRational, TiffHeader, TIFF_HEADER_SIZE};
pub use types::{
    render_ascii, render_undefined, DecodeElementFn, FieldType, Primitive, TagType,
    TagTypeRegistry,
};
pub use values::{TagValue, ValueContext, ValueResolver};
