//! Binary format handling.
//!
//! - [`tiff`]: IFD entries, field types and value resolution
//! - [`locate`]: finding the EXIF/TIFF block inside a JPEG, TIFF or other container

pub mod locate;
pub mod tiff;

pub use locate::{locate_ifd, ExifBlock, EXIF_MARKER};
