//! EXIF metadata extraction.
//!
//! This module turns a located TIFF block into a flat list of named, typed
//! entries:
//!
//! - [`paths`]: the standard IFD tree (root, Exif, GPS, Interop)
//! - [`tags`] / [`tag_index`]: tag names per IFD
//! - [`walker`]: depth-first directory traversal with per-entry recovery
//! - [`extract`]: the extraction entry points
//! - [`output`]: JSON shapes for the extracted entries

pub mod extract;
pub mod output;
pub mod paths;
pub mod tag_index;
pub mod tags;
pub mod walker;

pub use extract::{
    extract_from_image, extract_metadata, fallback_tag_name, ExifRegistry, ExtractOptions,
    ResolvedEntry, UnknownTagPolicy,
};
pub use output::{render_entries, OutputFormat};
pub use paths::{
    IfdMapping, IfdPathNode, ROOT_IFD, TAG_EXIF_IFD_POINTER, TAG_GPS_IFD_POINTER,
    TAG_INTEROP_IFD_POINTER,
};
pub use tag_index::{TagDescriptor, TagIndex};
pub use tags::{StandardTag, STANDARD_TAGS};
pub use walker::{IfdVisitor, IfdWalker, WalkSummary};
