//! Metadata extraction entry points.
//!
//! [`extract_metadata`] walks an already located TIFF block and returns one
//! [`ResolvedEntry`] per decodable tag, in directory order. The core never
//! folds entries by name; see [`super::output`] for the presentation choices.

use serde::Serialize;
use tracing::debug;

use crate::error::{DecodeError, ExtractError};
use crate::format::locate_ifd;
use crate::format::tiff::{ByteOrder, IfdTagEntry, TagType, TagTypeRegistry, TagValue, ValueResolver};

use super::paths::IfdMapping;
use super::tag_index::TagIndex;
use super::walker::{IfdVisitor, IfdWalker};

// =============================================================================
// Registry and options
// =============================================================================

/// The immutable lookup tables used for extraction.
///
/// Built once at startup and shared by reference (or behind an `Arc`).
#[derive(Debug, Clone)]
pub struct ExifRegistry {
    pub types: TagTypeRegistry,
    pub ifds: IfdMapping,
    pub tags: TagIndex,
}

impl Default for ExifRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ExifRegistry {
    /// Tables for standard TIFF/EXIF data.
    pub fn standard() -> Self {
        Self {
            types: TagTypeRegistry::standard(),
            ifds: IfdMapping::with_standard(),
            tags: TagIndex::standard(),
        }
    }
}

/// What to do with tags missing from the tag index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownTagPolicy {
    /// Emit the entry, named by its hex id (`0x927c`)
    #[default]
    Emit,

    /// Report the entry as skipped
    Skip,
}

/// Extraction settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Cap on rendered elements per value string; `None` renders everything
    pub max_rendered_values: Option<usize>,

    pub unknown_tags: UnknownTagPolicy,
}

// =============================================================================
// ResolvedEntry
// =============================================================================

/// One decoded tag with its typed value and display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntry {
    pub tag_name: String,
    pub ifd_path: String,
    pub fq_ifd_path: String,
    pub ifd_index: usize,
    pub tag_id: u16,
    pub tag_type_id: u16,
    pub tag_type_name: &'static str,
    pub unit_count: u32,
    pub value: TagValue,
    pub value_string: String,
}

/// Fallback name for tags missing from the index.
pub fn fallback_tag_name(tag_id: u16) -> String {
    format!("0x{:04x}", tag_id)
}

// =============================================================================
// Collector
// =============================================================================

/// Visitor that resolves every entry into a [`ResolvedEntry`].
struct EntryCollector<'r> {
    registry: &'r ExifRegistry,
    options: &'r ExtractOptions,
    entries: Vec<ResolvedEntry>,
}

impl IfdVisitor for EntryCollector<'_> {
    fn visit(
        &mut self,
        entry: &IfdTagEntry,
        tag_type: &TagType,
        resolver: &ValueResolver<'_>,
    ) -> Result<(), DecodeError> {
        let ifd_path = self.registry.ifds.strip_indices(&entry.fq_ifd_path)?;

        let tag_name = match self.registry.tags.get(&ifd_path, entry.tag_id) {
            Ok(descriptor) => {
                if !descriptor.accepts(tag_type.field_type()) {
                    debug!(
                        entry = %entry,
                        tag = %descriptor.name,
                        "Tag stored with a non-standard type"
                    );
                }
                descriptor.name.clone()
            }
            Err(e) => match self.options.unknown_tags {
                UnknownTagPolicy::Emit => fallback_tag_name(entry.tag_id),
                UnknownTagPolicy::Skip => return Err(e),
            },
        };

        let value = resolver.value_with_type(entry, tag_type)?;
        let value_string = resolver.value_string(entry, self.options.max_rendered_values)?;

        self.entries.push(ResolvedEntry {
            tag_name,
            ifd_path,
            fq_ifd_path: entry.fq_ifd_path.clone(),
            ifd_index: entry.ifd_index,
            tag_id: entry.tag_id,
            tag_type_id: tag_type.id(),
            tag_type_name: tag_type.name(),
            unit_count: entry.unit_count,
            value,
            value_string,
        });
        Ok(())
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Extract every entry of the IFD tree rooted at `root_offset`.
///
/// `addressable` is the TIFF block all offsets are relative to.
///
/// # Errors
/// Only structural errors (`OutOfBounds`, `MalformedChain`); undecodable
/// entries are left out of the result.
pub fn extract_metadata(
    registry: &ExifRegistry,
    addressable: &[u8],
    root_offset: u32,
    byte_order: ByteOrder,
    options: &ExtractOptions,
) -> Result<Vec<ResolvedEntry>, DecodeError> {
    let walker = IfdWalker::new(&registry.types, &registry.ifds, addressable, byte_order);
    let mut collector = EntryCollector {
        registry,
        options,
        entries: Vec::new(),
    };

    let summary = walker.walk(root_offset, &mut collector)?;
    debug!(
        resolved = collector.entries.len(),
        skipped = summary.skipped,
        "Extracted EXIF metadata"
    );

    Ok(collector.entries)
}

/// Locate the EXIF block in `image` and extract it.
///
/// # Errors
/// - `ExtractError::NoExif` when the image has no usable EXIF block
/// - `ExtractError::Decode` when the block is structurally broken
pub fn extract_from_image(
    registry: &ExifRegistry,
    image: &[u8],
    options: &ExtractOptions,
) -> Result<Vec<ResolvedEntry>, ExtractError> {
    let block = locate_ifd(image)?;
    let entries = extract_metadata(
        registry,
        block.data,
        block.first_ifd_offset,
        block.byte_order,
        options,
    )?;
    Ok(entries)
}

// =============================================================================
// Tests
// =============================================================================
