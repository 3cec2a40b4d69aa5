//! Depth-first traversal of the IFD tree.
//!
//! The walker decodes each directory of an EXIF block, hands every entry to an
//! [`IfdVisitor`] and descends into the child IFDs named by pointer tags
//! (Exif, GPS, Interop). The root chain is followed through the "next IFD"
//! offset, which is how the thumbnail directory (IFD1) is reached.
//!
//! # Directory Layout
//!
//! ```text
//! 2 bytes        entry count N
//! N * 12 bytes   entries
//! 4 bytes        offset of the next IFD (0 ends the chain)
//! ```
//!
//! # Error Handling
//!
//! Per-entry failures (see [`DecodeError::is_recoverable`]) are reported
//! through [`IfdVisitor::skip`] and the walk moves on to the next entry. A
//! directory that does not fit in the data, or an offset that points back into
//! an already decoded directory, aborts the walk.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::DecodeError;
use crate::format::tiff::{
    ByteOrder, IfdLocation, IfdTagEntry, TagType, TagTypeRegistry, ValueResolver, IFD_COUNT_SIZE,
    IFD_ENTRY_SIZE, IFD_NEXT_OFFSET_SIZE,
};

use super::paths::{IfdMapping, ROOT_IFD};

// =============================================================================
// Visitor
// =============================================================================

/// Receives the entries found by an [`IfdWalker`].
pub trait IfdVisitor {
    /// Handle one entry whose field type is known.
    ///
    /// Returning a recoverable error turns the entry into a skip. Any other
    /// error aborts the walk.
    fn visit(
        &mut self,
        entry: &IfdTagEntry,
        tag_type: &TagType,
        resolver: &ValueResolver<'_>,
    ) -> Result<(), DecodeError>;

    /// Called for an entry that could not be decoded.
    fn skip(&mut self, entry: &IfdTagEntry, error: &DecodeError) {
        let _ = (entry, error);
    }
}

/// Counters for one completed walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Directories decoded
    pub ifd_count: usize,

    /// Entries read, visited and skipped alike
    pub entry_count: usize,

    /// Entries reported through [`IfdVisitor::skip`]
    pub skipped: usize,
}

// =============================================================================
// Walker
// =============================================================================

/// Per-walk bookkeeping.
#[derive(Debug, Default)]
struct WalkState {
    /// Directory offsets already decoded
    visited: HashSet<u32>,

    /// Occurrences so far per canonical IFD path
    indices: HashMap<String, usize>,

    summary: WalkSummary,
}

impl WalkState {
    fn next_index(&mut self, ifd_path: &str) -> usize {
        let counter = self.indices.entry(ifd_path.to_string()).or_insert(0);
        let index = *counter;
        *counter += 1;
        index
    }
}

/// Walks the IFD tree of one EXIF block.
#[derive(Debug, Clone, Copy)]
pub struct IfdWalker<'a> {
    types: &'a TagTypeRegistry,
    ifds: &'a IfdMapping,
    data: &'a [u8],
    byte_order: ByteOrder,
}

impl<'a> IfdWalker<'a> {
    /// Create a walker over `data`, the addressable TIFF block.
    pub fn new(
        types: &'a TagTypeRegistry,
        ifds: &'a IfdMapping,
        data: &'a [u8],
        byte_order: ByteOrder,
    ) -> Self {
        Self {
            types,
            ifds,
            data,
            byte_order,
        }
    }

    /// Walk the root chain starting at `root_offset`.
    ///
    /// # Errors
    /// - `OutOfBounds` if a directory does not fit in the data
    /// - `MalformedChain` if any directory offset is reached twice
    /// - Any non-recoverable error returned by the visitor
    pub fn walk<V: IfdVisitor>(
        &self,
        root_offset: u32,
        visitor: &mut V,
    ) -> Result<WalkSummary, DecodeError> {
        let resolver = ValueResolver::new(self.types, self.data, self.byte_order);
        let mut state = WalkState::default();

        let mut offset = root_offset;
        loop {
            let index = state.next_index(ROOT_IFD);
            let location = IfdLocation {
                ifd_path: ROOT_IFD.to_string(),
                fq_ifd_path: IfdMapping::root_fq_path(index),
                ifd_index: index,
            };

            let next = self.walk_ifd(offset, &location, &resolver, &mut state, visitor)?;
            if next == 0 {
                break;
            }
            debug!(offset = next, "Following next IFD in root chain");
            offset = next;
        }

        debug!(
            ifds = state.summary.ifd_count,
            entries = state.summary.entry_count,
            skipped = state.summary.skipped,
            "IFD walk complete"
        );
        Ok(state.summary)
    }

    /// Decode the directory at `offset` and its children.
    ///
    /// Returns the directory's "next IFD" offset.
    fn walk_ifd<V: IfdVisitor>(
        &self,
        offset: u32,
        location: &IfdLocation,
        resolver: &ValueResolver<'_>,
        state: &mut WalkState,
        visitor: &mut V,
    ) -> Result<u32, DecodeError> {
        if !state.visited.insert(offset) {
            return Err(DecodeError::MalformedChain(offset));
        }

        let base = offset as usize;
        let entry_count = self.byte_order.read_u16(self.data, base)? as usize;
        let entries_start = base + IFD_COUNT_SIZE;

        // The whole table must be present before any entry is reported
        let table_size = entry_count * IFD_ENTRY_SIZE + IFD_NEXT_OFFSET_SIZE;
        if entries_start + table_size > self.data.len() {
            return Err(DecodeError::OutOfBounds {
                offset: entries_start as u64,
                requested: table_size as u64,
                size: self.data.len() as u64,
            });
        }

        debug!(
            ifd = %location.fq_ifd_path,
            offset,
            entries = entry_count,
            "Decoding IFD"
        );
        state.summary.ifd_count += 1;

        for tag_index in 0..entry_count {
            let entry_offset = entries_start + tag_index * IFD_ENTRY_SIZE;
            let entry =
                IfdTagEntry::parse(self.data, entry_offset, tag_index, self.byte_order, location)?;
            state.summary.entry_count += 1;

            let outcome = self
                .types
                .lookup(entry.tag_type)
                .and_then(|tag_type| visitor.visit(&entry, tag_type, resolver));

            match outcome {
                Ok(()) => {}
                Err(e) if e.is_recoverable() => {
                    debug!(entry = %entry, error = %e, "Skipping entry");
                    state.summary.skipped += 1;
                    visitor.skip(&entry, &e);
                }
                Err(e) => return Err(e),
            }

            if let Some(child) = self.ifds.child_path_for(&location.ifd_path, entry.tag_id) {
                if entry.value_offset == 0 {
                    debug!(entry = %entry, "Ignoring null IFD pointer");
                    continue;
                }

                let child_index = state.next_index(&child.path);
                let child_location = IfdLocation {
                    ifd_path: child.path.clone(),
                    fq_ifd_path: IfdMapping::child_fq_path(
                        &location.fq_ifd_path,
                        child.name,
                        child_index,
                    ),
                    ifd_index: child_index,
                };

                // Child IFDs do not chain
                self.walk_ifd(
                    entry.value_offset,
                    &child_location,
                    resolver,
                    state,
                    visitor,
                )?;
            }
        }

        self.byte_order
            .read_u32(self.data, entries_start + entry_count * IFD_ENTRY_SIZE)
    }
}

// =============================================================================
// Tests
// =============================================================================
