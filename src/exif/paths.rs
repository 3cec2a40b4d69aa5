//! The standard IFD tree and path handling.
//!
//! EXIF nests IFDs below the root through pointer tags:
//!
//! ```text
//! IFD                 root (IFD0), followed in the chain by the thumbnail IFD (IFD1)
//! ├── Exif            pointer tag 0x8769
//! │   └── Iop         pointer tag 0xA005 (interoperability)
//! └── GPS             pointer tag 0x8825
//! ```
//!
//! A *canonical* path names a node of this tree (`IFD/Exif/Iop`). A
//! *fully-qualified* path adds the occurrence index of every level
//! (`IFD0/Exif0/Iop0`, or `IFD1` for the thumbnail directory).

use std::collections::HashMap;

use crate::error::DecodeError;

/// Name of the root IFD.
pub const ROOT_IFD: &str = "IFD";

/// Pointer tag to the Exif sub-IFD.
pub const TAG_EXIF_IFD_POINTER: u16 = 0x8769;

/// Pointer tag to the GPS sub-IFD.
pub const TAG_GPS_IFD_POINTER: u16 = 0x8825;

/// Pointer tag to the interoperability sub-IFD.
pub const TAG_INTEROP_IFD_POINTER: u16 = 0xA005;

/// One node of the IFD tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdPathNode {
    /// Last path segment, e.g. `GPS`
    pub name: &'static str,

    /// Canonical path, e.g. `IFD/GPS`
    pub path: String,

    /// (pointer tag id, child canonical path)
    pub children: Vec<(u16, String)>,
}

/// The IFD tree, keyed by canonical path.
///
/// Built once at startup; read-only afterwards.
#[derive(Debug, Clone)]
pub struct IfdMapping {
    nodes: HashMap<String, IfdPathNode>,
}

impl Default for IfdMapping {
    fn default() -> Self {
        Self::with_standard()
    }
}

impl IfdMapping {
    /// An empty mapping with only the root node.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            ROOT_IFD.to_string(),
            IfdPathNode {
                name: ROOT_IFD,
                path: ROOT_IFD.to_string(),
                children: Vec::new(),
            },
        );
        Self { nodes }
    }

    /// The standard EXIF topology.
    pub fn with_standard() -> Self {
        let node = |name: &'static str, path: &str, children: Vec<(u16, String)>| IfdPathNode {
            name,
            path: path.to_string(),
            children,
        };

        let nodes = [
            node(
                ROOT_IFD,
                ROOT_IFD,
                vec![
                    (TAG_EXIF_IFD_POINTER, "IFD/Exif".to_string()),
                    (TAG_GPS_IFD_POINTER, "IFD/GPS".to_string()),
                ],
            ),
            node(
                "Exif",
                "IFD/Exif",
                vec![(TAG_INTEROP_IFD_POINTER, "IFD/Exif/Iop".to_string())],
            ),
            node("GPS", "IFD/GPS", Vec::new()),
            node("Iop", "IFD/Exif/Iop", Vec::new()),
        ];

        Self {
            nodes: nodes
                .into_iter()
                .map(|node| (node.path.clone(), node))
                .collect(),
        }
    }

    /// Register `name` as a child of `parent`, introduced by `pointer_tag`.
    pub fn add(
        &mut self,
        parent: &str,
        name: &'static str,
        pointer_tag: u16,
    ) -> Result<&IfdPathNode, DecodeError> {
        let child_path = format!("{}/{}", parent, name);

        let parent_node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| DecodeError::UnknownIfdPath(parent.to_string()))?;
        parent_node.children.push((pointer_tag, child_path.clone()));

        let node = self
            .nodes
            .entry(child_path.clone())
            .or_insert(IfdPathNode {
                name,
                path: child_path,
                children: Vec::new(),
            });
        Ok(&*node)
    }

    /// Look up a node by canonical path.
    pub fn get(&self, path: &str) -> Result<&IfdPathNode, DecodeError> {
        self.nodes
            .get(path)
            .ok_or_else(|| DecodeError::UnknownIfdPath(path.to_string()))
    }

    /// The child IFD introduced by `pointer_tag` below `parent`, if any.
    pub fn child_path_for(&self, parent: &str, pointer_tag: u16) -> Option<&IfdPathNode> {
        let node = self.nodes.get(parent)?;
        node.children
            .iter()
            .find(|(tag, _)| *tag == pointer_tag)
            .and_then(|(_, child)| self.nodes.get(child))
    }

    /// Convert a fully-qualified path to its canonical form.
    ///
    /// `IFD0/Exif0/Iop0` becomes `IFD/Exif/Iop`, `IFD1` becomes `IFD`. Each
    /// segment must name a child of the previous one.
    pub fn strip_indices(&self, fq_path: &str) -> Result<String, DecodeError> {
        let unknown = || DecodeError::UnknownIfdPath(fq_path.to_string());

        let mut canonical = String::new();
        for segment in fq_path.split('/') {
            let name = segment.trim_end_matches(|c: char| c.is_ascii_digit());
            if name.is_empty() {
                return Err(unknown());
            }

            let candidate = if canonical.is_empty() {
                name.to_string()
            } else {
                format!("{}/{}", canonical, name)
            };

            let known = if canonical.is_empty() {
                candidate == ROOT_IFD
            } else {
                self.nodes
                    .get(&canonical)
                    .is_some_and(|parent| parent.children.iter().any(|(_, c)| *c == candidate))
            };
            if !known {
                return Err(unknown());
            }

            canonical = candidate;
        }

        Ok(canonical)
    }

    /// Build the fully-qualified path of a child directory.
    pub fn child_fq_path(parent_fq: &str, child_name: &str, index: usize) -> String {
        format!("{}/{}{}", parent_fq, child_name, index)
    }

    /// Build the fully-qualified path of a root-chain directory.
    pub fn root_fq_path(index: usize) -> String {
        format!("{}{}", ROOT_IFD, index)
    }
}
