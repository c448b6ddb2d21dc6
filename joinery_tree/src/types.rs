// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document: node identifiers, flags, node data and templates.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

/// Identifier for a node in a [`Document`](crate::Document).
///
/// A slot index plus a generation counter. Removing a node frees its slot; a
/// later insert that reuses the slot bumps the generation, so stale ids never
/// alias a different live node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Per-node editing rules.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node accepts children, so it can be a drop parent.
        const CANVAS = 0b0000_0001;
        /// Children flow left to right instead of top to bottom.
        const ROW    = 0b0000_0010;
        /// Node cannot be moved.
        const LOCKED = 0b0000_0100;
    }
}

/// Data stored for each node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSpec {
    /// Component name, e.g. `"Button"`.
    pub name: String,
    /// Last laid-out bounds in client coordinates, used for drop placement.
    pub bounds: Rect,
    /// Editing rules.
    pub flags: NodeFlags,
}

impl NodeSpec {
    /// A leaf node with empty bounds.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Rect::ZERO,
            flags: NodeFlags::empty(),
        }
    }

    /// A node that accepts children.
    pub fn canvas(name: impl Into<String>) -> Self {
        Self::new(name).with_flags(NodeFlags::CANVAS)
    }

    /// Replace the bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Add `flags`.
    #[must_use]
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Returns `true` if the node accepts children.
    pub fn is_canvas(&self) -> bool {
        self.flags.contains(NodeFlags::CANVAS)
    }
}

/// Identifier of a template registered with [`Document::register_template`](crate::Document::register_template).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TemplateId(pub(crate) u32);

/// A detached subtree: the parsed form of a palette item before it is inserted.
///
/// Entry `0` is the root. Every other entry names a parent that precedes it.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    nodes: Vec<(NodeSpec, Option<usize>)>,
}

impl Fragment {
    /// A fragment with just a root.
    pub fn new(root: NodeSpec) -> Self {
        let mut nodes = Vec::new();
        nodes.push((root, None));
        Self { nodes }
    }

    /// Add `spec` as the last child of fragment entry `parent`, returning its entry index.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not an existing entry.
    pub fn push(&mut self, parent: usize, spec: NodeSpec) -> usize {
        assert!(
            parent < self.nodes.len(),
            "fragment parent {parent} does not exist"
        );
        self.nodes.push((spec, Some(parent)));
        self.nodes.len() - 1
    }

    /// Builder form of [`Fragment::push`] for children of the root.
    #[must_use]
    pub fn with_child(mut self, spec: NodeSpec) -> Self {
        self.push(0, spec);
        self
    }

    /// The root entry.
    pub fn root(&self) -> &NodeSpec {
        &self.nodes[0].0
    }

    /// Number of nodes in the fragment.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a fragment has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Entries in insertion order with their parent entry index.
    pub fn entries(&self) -> impl Iterator<Item = (&NodeSpec, Option<usize>)> {
        self.nodes.iter().map(|(spec, parent)| (spec, *parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_spec_has_flag() {
        let spec = NodeSpec::canvas("Container").with_flags(NodeFlags::ROW);
        assert!(spec.is_canvas());
        assert!(spec.flags.contains(NodeFlags::ROW));
        assert!(!NodeSpec::new("Text").is_canvas());
    }

    #[test]
    fn fragment_entries_keep_parent_links() {
        let mut frag = Fragment::new(NodeSpec::canvas("Card"));
        let body = frag.push(0, NodeSpec::canvas("Body"));
        frag.push(body, NodeSpec::new("Text"));

        let parents: Vec<_> = frag.entries().map(|(_, p)| p).collect();
        assert_eq!(parents, [None, Some(0), Some(1)]);
        assert_eq!(frag.root().name, "Card");
        assert_eq!(frag.len(), 3);
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn fragment_rejects_forward_parent() {
        let mut frag = Fragment::new(NodeSpec::canvas("Card"));
        frag.push(4, NodeSpec::new("Text"));
    }
}
