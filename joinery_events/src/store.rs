// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator seams: the document store and the shadow factory.
//!
//! The handlers never own document state. Everything they change goes through
//! [`EditorStore`], and everything they ask about the document comes back from it.
//! Errors from the store propagate unmodified out of the handler that triggered them.

use core::fmt;

use kurbo::Point;

use crate::dom::DomEvent;
use crate::indicator::Indicator;
use crate::session::Dragged;

/// Per-node interaction flags a store keeps for its rendering layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeEvent {
    /// The node was selected by a pointer press.
    Selected,
    /// The pointer rests over the node.
    Hovered,
    /// The node is the source of the current drag.
    Dragged,
}

impl NodeEvent {
    /// The event name, e.g. `"selected"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::Hovered => "hovered",
            Self::Dragged => "dragged",
        }
    }
}

impl fmt::Display for NodeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Actions and queries over the editor's node tree.
pub trait EditorStore {
    /// Identifier of a node in the tree.
    type NodeId: Clone + PartialEq + fmt::Debug;
    /// Reference to content that can be parsed into a new subtree (a palette item).
    type Source;
    /// A parsed subtree not yet attached to the document.
    type Tree;
    /// Failure raised by any action or query.
    type Error;

    /// Mark `node` as the holder of `event`, or clear it with `None`.
    fn set_node_event(
        &mut self,
        event: NodeEvent,
        node: Option<&Self::NodeId>,
    ) -> Result<(), Self::Error>;

    /// Show `indicator`, or hide the current one with `None`.
    fn set_indicator(&mut self, indicator: Option<&Indicator<Self::NodeId>>)
    -> Result<(), Self::Error>;

    /// Move an existing node under `parent` at `index`.
    fn move_node(
        &mut self,
        node: &Self::NodeId,
        parent: &Self::NodeId,
        index: usize,
    ) -> Result<(), Self::Error>;

    /// Attach a parsed subtree under `parent` at `index`.
    fn add_tree_at_index(
        &mut self,
        tree: Self::Tree,
        parent: &Self::NodeId,
        index: usize,
    ) -> Result<(), Self::Error>;

    /// Resolve where `dragged` would land when the pointer at `pointer` is over `target`.
    fn drop_placeholder(
        &self,
        dragged: &Dragged<Self::NodeId, Self::Tree>,
        target: &Self::NodeId,
        pointer: Point,
    ) -> Result<Option<Indicator<Self::NodeId>>, Self::Error>;

    /// Parse `source` into a subtree ready for insertion.
    fn parse_tree(&self, source: &Self::Source) -> Result<Self::Tree, Self::Error>;
}

/// Builds the visual clone shown under the pointer during a drag.
pub trait ShadowFactory {
    /// Handle to the created clone.
    type Shadow;

    /// Create a shadow for the drag that `event` starts.
    fn create_shadow<E: DomEvent + ?Sized>(&mut self, event: &E) -> Self::Shadow;
}

/// A shadow factory for hosts that do not render drag images.
impl ShadowFactory for () {
    type Shadow = ();

    fn create_shadow<E: DomEvent + ?Sized>(&mut self, _event: &E) -> Self::Shadow {}
}
