// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::types::{NodeId, TemplateId};

/// Failure of a [`Document`](crate::Document) action or query.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The id is stale or was never issued by this document.
    UnknownNode(NodeId),
    /// No template was registered under this id.
    UnknownTemplate(TemplateId),
    /// The node does not accept children.
    NotCanvas(NodeId),
    /// Moving `node` under `parent` would create a cycle.
    IntoOwnSubtree {
        /// The node being moved.
        node: NodeId,
        /// The requested parent, inside `node`'s subtree.
        parent: NodeId,
    },
    /// The root cannot be moved or removed.
    RootImmovable,
    /// The node is flagged [`LOCKED`](crate::NodeFlags::LOCKED).
    Locked(NodeId),
}

impl fmt::Debug for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "unknown node {id:?}"),
            Self::UnknownTemplate(id) => write!(f, "unknown template {id:?}"),
            Self::NotCanvas(id) => write!(f, "node {id:?} does not accept children"),
            Self::IntoOwnSubtree { node, parent } => {
                write!(f, "cannot move {node:?} into its descendant {parent:?}")
            }
            Self::RootImmovable => f.write_str("the root node cannot be moved or removed"),
            Self::Locked(id) => write!(f, "node {id:?} is locked"),
        }
    }
}

impl core::error::Error for TreeError {}
