// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=joinery_tree --heading-base-level=0

//! Joinery Tree: an in-memory node tree that backs the Joinery interaction handlers.
//!
//! [`Document`] is a small page-builder document: a rooted tree of named nodes,
//! each with laid-out bounds and editing rules ([`NodeFlags`]). It implements
//! [`EditorStore`](joinery_events::store::EditorStore), so the drag, drop and
//! create handlers from `joinery_events` can drive it directly.
//!
//! - Only [`CANVAS`](NodeFlags::CANVAS) nodes accept children.
//! - [`LOCKED`](NodeFlags::LOCKED) nodes cannot be moved; neither can the root.
//! - A node never moves into its own subtree.
//! - Palette content is registered as a [`Fragment`] template and instantiated
//!   with fresh ids on every parse.
//!
//! ## Drop placement
//!
//! The drop placeholder targets the hovered node when it is a canvas, otherwise
//! its parent. Inside that parent, the pointer is compared against each child's
//! midpoint along the flow axis (see [`Document::placement_at`]). Invalid drops
//! still produce an indicator, carrying a
//! [`Rejection`](joinery_events::indicator::Rejection) so the rendering layer
//! can show it as refused.
//!
//! ## Minimal example
//!
//! ```
//! use joinery_events::store::EditorStore;
//! use joinery_tree::{Document, NodeSpec};
//!
//! let mut doc = Document::new(NodeSpec::canvas("Root"));
//! let root = doc.root();
//! let a = doc.append(root, NodeSpec::new("Title")).unwrap();
//! let b = doc.append(root, NodeSpec::new("Body")).unwrap();
//!
//! doc.move_node(&b, &root, 0).unwrap();
//! assert_eq!(doc.children(root), &[b, a]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod error;
mod types;

pub use document::Document;
pub use error::TreeError;
pub use types::{Fragment, NodeFlags, NodeId, NodeSpec, TemplateId};
