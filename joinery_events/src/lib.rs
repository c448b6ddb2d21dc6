// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=joinery_events --heading-base-level=0

//! Joinery Events: drag-and-drop interaction handlers for tree-structured page editors.
//!
//! A page builder lets users select, hover, move and insert nodes of a document
//! tree by pointer. The native events arrive one at a time, but a drag spans many
//! of them: `dragstart` on the source, a stream of `dragenter`/`dragover` on
//! candidate targets, then `dragend` back on the source. This crate holds the
//! state that has to survive between those callbacks and decides when the tree
//! is actually changed.
//!
//! - [`session`]: [`DragSession`](session::DragSession), what is dragged, its shadow, and the last drop indicator.
//! - [`indicator`]: drop placements and the move/insert index rules.
//! - [`handlers`]: the five handler bundles (select, hover, drop, drag, create) and the commit on drag end.
//! - [`store`]: the document store and shadow factory seams the handlers call into.
//! - [`dom`]: event names and the event/element capabilities handlers consume.
//! - [`debounce`]: trailing-edge coalescing for bursty events such as `mouseover`.
//!
//! ## Lifecycle of a drag
//!
//! 1) `drag`/`dragstart` (or `create`/`dragstart`) records the dragged node (or a
//!    freshly parsed subtree) and its shadow in the session.
//! 2) `drop`/`dragenter` asks the store where the drop would land and caches the
//!    resulting [`Indicator`](indicator::Indicator).
//! 3) `dragend` resets the session. When a committable placement was tracked,
//!    `drag`/`dragend` moves the node (shifting `After` placements by one) and
//!    `create`/`dragend` inserts the subtree (at the raw index).
//!
//! A drag that ends without a resolved target only resets the session. One that
//! ends on a refused target also clears the store's indicator and dragged mark.
//!
//! ## Integration
//!
//! The handlers never look anything up from global state. Construct
//! [`EventHandlers`](handlers::EventHandlers) with the store, a shadow factory
//! and the editor's session whenever events are handled; `joinery_connect`
//! wraps this in an element registry with bubbling dispatch, and
//! `joinery_tree` provides an in-memory store.
//!
//! Collaborator errors propagate unchanged; the handlers raise none of their own.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod debounce;
pub mod dom;
pub mod handlers;
pub mod indicator;
pub mod session;
pub mod store;
