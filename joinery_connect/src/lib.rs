// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=joinery_connect --heading-base-level=0

//! Joinery Connect: wire `joinery_events` handler bundles to rendered elements.
//!
//! A [`Connectors`] registry records, per element key, which handler bundles are
//! bound to it and which element it bubbles to. It then plays the part of the
//! host's event system:
//!
//! - [`Connectors::connect`] runs the bundle's attach step (for example setting
//!   `draggable="true"`) and keeps its detach token.
//! - [`Connectors::disconnect`] runs those detach tokens in reverse order.
//! - [`Connectors::dispatch`] delivers a [`PointerEvent`](joinery_events::dom::PointerEvent)
//!   from the target element outwards, honoring `stopPropagation` and
//!   `stopImmediatePropagation` set by the handlers.
//! - [`Connectors::with_hover_debounce`] coalesces `mouseover` bursts; pending
//!   hovers are delivered by [`Connectors::flush_hover`].
//!
//! ## Minimal example
//!
//! ```
//! use joinery_connect::Connectors;
//! use joinery_events::dom::{EventKind, PointerEvent};
//! use joinery_events::handlers::{Binding, EventHandlers};
//! use joinery_events::session::DragSession;
//! use joinery_events::store::NodeEvent;
//! use joinery_tree::{Document, NodeSpec};
//! use kurbo::Point;
//!
//! let mut doc = Document::new(NodeSpec::canvas("Page"));
//! let root = doc.root();
//! let title = doc.append(root, NodeSpec::new("Title")).unwrap();
//!
//! let mut connectors = Connectors::new();
//! connectors.connect("page", &mut (), Binding::Select(root));
//! connectors.connect("title", &mut (), Binding::Select(title));
//! connectors.set_parent("title", Some("page"));
//!
//! let (mut shadows, mut session) = ((), DragSession::new());
//! let mut handlers = EventHandlers::new(&mut doc, &mut shadows, &mut session);
//! let mut press = PointerEvent::new(EventKind::MouseDown, Point::ZERO);
//! connectors.dispatch(&mut handlers, &"title", &mut press, 0).unwrap();
//!
//! assert_eq!(handlers.store().node_event(NodeEvent::Selected), Some(title));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

mod connectors;

pub use connectors::{Connectors, Delivery};
