// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The five interaction handler bundles and the drag-end commit logic.
//!
//! Each [`HandlerKind`] names a bundle of DOM events ([`HandlerKind::events`])
//! plus an optional attach step ([`HandlerKind::attach`]) whose undo is
//! returned as a [`Detach`] token. [`EventHandlers`] holds the callbacks; it
//! borrows the store, the shadow factory and the [`DragSession`] for as long as
//! events are being handled.
//!
//! ## Minimal example
//!
//! ```
//! use joinery_events::dom::{EventKind, PointerEvent};
//! use joinery_events::handlers::{Binding, EventHandlers, HandlerKind};
//! use joinery_events::session::DragSession;
//! # use joinery_events::indicator::Indicator;
//! # use joinery_events::session::Dragged;
//! # use joinery_events::store::{EditorStore, NodeEvent};
//! # use kurbo::Point;
//! # #[derive(Default)] struct Store { selected: Option<u32> }
//! # impl EditorStore for Store {
//! #     type NodeId = u32; type Source = (); type Tree = (); type Error = core::convert::Infallible;
//! #     fn set_node_event(&mut self, e: NodeEvent, n: Option<&u32>) -> Result<(), Self::Error> {
//! #         if e == NodeEvent::Selected { self.selected = n.copied(); } Ok(())
//! #     }
//! #     fn set_indicator(&mut self, _: Option<&Indicator<u32>>) -> Result<(), Self::Error> { Ok(()) }
//! #     fn move_node(&mut self, _: &u32, _: &u32, _: usize) -> Result<(), Self::Error> { Ok(()) }
//! #     fn add_tree_at_index(&mut self, _: (), _: &u32, _: usize) -> Result<(), Self::Error> { Ok(()) }
//! #     fn drop_placeholder(&self, _: &Dragged<u32, ()>, _: &u32, _: Point)
//! #         -> Result<Option<Indicator<u32>>, Self::Error> { Ok(None) }
//! #     fn parse_tree(&self, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! # }
//!
//! let mut store = Store::default();
//! let mut shadows = ();
//! let mut session = DragSession::new();
//! let mut handlers = EventHandlers::new(&mut store, &mut shadows, &mut session);
//!
//! assert_eq!(HandlerKind::Select.events(), &[EventKind::MouseDown]);
//!
//! let mut e = PointerEvent::new(EventKind::MouseDown, Point::ZERO);
//! let handled = handlers.dispatch(&Binding::Select(12), &mut e).unwrap();
//! assert!(handled);
//! # drop(handlers);
//! assert_eq!(store.selected, Some(12));
//! ```

use core::fmt;

use crate::dom::{DRAGGABLE, DomElement, DomEvent, EventKind};
use crate::indicator::Indicator;
use crate::session::{DragSession, Dragged};
use crate::store::{EditorStore, NodeEvent, ShadowFactory};

/// The session type handled by an [`EventHandlers`] over store `S` and shadow factory `F`.
pub type SessionOf<S, F> = DragSession<
    <S as EditorStore>::NodeId,
    <S as EditorStore>::Tree,
    <F as ShadowFactory>::Shadow,
>;

/// The fixed vocabulary of interaction handler bundles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// Select a node on pointer press.
    Select,
    /// Mark the node under the pointer as hovered.
    Hover,
    /// Accept drops and resolve the drop indicator.
    Drop,
    /// Drag an existing node to move it.
    Drag,
    /// Drag palette content to insert a new subtree.
    Create,
}

impl HandlerKind {
    /// All handler kinds.
    pub const ALL: [Self; 5] = [
        Self::Select,
        Self::Hover,
        Self::Drop,
        Self::Drag,
        Self::Create,
    ];

    /// The DOM events this bundle listens to.
    pub const fn events(self) -> &'static [EventKind] {
        match self {
            Self::Select => &[EventKind::MouseDown],
            Self::Hover => &[EventKind::MouseOver],
            Self::Drop => &[EventKind::DragOver, EventKind::DragEnter],
            Self::Drag | Self::Create => &[EventKind::DragStart, EventKind::DragEnd],
        }
    }

    /// Returns `true` if this bundle has a callback for `event`.
    pub fn listens_to(self, event: EventKind) -> bool {
        self.events().contains(&event)
    }

    /// Bundle name, e.g. `"drag"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Hover => "hover",
            Self::Drop => "drop",
            Self::Drag => "drag",
            Self::Create => "create",
        }
    }

    /// Run the bundle's attach step on `element` and return its undo, if any.
    ///
    /// Select and hover never touch the element; pass `&mut ()` when there is none.
    /// Drag sources become draggable until detached. Create sources likewise,
    /// but detaching removes the attribute instead of resetting it.
    pub fn attach<El: DomElement + ?Sized>(self, element: &mut El) -> Option<Detach> {
        match self {
            Self::Select => Some(Detach::ClearNodeEvent(NodeEvent::Selected)),
            Self::Hover => Some(Detach::ClearNodeEvent(NodeEvent::Hovered)),
            Self::Drop => None,
            Self::Drag => {
                element.set_attribute(DRAGGABLE, "true");
                Some(Detach::DisableDraggable)
            }
            Self::Create => {
                element.set_attribute(DRAGGABLE, "true");
                Some(Detach::RemoveDraggable)
            }
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Undo step returned by [`HandlerKind::attach`], run by [`EventHandlers::detach`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[must_use = "a detach token should be run when the element is released"]
pub enum Detach {
    /// Clear the given node event in the store.
    ClearNodeEvent(NodeEvent),
    /// Set `draggable` to `false`.
    DisableDraggable,
    /// Remove the `draggable` attribute.
    RemoveDraggable,
}

/// A handler bundle bound to the value its callbacks receive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Binding<N, Src> {
    /// [`HandlerKind::Select`] for a node.
    Select(N),
    /// [`HandlerKind::Hover`] for a node.
    Hover(N),
    /// [`HandlerKind::Drop`] for a node.
    Drop(N),
    /// [`HandlerKind::Drag`] for a node.
    Drag(N),
    /// [`HandlerKind::Create`] for a palette source.
    Create(Src),
}

impl<N, Src> Binding<N, Src> {
    /// The bundle this binding belongs to.
    pub const fn kind(&self) -> HandlerKind {
        match self {
            Self::Select(_) => HandlerKind::Select,
            Self::Hover(_) => HandlerKind::Hover,
            Self::Drop(_) => HandlerKind::Drop,
            Self::Drag(_) => HandlerKind::Drag,
            Self::Create(_) => HandlerKind::Create,
        }
    }

    /// The bound node, for every binding except [`Binding::Create`].
    pub const fn node(&self) -> Option<&N> {
        match self {
            Self::Select(n) | Self::Hover(n) | Self::Drop(n) | Self::Drag(n) => Some(n),
            Self::Create(_) => None,
        }
    }
}

/// Interaction callbacks over a borrowed store, shadow factory and drag session.
pub struct EventHandlers<'a, S, F>
where
    S: EditorStore,
    F: ShadowFactory,
{
    store: &'a mut S,
    shadows: &'a mut F,
    session: &'a mut SessionOf<S, F>,
}

impl<S, F> fmt::Debug for EventHandlers<'_, S, F>
where
    S: EditorStore,
    F: ShadowFactory,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("dragging", &self.session.is_dragging())
            .finish_non_exhaustive()
    }
}

impl<'a, S, F> EventHandlers<'a, S, F>
where
    S: EditorStore,
    F: ShadowFactory,
{
    /// Build the handlers over their collaborators and the editor's drag session.
    pub fn new(store: &'a mut S, shadows: &'a mut F, session: &'a mut SessionOf<S, F>) -> Self {
        Self {
            store,
            shadows,
            session,
        }
    }

    /// The store the handlers act on.
    pub fn store(&self) -> &S {
        &*self.store
    }

    /// The drag session the handlers share.
    pub fn session(&self) -> &SessionOf<S, F> {
        &*self.session
    }

    /// Run a token returned by [`HandlerKind::attach`].
    pub fn detach<El: DomElement + ?Sized>(
        &mut self,
        detach: Detach,
        element: &mut El,
    ) -> Result<(), S::Error> {
        match detach {
            Detach::ClearNodeEvent(event) => self.store.set_node_event(event, None)?,
            Detach::DisableDraggable => element.set_attribute(DRAGGABLE, "false"),
            Detach::RemoveDraggable => element.remove_attribute(DRAGGABLE),
        }
        Ok(())
    }

    /// Route `event` to the callback `binding` registers for its kind.
    ///
    /// Returns `Ok(false)` when the bundle does not listen to this event.
    pub fn dispatch<E: DomEvent + ?Sized>(
        &mut self,
        binding: &Binding<S::NodeId, S::Source>,
        event: &mut E,
    ) -> Result<bool, S::Error> {
        match (binding, event.kind()) {
            (Binding::Select(node), EventKind::MouseDown) => self.select_mousedown(node)?,
            (Binding::Hover(node), EventKind::MouseOver) => self.hover_mouseover(node)?,
            (Binding::Drop(_), EventKind::DragOver) => self.drop_dragover(event),
            (Binding::Drop(node), EventKind::DragEnter) => self.drop_dragenter(event, node)?,
            (Binding::Drag(node), EventKind::DragStart) => self.drag_dragstart(event, node)?,
            (Binding::Drag(_), EventKind::DragEnd) => self.drag_dragend(event)?,
            (Binding::Create(source), EventKind::DragStart) => {
                self.create_dragstart(event, source)?;
            }
            (Binding::Create(_), EventKind::DragEnd) => self.create_dragend(event)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// `select` / `mousedown`.
    pub fn select_mousedown(&mut self, node: &S::NodeId) -> Result<(), S::Error> {
        self.store.set_node_event(NodeEvent::Selected, Some(node))
    }

    /// `hover` / `mouseover`.
    ///
    /// Unconditional; bursts are coalesced by whoever registers the handler.
    pub fn hover_mouseover(&mut self, node: &S::NodeId) -> Result<(), S::Error> {
        self.store.set_node_event(NodeEvent::Hovered, Some(node))
    }

    /// `drop` / `dragover`: allow dropping here without resolving a placement.
    pub fn drop_dragover<E: DomEvent + ?Sized>(&mut self, event: &mut E) {
        event.prevent_default();
        event.stop_propagation();
    }

    /// `drop` / `dragenter`: resolve and publish the drop indicator for `target`.
    ///
    /// Ignored when no drag is in progress.
    pub fn drop_dragenter<E: DomEvent + ?Sized>(
        &mut self,
        event: &mut E,
        target: &S::NodeId,
    ) -> Result<(), S::Error> {
        event.prevent_default();
        event.stop_propagation();

        let Some(dragged) = self.session.dragged() else {
            tracing::trace!(?target, "dragenter without an active drag");
            return Ok(());
        };
        let pointer = event.client_position();
        // A failed lookup must not leave the previous target committable.
        let indicator = self
            .store
            .drop_placeholder(dragged, target, pointer)
            .inspect_err(|_| self.session.set_indicator(None))?;
        tracing::trace!(?target, ?indicator, "resolved drop indicator");
        self.session.set_indicator(indicator);
        self.store.set_indicator(self.session.indicator())
    }

    /// `drag` / `dragstart`: start moving `node`.
    pub fn drag_dragstart<E: DomEvent + ?Sized>(
        &mut self,
        event: &mut E,
        node: &S::NodeId,
    ) -> Result<(), S::Error> {
        event.stop_propagation();
        event.stop_immediate_propagation();

        self.store.set_node_event(NodeEvent::Dragged, Some(node))?;
        let shadow = self.shadows.create_shadow(&*event);
        tracing::debug!(?node, "drag started");
        self.session.begin(Dragged::Node(node.clone()), shadow);
        Ok(())
    }

    /// `drag` / `dragend`: move the dragged node, if a drop target was resolved.
    pub fn drag_dragend<E: DomEvent + ?Sized>(&mut self, event: &mut E) -> Result<(), S::Error> {
        self.finish_drag(event, Commit::Move)
    }

    /// `create` / `dragstart`: parse `source` and start dragging the new subtree.
    pub fn create_dragstart<E: DomEvent + ?Sized>(
        &mut self,
        event: &mut E,
        source: &S::Source,
    ) -> Result<(), S::Error> {
        event.stop_propagation();
        event.stop_immediate_propagation();

        let tree = self.store.parse_tree(source)?;
        let shadow = self.shadows.create_shadow(&*event);
        tracing::debug!("create drag started");
        self.session.begin(Dragged::Tree(tree), shadow);
        Ok(())
    }

    /// `create` / `dragend`: insert the dragged subtree, if a drop target was resolved.
    pub fn create_dragend<E: DomEvent + ?Sized>(&mut self, event: &mut E) -> Result<(), S::Error> {
        self.finish_drag(event, Commit::Insert)
    }

    /// Reset the session and, when the tracked element suits `commit` and a
    /// committable placement was resolved, apply the move or insertion.
    ///
    /// A refused placement clears the store's indicator and dragged mark
    /// without committing.
    fn finish_drag<E: DomEvent + ?Sized>(
        &mut self,
        event: &mut E,
        commit: Commit,
    ) -> Result<(), S::Error> {
        event.stop_propagation();

        let (dragged, indicator) = self.session.take();
        let (Some(dragged), Some(indicator)) = (dragged, indicator) else {
            tracing::trace!("drag ended without a drop target");
            return Ok(());
        };
        if !commit.accepts(&dragged) {
            tracing::trace!(?commit, "drag ended on a handler for another kind of drag");
            return Ok(());
        }
        let Some(placement) = indicator.into_committable() else {
            tracing::debug!("drag ended on a refused drop target");
            self.store.set_indicator(None)?;
            return self.store.set_node_event(NodeEvent::Dragged, None);
        };

        event.stop_immediate_propagation();
        self.store.set_indicator(None)?;
        self.store.set_node_event(NodeEvent::Dragged, None)?;

        match dragged {
            Dragged::Node(node) => {
                let index = placement.move_index();
                tracing::debug!(?node, parent = ?placement.parent, index, "moving node");
                self.store.move_node(&node, &placement.parent, index)
            }
            Dragged::Tree(tree) => {
                let index = placement.insert_index();
                tracing::debug!(parent = ?placement.parent, index, "inserting tree");
                self.store.add_tree_at_index(tree, &placement.parent, index)
            }
        }
    }
}

/// The tree change a `dragend` handler applies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Commit {
    /// Move an existing node.
    Move,
    /// Insert a parsed subtree.
    Insert,
}

impl Commit {
    fn accepts<N, T>(self, dragged: &Dragged<N, T>) -> bool {
        matches!(
            (self, dragged),
            (Self::Move, Dragged::Node(_)) | (Self::Insert, Dragged::Tree(_))
        )
    }
}
