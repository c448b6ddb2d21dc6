// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: the transient state shared by every handler between
//! `dragstart` and `dragend`.
//!
//! ## Usage
//!
//! 1) Start a drag with [`DragSession::begin`], passing what is dragged and its shadow.
//! 2) On each `dragenter`, record the resolved target with [`DragSession::set_indicator`].
//! 3) On `dragend`, call [`DragSession::take`] to reset the session and obtain
//!    what was dragged plus the last indicator.
//!
//! ## Minimal example
//!
//! ```
//! use joinery_events::indicator::{Indicator, Placement, Position};
//! use joinery_events::session::{DragSession, Dragged};
//!
//! let mut session: DragSession<u32, (), &str> = DragSession::new();
//! assert!(!session.is_dragging());
//!
//! session.begin(Dragged::Node(7), "shadow");
//! session.set_indicator(Some(Indicator::at(Placement::new(1, 0, Position::Before))));
//!
//! let (dragged, indicator) = session.take();
//! assert_eq!(dragged, Some(Dragged::Node(7)));
//! assert!(indicator.is_some());
//! assert!(!session.is_dragging());
//! assert_eq!(session.shadow(), None);
//! ```

use crate::indicator::Indicator;

/// What is being dragged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dragged<N, T> {
    /// An existing node, to be moved on drop.
    Node(N),
    /// A freshly parsed subtree, to be inserted on drop.
    Tree(T),
}

impl<N, T> Dragged<N, T> {
    /// The node id, when an existing node is dragged.
    pub fn node(&self) -> Option<&N> {
        match self {
            Self::Node(id) => Some(id),
            Self::Tree(_) => None,
        }
    }

    /// The parsed subtree, when new content is dragged.
    pub fn tree(&self) -> Option<&T> {
        match self {
            Self::Node(_) => None,
            Self::Tree(tree) => Some(tree),
        }
    }
}

/// Tracks one in-progress drag across event callbacks.
///
/// The dragged element and its shadow are always set and cleared together.
#[derive(Clone, Debug)]
pub struct DragSession<N, T, Sh> {
    dragged: Option<Dragged<N, T>>,
    shadow: Option<Sh>,
    indicator: Option<Indicator<N>>,
}

impl<N, T, Sh> Default for DragSession<N, T, Sh> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, T, Sh> DragSession<N, T, Sh> {
    /// An idle session.
    pub const fn new() -> Self {
        Self {
            dragged: None,
            shadow: None,
            indicator: None,
        }
    }

    /// Start tracking a drag, replacing any previous one.
    ///
    /// A stale indicator from an earlier drag is discarded.
    pub fn begin(&mut self, dragged: Dragged<N, T>, shadow: Sh) {
        self.dragged = Some(dragged);
        self.shadow = Some(shadow);
        self.indicator = None;
    }

    /// Record the most recently resolved drop target.
    pub fn set_indicator(&mut self, indicator: Option<Indicator<N>>) {
        self.indicator = indicator;
    }

    /// What is being dragged, if a drag is in progress.
    pub fn dragged(&self) -> Option<&Dragged<N, T>> {
        self.dragged.as_ref()
    }

    /// The visual clone created for the current drag.
    pub fn shadow(&self) -> Option<&Sh> {
        self.shadow.as_ref()
    }

    /// The last resolved drop target.
    pub fn indicator(&self) -> Option<&Indicator<N>> {
        self.indicator.as_ref()
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    /// Reset the session, returning the dragged element and last indicator.
    ///
    /// The shadow is dropped.
    pub fn take(&mut self) -> (Option<Dragged<N, T>>, Option<Indicator<N>>) {
        self.shadow = None;
        (self.dragged.take(), self.indicator.take())
    }

    /// Reset the session, discarding everything.
    pub fn reset(&mut self) {
        self.dragged = None;
        self.shadow = None;
        self.indicator = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::{Placement, Position};

    type Session = DragSession<u32, &'static str, &'static str>;

    fn indicator() -> Indicator<u32> {
        Indicator::at(Placement::new(1, 1, Position::After))
    }

    #[test]
    fn new_session_is_idle() {
        let session = Session::new();
        assert!(!session.is_dragging());
        assert!(session.shadow().is_none());
        assert!(session.indicator().is_none());
    }

    #[test]
    fn begin_sets_dragged_and_shadow_together() {
        let mut session = Session::new();
        session.begin(Dragged::Node(3901), "a shadow");
        assert_eq!(session.dragged(), Some(&Dragged::Node(3901)));
        assert_eq!(session.shadow(), Some(&"a shadow"));
    }

    #[test]
    fn begin_discards_stale_indicator() {
        let mut session = Session::new();
        session.set_indicator(Some(indicator()));
        session.begin(Dragged::Tree("a node"), "a shadow");
        assert!(session.indicator().is_none());
    }

    #[test]
    fn take_clears_everything() {
        let mut session = Session::new();
        session.begin(Dragged::Node(3901), "a shadow");
        session.set_indicator(Some(indicator()));

        let (dragged, ind) = session.take();

        assert_eq!(dragged, Some(Dragged::Node(3901)));
        assert_eq!(ind, Some(indicator()));
        assert!(!session.is_dragging());
        assert!(session.shadow().is_none());
        assert!(session.indicator().is_none());
    }

    #[test]
    fn take_on_idle_session_is_empty() {
        let mut session = Session::new();
        assert_eq!(session.take(), (None, None));
    }

    #[test]
    fn reset_keeps_shadow_and_dragged_in_step() {
        let mut session = Session::new();
        session.begin(Dragged::Node(1), "a shadow");
        session.reset();
        assert_eq!(session.dragged().is_some(), session.shadow().is_some());
        assert!(!session.is_dragging());
    }

    #[test]
    fn dragged_accessors() {
        let node: Dragged<u32, &str> = Dragged::Node(4);
        let tree: Dragged<u32, &str> = Dragged::Tree("t");
        assert_eq!(node.node(), Some(&4));
        assert_eq!(node.tree(), None);
        assert_eq!(tree.tree(), Some(&"t"));
        assert_eq!(tree.node(), None);
    }
}
