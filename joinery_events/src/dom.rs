// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The DOM-facing seam: event names, the event and element capabilities the
//! handlers consume, and a recording [`PointerEvent`] for hosts without a real DOM.

use core::fmt;

use kurbo::Point;

/// Attribute toggled by the drag and create handlers on their source elements.
pub const DRAGGABLE: &str = "draggable";

/// Native events the interaction handlers listen to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `mousedown`
    MouseDown,
    /// `mouseover`
    MouseOver,
    /// `dragover`
    DragOver,
    /// `dragenter`
    DragEnter,
    /// `dragstart`
    DragStart,
    /// `dragend`
    DragEnd,
}

impl EventKind {
    /// All event kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::MouseDown,
        Self::MouseOver,
        Self::DragOver,
        Self::DragEnter,
        Self::DragStart,
        Self::DragEnd,
    ];

    /// The DOM event name, e.g. `"dragstart"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseOver => "mouseover",
            Self::DragOver => "dragover",
            Self::DragEnter => "dragenter",
            Self::DragStart => "dragstart",
            Self::DragEnd => "dragend",
        }
    }

    /// Look up an event kind by its DOM event name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The parts of a native event the handlers read and mutate.
pub trait DomEvent {
    /// Which native event this is.
    fn kind(&self) -> EventKind;

    /// Suppress the host's default action for this event.
    fn prevent_default(&mut self);

    /// Stop the event from bubbling to ancestor elements.
    fn stop_propagation(&mut self);

    /// Stop the event from reaching any further listener, including remaining
    /// listeners on the current element.
    fn stop_immediate_propagation(&mut self);

    /// Pointer position in client coordinates.
    fn client_position(&self) -> Point;
}

/// Attribute mutation on the element a handler bundle is attached to.
pub trait DomElement {
    /// Set `name` to `value`.
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Remove `name` entirely.
    fn remove_attribute(&mut self, name: &str);
}

/// Stands in for "no element" when attaching bundles that never touch one.
impl DomElement for () {
    fn set_attribute(&mut self, _name: &str, _value: &str) {}

    fn remove_attribute(&mut self, _name: &str) {}
}

/// A plain event value that records what handlers did to it.
///
/// Useful for native hosts that synthesize DOM-like events, and for
/// [`joinery_connect`](https://docs.rs/joinery_connect), whose dispatcher reads
/// the propagation flags back.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// The event kind.
    pub kind: EventKind,
    /// Pointer position in client coordinates.
    pub position: Point,
    /// Set by [`DomEvent::prevent_default`].
    pub default_prevented: bool,
    /// Set by [`DomEvent::stop_propagation`] and [`DomEvent::stop_immediate_propagation`].
    pub propagation_stopped: bool,
    /// Set by [`DomEvent::stop_immediate_propagation`].
    pub immediate_propagation_stopped: bool,
}

impl PointerEvent {
    /// A fresh event of `kind` at `position` with no flags set.
    pub fn new(kind: EventKind, position: Point) -> Self {
        Self {
            kind,
            position,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }
}

impl DomEvent for PointerEvent {
    fn kind(&self) -> EventKind {
        self.kind
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    fn stop_immediate_propagation(&mut self) {
        self.immediate_propagation_stopped = true;
        self.propagation_stopped = true;
    }

    fn client_position(&self) -> Point {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EventKind::from_name("drop"), None);
    }

    #[test]
    fn immediate_stop_implies_propagation_stop() {
        let mut e = PointerEvent::new(EventKind::DragStart, Point::ZERO);
        e.stop_immediate_propagation();
        assert!(e.propagation_stopped);
        assert!(e.immediate_propagation_stopped);
        assert!(!e.default_prevented);
    }

    #[test]
    fn plain_stop_leaves_immediate_flag_clear() {
        let mut e = PointerEvent::new(EventKind::DragEnd, Point::new(4.0, 2.0));
        e.stop_propagation();
        assert!(e.propagation_stopped);
        assert!(!e.immediate_propagation_stopped);
        assert_eq!(e.client_position(), Point::new(4.0, 2.0));
    }
}
