// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connector registry dispatch against a [`Document`] store.

use joinery_connect::{Connectors, Delivery};
use joinery_events::dom::{DRAGGABLE, DomElement, EventKind, PointerEvent};
use joinery_events::handlers::{Binding, EventHandlers};
use joinery_events::session::DragSession;
use joinery_events::store::NodeEvent;
use joinery_tree::{Document, NodeId, NodeSpec, TemplateId};
use kurbo::{Point, Rect};

#[derive(Debug, Default)]
struct Element {
    attributes: Vec<(String, String)>,
}

impl Element {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl DomElement for Element {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.remove_attribute(name);
        self.attributes.push((name.to_string(), value.to_string()));
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }
}

type Registry = Connectors<&'static str, NodeId, TemplateId>;

/// A page canvas holding Title, Text and Button (stacked 40 tall), each element
/// bubbling to "page". Every node gets select, hover, drop and drag bundles.
fn page(mut registry: Registry) -> (Document, [NodeId; 4], Registry) {
    let mut doc = Document::new(NodeSpec::canvas("Page"));
    let root = doc.root();
    let mut ids = [root; 4];
    for (i, name) in ["Title", "Text", "Button"].into_iter().enumerate() {
        let y = i as f64 * 40.0;
        ids[i + 1] = doc
            .append(
                root,
                NodeSpec::new(name).with_bounds(Rect::new(0.0, y, 200.0, y + 40.0)),
            )
            .unwrap();
    }

    let keys = ["page", "title", "text", "button"];
    for (key, id) in keys.into_iter().zip(ids) {
        registry.connect(key, &mut (), Binding::Select(id));
        registry.connect(key, &mut (), Binding::Hover(id));
        registry.connect(key, &mut (), Binding::Drop(id));
        if id != root {
            registry.connect(key, &mut (), Binding::Drag(id));
            registry.set_parent(key, Some("page"));
        }
    }
    (doc, ids, registry)
}

fn at(kind: EventKind, x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(kind, Point::new(x, y))
}

#[test]
fn mousedown_selects_the_innermost_node() {
    let (mut doc, [_, title, ..], mut registry) = page(Registry::new());
    let (mut shadows, mut session) = ((), DragSession::new());
    let mut handlers = EventHandlers::new(&mut doc, &mut shadows, &mut session);

    let mut press = at(EventKind::MouseDown, 10.0, 10.0);
    let delivery = registry
        .dispatch(&mut handlers, &"title", &mut press, 0)
        .unwrap();

    assert_eq!(
        delivery,
        Delivery {
            invoked: 1,
            stopped_at: None
        }
    );
    assert_eq!(handlers.store().node_event(NodeEvent::Selected), Some(title));
}

#[test]
fn dragstart_stops_immediately_at_the_source() {
    let (mut doc, [_, title, ..], mut registry) = page(Registry::new());
    let (mut shadows, mut session) = ((), DragSession::new());
    let mut handlers = EventHandlers::new(&mut doc, &mut shadows, &mut session);

    let mut start = at(EventKind::DragStart, 10.0, 10.0);
    let delivery = registry
        .dispatch(&mut handlers, &"title", &mut start, 0)
        .unwrap();

    assert_eq!(delivery.invoked, 1);
    assert_eq!(delivery.stopped_at, Some("title"));
    assert!(start.immediate_propagation_stopped);
    assert_eq!(handlers.store().node_event(NodeEvent::Dragged), Some(title));
    assert!(handlers.session().is_dragging());
}

#[test]
fn dragenter_is_handled_by_the_nearest_drop_target_only() {
    let (mut doc, [root, ..], mut registry) = page(Registry::new());
    let (mut shadows, mut session) = ((), DragSession::new());
    let mut handlers = EventHandlers::new(&mut doc, &mut shadows, &mut session);

    registry
        .dispatch(&mut handlers, &"title", &mut at(EventKind::DragStart, 10.0, 10.0), 0)
        .unwrap();
    let mut enter = at(EventKind::DragEnter, 10.0, 110.0);
    let delivery = registry
        .dispatch(&mut handlers, &"button", &mut enter, 1)
        .unwrap();

    assert_eq!(delivery.stopped_at, Some("button"));
    assert_eq!(delivery.invoked, 1);
    assert!(enter.default_prevented);
    // Button is a leaf, so the drop lands in its parent.
    let indicator = handlers.store().indicator().unwrap();
    assert_eq!(indicator.committable().map(|p| p.parent), Some(root));
}

#[test]
fn full_move_gesture_through_the_registry() {
    let (mut doc, [root, title, text, button], mut registry) = page(Registry::new());
    let (mut shadows, mut session) = ((), DragSession::new());
    let mut handlers = EventHandlers::new(&mut doc, &mut shadows, &mut session);

    let steps = [
        ("title", at(EventKind::DragStart, 10.0, 10.0)),
        ("text", at(EventKind::DragOver, 10.0, 60.0)),
        ("button", at(EventKind::DragEnter, 10.0, 110.0)),
        ("title", at(EventKind::DragEnd, 10.0, 110.0)),
    ];
    for (now, (target, mut event)) in steps.into_iter().enumerate() {
        registry
            .dispatch(&mut handlers, &target, &mut event, now as u64)
            .unwrap();
    }
    drop(handlers);

    assert_eq!(doc.children(root), &[text, button, title]);
    assert!(!session.is_dragging());
}

#[test]
fn debounced_hover_reports_the_last_node_after_the_quiet_period() {
    let (mut doc, [_, title, ..], mut registry) =
        page(Registry::new().with_hover_debounce(50));
    let (mut shadows, mut session) = ((), DragSession::new());
    let mut handlers = EventHandlers::new(&mut doc, &mut shadows, &mut session);

    registry
        .dispatch(&mut handlers, &"text", &mut at(EventKind::MouseOver, 10.0, 50.0), 0)
        .unwrap();
    registry
        .dispatch(&mut handlers, &"title", &mut at(EventKind::MouseOver, 10.0, 10.0), 10)
        .unwrap();
    assert!(registry.hover_pending());
    assert_eq!(handlers.store().node_event(NodeEvent::Hovered), None);

    assert_eq!(registry.flush_hover(&mut handlers, 40).unwrap(), None);
    assert_eq!(registry.flush_hover(&mut handlers, 60).unwrap(), Some(title));
    assert_eq!(handlers.store().node_event(NodeEvent::Hovered), Some(title));
    assert!(!registry.hover_pending());
}

#[test]
fn disconnect_runs_detach_steps() {
    let mut doc = Document::new(NodeSpec::canvas("Page"));
    let root = doc.root();
    let title = doc.append(root, NodeSpec::new("Title")).unwrap();
    let mut element = Element::default();
    let mut registry = Registry::new().with_hover_debounce(100);

    registry.connect("title", &mut element, Binding::Select(title));
    registry.connect("title", &mut element, Binding::Hover(title));
    registry.connect("title", &mut element, Binding::Drag(title));
    assert_eq!(element.attribute(DRAGGABLE), Some("true"));

    let (mut shadows, mut session) = ((), DragSession::new());
    let mut handlers = EventHandlers::new(&mut doc, &mut shadows, &mut session);
    registry
        .dispatch(&mut handlers, &"title", &mut at(EventKind::MouseDown, 0.0, 0.0), 0)
        .unwrap();
    registry
        .dispatch(&mut handlers, &"title", &mut at(EventKind::MouseOver, 0.0, 0.0), 0)
        .unwrap();
    assert_eq!(handlers.store().node_event(NodeEvent::Selected), Some(title));
    assert!(registry.hover_pending());

    let removed = registry
        .disconnect(&mut handlers, &"title", &mut element)
        .unwrap();

    assert_eq!(removed, 3);
    assert_eq!(element.attribute(DRAGGABLE), Some("false"));
    assert_eq!(handlers.store().node_event(NodeEvent::Selected), None);
    assert!(!registry.hover_pending());
    assert_eq!(registry.bindings(&"title").count(), 0);
}

#[test]
fn events_without_listeners_reach_nobody() {
    let (mut doc, _, mut registry) = page(Registry::new());
    let (mut shadows, mut session) = ((), DragSession::new());
    let mut handlers = EventHandlers::new(&mut doc, &mut shadows, &mut session);

    let mut stray = at(EventKind::MouseDown, 0.0, 0.0);
    let delivery = registry
        .dispatch(&mut handlers, &"unregistered", &mut stray, 0)
        .unwrap();
    assert_eq!(delivery.invoked, 0);
    assert_eq!(delivery.stopped_at, None);
    assert!(!registry.has_listener(&"unregistered", EventKind::DragEnter));
}
