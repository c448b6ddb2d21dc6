// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element registry and bubbling dispatch.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use joinery_events::debounce::Debounce;
use joinery_events::dom::{DomElement, EventKind, PointerEvent};
use joinery_events::handlers::{Binding, Detach, EventHandlers, HandlerKind};
use joinery_events::store::{EditorStore, ShadowFactory};
use smallvec::SmallVec;

#[derive(Clone, Debug)]
struct Connection<N, Src> {
    binding: Binding<N, Src>,
    detach: Option<Detach>,
}

#[derive(Clone, Debug)]
struct Entry<K, N, Src> {
    parent: Option<K>,
    connections: SmallVec<[Connection<N, Src>; 2]>,
}

impl<K, N, Src> Default for Entry<K, N, Src> {
    fn default() -> Self {
        Self {
            parent: None,
            connections: SmallVec::new(),
        }
    }
}

/// Result of [`Connectors::dispatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery<K> {
    /// Number of handler callbacks that ran (debounced hovers count when queued).
    pub invoked: usize,
    /// Element at which propagation was stopped, if any.
    pub stopped_at: Option<K>,
}

/// Handler bindings per element, plus the element hierarchy events bubble through.
///
/// `K` identifies elements, `N` nodes, `Src` palette sources.
#[derive(Clone, Debug)]
pub struct Connectors<K, N, Src> {
    elements: HashMap<K, Entry<K, N, Src>>,
    hover: Option<Debounce<N>>,
}

impl<K, N, Src> Default for Connectors<K, N, Src> {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
            hover: None,
        }
    }
}

impl<K, N, Src> Connectors<K, N, Src>
where
    K: Clone + Eq + Hash + Debug,
    N: Clone + PartialEq + Debug,
{
    /// An empty registry that calls hover callbacks immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Coalesce `mouseover` bursts: the hover callback runs for the most recent
    /// node once `delay` ticks pass without another `mouseover`.
    ///
    /// Pending hovers are delivered by [`Connectors::flush_hover`].
    #[must_use]
    pub fn with_hover_debounce(mut self, delay: u64) -> Self {
        self.hover = Some(Debounce::new(delay));
        self
    }

    /// Declare `parent` as the element `child` bubbles to.
    pub fn set_parent(&mut self, child: K, parent: Option<K>) {
        self.elements.entry(child).or_default().parent = parent;
    }

    /// Attach `binding` to `element`, registered under `key`.
    ///
    /// Runs the bundle's attach step on `element` right away.
    pub fn connect<El: DomElement + ?Sized>(
        &mut self,
        key: K,
        element: &mut El,
        binding: Binding<N, Src>,
    ) {
        let detach = binding.kind().attach(element);
        tracing::trace!(?key, kind = %binding.kind(), "connected");
        self.elements
            .entry(key)
            .or_default()
            .connections
            .push(Connection { binding, detach });
    }

    /// Remove every binding registered under `key`, running their detach steps
    /// in reverse order of attachment. The element keeps its place in the hierarchy.
    ///
    /// Returns how many bindings were removed.
    pub fn disconnect<S, F, El>(
        &mut self,
        handlers: &mut EventHandlers<'_, S, F>,
        key: &K,
        element: &mut El,
    ) -> Result<usize, S::Error>
    where
        S: EditorStore<NodeId = N, Source = Src>,
        F: ShadowFactory,
        El: DomElement + ?Sized,
    {
        let Some(entry) = self.elements.get_mut(key) else {
            return Ok(0);
        };
        let connections = core::mem::take(&mut entry.connections);
        let removed = connections.len();
        for connection in connections.into_iter().rev() {
            if let (Binding::Hover(node), Some(hover)) = (&connection.binding, self.hover.as_mut())
            {
                hover.cancel_if(|pending| pending == node);
            }
            if let Some(detach) = connection.detach {
                handlers.detach(detach, element)?;
            }
        }
        tracing::trace!(?key, removed, "disconnected");
        Ok(removed)
    }

    /// Bindings registered under `key`, in attachment order.
    pub fn bindings(&self, key: &K) -> impl Iterator<Item = &Binding<N, Src>> {
        self.elements
            .get(key)
            .into_iter()
            .flat_map(|entry| entry.connections.iter().map(|c| &c.binding))
    }

    /// The bubbling path from `target` up to its outermost ancestor.
    pub fn path(&self, target: &K) -> SmallVec<[K; 8]> {
        let mut path: SmallVec<[K; 8]> = SmallVec::new();
        let mut cursor = Some(target.clone());
        while let Some(key) = cursor {
            // A malformed hierarchy could loop; no valid path is longer than the registry.
            if path.len() > self.elements.len() || path.contains(&key) {
                break;
            }
            cursor = self.elements.get(&key).and_then(|e| e.parent.clone());
            path.push(key);
        }
        path
    }

    /// Deliver `event` from `target` outwards to every listening binding.
    ///
    /// Bindings on one element run in attachment order. A handler that stops
    /// immediate propagation ends delivery at once; one that stops propagation
    /// lets the rest of the current element's bindings run, then ends delivery.
    ///
    /// Select and hover are delivered to the nearest bound node only, so a
    /// press or hover over nested nodes always reports the innermost one.
    pub fn dispatch<S, F>(
        &mut self,
        handlers: &mut EventHandlers<'_, S, F>,
        target: &K,
        event: &mut PointerEvent,
        now: u64,
    ) -> Result<Delivery<K>, S::Error>
    where
        S: EditorStore<NodeId = N, Source = Src>,
        F: ShadowFactory,
    {
        let mut delivery = Delivery {
            invoked: 0,
            stopped_at: None,
        };
        let mut nearest_taken = false;

        'bubble: for key in self.path(target) {
            let Some(entry) = self.elements.get(&key) else {
                continue;
            };
            for connection in &entry.connections {
                let kind = connection.binding.kind();
                if !kind.listens_to(event.kind) {
                    continue;
                }
                if matches!(kind, HandlerKind::Select | HandlerKind::Hover) {
                    if nearest_taken {
                        continue;
                    }
                    nearest_taken = true;
                }

                match (&connection.binding, self.hover.as_mut()) {
                    (Binding::Hover(node), Some(hover)) => hover.push(node.clone(), now),
                    _ => {
                        handlers.dispatch(&connection.binding, event)?;
                    }
                }
                delivery.invoked += 1;

                if event.immediate_propagation_stopped {
                    delivery.stopped_at = Some(key);
                    break 'bubble;
                }
            }
            if event.propagation_stopped {
                delivery.stopped_at = Some(key);
                break;
            }
        }

        tracing::trace!(
            event = %event.kind,
            invoked = delivery.invoked,
            stopped_at = ?delivery.stopped_at,
            "dispatched"
        );
        Ok(delivery)
    }

    /// Run the hover callback for a debounced `mouseover` that is due at `now`.
    ///
    /// Returns the hovered node, if one was delivered.
    pub fn flush_hover<S, F>(
        &mut self,
        handlers: &mut EventHandlers<'_, S, F>,
        now: u64,
    ) -> Result<Option<N>, S::Error>
    where
        S: EditorStore<NodeId = N, Source = Src>,
        F: ShadowFactory,
    {
        let Some(node) = self.hover.as_mut().and_then(|h| h.poll(now)) else {
            return Ok(None);
        };
        handlers.hover_mouseover(&node)?;
        Ok(Some(node))
    }

    /// Returns `true` while a debounced hover waits to be flushed.
    pub fn hover_pending(&self) -> bool {
        self.hover.as_ref().is_some_and(Debounce::is_pending)
    }

    /// Whether `event` has any listener on the bubbling path from `target`.
    pub fn has_listener(&self, target: &K, event: EventKind) -> bool {
        self.path(target)
            .iter()
            .any(|key| self.bindings(key).any(|b| b.kind().listens_to(event)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Registry = Connectors<&'static str, u32, &'static str>;

    #[test]
    fn path_walks_to_outermost_ancestor() {
        let mut reg = Registry::new();
        reg.set_parent("button", Some("card"));
        reg.set_parent("card", Some("page"));
        assert_eq!(reg.path(&"button").as_slice(), &["button", "card", "page"]);
        assert_eq!(reg.path(&"page").as_slice(), &["page"]);
    }

    #[test]
    fn path_of_unknown_element_is_itself() {
        let reg = Registry::new();
        assert_eq!(reg.path(&"ghost").as_slice(), &["ghost"]);
    }

    #[test]
    fn path_stops_on_cycles() {
        let mut reg = Registry::new();
        reg.set_parent("a", Some("b"));
        reg.set_parent("b", Some("a"));
        assert_eq!(reg.path(&"a").as_slice(), &["a", "b"]);
    }

    #[test]
    fn connect_runs_attach_and_records_binding() {
        let mut reg = Registry::new();
        reg.connect("card", &mut (), Binding::Select(1));
        reg.connect("card", &mut (), Binding::Drag(1));
        let kinds: SmallVec<[HandlerKind; 2]> = reg.bindings(&"card").map(Binding::kind).collect();
        assert_eq!(kinds.as_slice(), &[HandlerKind::Select, HandlerKind::Drag]);
        assert!(reg.has_listener(&"card", EventKind::DragStart));
        assert!(!reg.has_listener(&"card", EventKind::DragEnter));
    }

    #[test]
    fn listeners_are_found_on_ancestors() {
        let mut reg = Registry::new();
        reg.set_parent("text", Some("page"));
        reg.connect("page", &mut (), Binding::Drop(0));
        assert!(reg.has_listener(&"text", EventKind::DragEnter));
        assert!(!reg.hover_pending());
    }
}
