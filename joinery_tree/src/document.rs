// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use joinery_events::indicator::{Indicator, Placement, Position, Rejection};
use joinery_events::session::Dragged;
use joinery_events::store::{EditorStore, NodeEvent};
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::error::TreeError;
use crate::types::{Fragment, NodeFlags, NodeId, NodeSpec, TemplateId};

#[derive(Clone, Debug)]
struct Node {
    spec: NodeSpec,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// An editable node tree with interaction state for a rendering layer.
///
/// Implements [`EditorStore`], so it can back
/// [`EventHandlers`](joinery_events::handlers::EventHandlers) directly.
#[derive(Clone, Debug)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    templates: Vec<Fragment>,
    selected: Option<NodeId>,
    hovered: Option<NodeId>,
    dragged: Option<NodeId>,
    indicator: Option<Indicator<NodeId>>,
    revision: u64,
}

impl Document {
    /// A document holding only `root`.
    pub fn new(root: NodeSpec) -> Self {
        let node = Node {
            spec: root,
            parent: None,
            children: SmallVec::new(),
        };
        let mut slots = Vec::new();
        slots.push(Slot {
            generation: 1,
            node: Some(node),
        });
        Self {
            slots,
            free: Vec::new(),
            root: NodeId::new(0, 1),
            templates: Vec::new(),
            selected: None,
            hovered: None,
            dragged: None,
            indicator: None,
            revision: 0,
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns `true` if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Always `false`: the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bumped on every structural change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The data of a live node.
    pub fn get(&self, id: NodeId) -> Option<&NodeSpec> {
        self.node(id).ok().map(|n| &n.spec)
    }

    /// The parent of a live node; `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok().and_then(|n| n.parent)
    }

    /// Children of a live node in order; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns `true` if `node` is `ancestor` or lies in its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    /// Record the laid-out bounds of a node.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) -> Result<(), TreeError> {
        self.node_mut(id)?.spec.bounds = bounds;
        Ok(())
    }

    /// Insert `spec` under `parent` at `index` (clamped to the child count).
    pub fn insert(
        &mut self,
        parent: NodeId,
        index: usize,
        spec: NodeSpec,
    ) -> Result<NodeId, TreeError> {
        self.canvas(parent)?;
        let id = self.alloc(spec, Some(parent));
        self.attach(parent, index, id);
        self.revision += 1;
        Ok(id)
    }

    /// Append `spec` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, spec: NodeSpec) -> Result<NodeId, TreeError> {
        self.insert(parent, usize::MAX, spec)
    }

    /// Remove a node and its whole subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
        if id == self.root {
            return Err(TreeError::RootImmovable);
        }
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.detach(parent, id);
        }
        let mut stack = Vec::new();
        stack.push(id);
        while let Some(next) = stack.pop() {
            let slot = &mut self.slots[next.idx()];
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                self.free.push(next.0);
            }
            self.clear_events_for(next);
        }
        if self
            .indicator
            .as_ref()
            .and_then(|i| i.placement.as_ref())
            .is_some_and(|p| !self.is_alive(p.parent))
        {
            self.indicator = None;
        }
        self.revision += 1;
        tracing::debug!(?id, "removed subtree");
        Ok(())
    }

    /// Store `fragment` as palette content for the create handler.
    pub fn register_template(&mut self, fragment: Fragment) -> TemplateId {
        self.templates.push(fragment);
        #[expect(clippy::cast_possible_truncation, reason = "template ids are u32")]
        let idx = (self.templates.len() - 1) as u32;
        TemplateId(idx)
    }

    /// The node currently carrying `event`.
    pub fn node_event(&self, event: NodeEvent) -> Option<NodeId> {
        match event {
            NodeEvent::Selected => self.selected,
            NodeEvent::Hovered => self.hovered,
            NodeEvent::Dragged => self.dragged,
        }
    }

    /// The indicator currently shown.
    pub fn indicator(&self) -> Option<&Indicator<NodeId>> {
        self.indicator.as_ref()
    }

    /// Where a drop at `pointer` lands among `parent`'s children.
    ///
    /// Children are compared along the parent's flow axis (vertical unless the
    /// parent is [`ROW`](NodeFlags::ROW)): the drop goes before the first child
    /// whose midpoint lies past the pointer, otherwise after the last child.
    pub fn placement_at(&self, parent: NodeId, pointer: Point) -> Result<Placement<NodeId>, TreeError> {
        let node = self.node(parent)?;
        let row = node.spec.flags.contains(NodeFlags::ROW);
        let along = |p: Point| if row { p.x } else { p.y };

        let pos = along(pointer);
        for (index, child) in node.children.iter().enumerate() {
            let mid = along(self.node(*child)?.spec.bounds.center());
            if pos < mid {
                return Ok(Placement::new(parent, index, Position::Before));
            }
        }
        Ok(match node.children.len() {
            0 => Placement::new(parent, 0, Position::Before),
            len => Placement::new(parent, len - 1, Position::After),
        })
    }

    fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.slots
            .get(id.idx())
            .filter(|slot| slot.generation == id.1)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(TreeError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.1)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(TreeError::UnknownNode(id))
    }

    fn canvas(&self, id: NodeId) -> Result<&Node, TreeError> {
        let node = self.node(id)?;
        if node.spec.is_canvas() {
            Ok(node)
        } else {
            Err(TreeError::NotCanvas(id))
        }
    }

    fn alloc(&mut self, spec: NodeSpec, parent: Option<NodeId>) -> NodeId {
        let node = Node {
            spec,
            parent,
            children: SmallVec::new(),
        };
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.node = Some(node);
            NodeId::new(idx, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            #[expect(clippy::cast_possible_truncation, reason = "slot indices are u32")]
            let idx = (self.slots.len() - 1) as u32;
            NodeId::new(idx, 1)
        }
    }

    /// Link `child` into `parent` at `index`, clamped. Both must be live.
    fn attach(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if let Ok(node) = self.node_mut(parent) {
            let index = index.min(node.children.len());
            node.children.insert(index, child);
        }
        if let Ok(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
    }

    /// Unlink `child` from `parent`, returning its former index.
    fn detach(&mut self, parent: NodeId, child: NodeId) -> Option<usize> {
        let node = self.node_mut(parent).ok()?;
        let index = node.children.iter().position(|c| *c == child)?;
        node.children.remove(index);
        Some(index)
    }

    fn clear_events_for(&mut self, id: NodeId) {
        for slot in [&mut self.selected, &mut self.hovered, &mut self.dragged] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
    }

    fn rejection(&self, dragged: &Dragged<NodeId, Fragment>, parent: NodeId) -> Option<Rejection> {
        if !self.get(parent).is_some_and(NodeSpec::is_canvas) {
            return Some(Rejection::NotCanvas);
        }
        let &Dragged::Node(node) = dragged else {
            return None;
        };
        if node == self.root || self.get(node).is_some_and(|s| s.flags.contains(NodeFlags::LOCKED)) {
            Some(Rejection::Locked)
        } else if self.contains(node, parent) {
            Some(Rejection::IntoOwnSubtree)
        } else {
            None
        }
    }
}

impl EditorStore for Document {
    type NodeId = NodeId;
    type Source = TemplateId;
    type Tree = Fragment;
    type Error = TreeError;

    fn set_node_event(&mut self, event: NodeEvent, node: Option<&NodeId>) -> Result<(), TreeError> {
        if let Some(id) = node {
            self.node(*id)?;
        }
        let slot = match event {
            NodeEvent::Selected => &mut self.selected,
            NodeEvent::Hovered => &mut self.hovered,
            NodeEvent::Dragged => &mut self.dragged,
        };
        *slot = node.copied();
        Ok(())
    }

    fn set_indicator(&mut self, indicator: Option<&Indicator<NodeId>>) -> Result<(), TreeError> {
        self.indicator = indicator.cloned();
        Ok(())
    }

    fn move_node(&mut self, node: &NodeId, parent: &NodeId, index: usize) -> Result<(), TreeError> {
        let (node, parent) = (*node, *parent);
        if node == self.root {
            return Err(TreeError::RootImmovable);
        }
        if self.node(node)?.spec.flags.contains(NodeFlags::LOCKED) {
            return Err(TreeError::Locked(node));
        }
        self.canvas(parent)?;
        if self.contains(node, parent) {
            return Err(TreeError::IntoOwnSubtree { node, parent });
        }

        let mut index = index;
        if let Some(old_parent) = self.parent(node) {
            let old_index = self.detach(old_parent, node);
            // Indices were computed with `node` still in place.
            if old_parent == parent && old_index.is_some_and(|old| old < index) {
                index -= 1;
            }
        }
        self.attach(parent, index, node);
        self.revision += 1;
        tracing::debug!(?node, ?parent, index, "moved node");
        Ok(())
    }

    fn add_tree_at_index(
        &mut self,
        tree: Fragment,
        parent: &NodeId,
        index: usize,
    ) -> Result<(), TreeError> {
        let parent = *parent;
        self.canvas(parent)?;

        let mut ids: Vec<NodeId> = Vec::with_capacity(tree.len());
        for (spec, entry_parent) in tree.entries() {
            let id = match entry_parent {
                None => {
                    let id = self.alloc(spec.clone(), Some(parent));
                    self.attach(parent, index, id);
                    id
                }
                Some(p) => {
                    let owner = ids[p];
                    let id = self.alloc(spec.clone(), Some(owner));
                    self.attach(owner, usize::MAX, id);
                    id
                }
            };
            ids.push(id);
        }
        self.revision += 1;
        tracing::debug!(?parent, index, nodes = ids.len(), "inserted tree");
        Ok(())
    }

    fn drop_placeholder(
        &self,
        dragged: &Dragged<NodeId, Fragment>,
        target: &NodeId,
        pointer: Point,
    ) -> Result<Option<Indicator<NodeId>>, TreeError> {
        let target_node = self.node(*target)?;
        let parent = if target_node.spec.is_canvas() {
            *target
        } else {
            match target_node.parent {
                Some(parent) => parent,
                None => return Ok(None),
            }
        };
        let placement = self.placement_at(parent, pointer)?;
        Ok(Some(match self.rejection(dragged, parent) {
            Some(rejection) => Indicator::rejected(placement, rejection),
            None => Indicator::at(placement),
        }))
    }

    fn parse_tree(&self, source: &TemplateId) -> Result<Fragment, TreeError> {
        self.templates
            .get(source.0 as usize)
            .cloned()
            .ok_or(TreeError::UnknownTemplate(*source))
    }
}
