use crate::{DomError, NodeKey};
use trigger_core::{ElementId, ElementTree};

pub type Attribute = (String, Option<String>);

/// Arena-backed document tree with generational node keys.
///
/// Nodes are created detached and become live once appended under the
/// document root. Removing a node frees its whole subtree; the freed slots
/// are recycled under a new generation.
#[derive(Debug)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeKey,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<NodeRecord>,
}

#[derive(Debug)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

#[derive(Debug)]
enum NodeKind {
    Document,
    Element {
        name: String,
        attributes: Vec<Attribute>,
    },
}

impl Document {
    pub fn new() -> Self {
        let root = NodeKey::new(0, 0);
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(NodeRecord {
                    kind: NodeKind::Document,
                    parent: None,
                    children: Vec::new(),
                }),
            }],
            free: Vec::new(),
            root,
        }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn create_element(&mut self, name: &str, attributes: Vec<Attribute>) -> NodeKey {
        self.alloc(NodeKind::Element {
            name: name.to_string(),
            attributes,
        })
    }

    /// Create an element and append it under `parent` in one step.
    pub fn append_element(
        &mut self,
        parent: NodeKey,
        name: &str,
        attributes: Vec<Attribute>,
    ) -> Result<NodeKey, DomError> {
        self.ensure_allocated(parent)?;
        let key = self.create_element(name, attributes);
        if let Err(err) = self.append_child(parent, key) {
            self.free_subtree(key);
            return Err(err);
        }
        Ok(key)
    }

    pub fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), DomError> {
        self.ensure_allocated(parent)?;
        self.ensure_allocated(child)?;
        if parent == child || self.is_descendant(child, parent) {
            return Err(DomError::CycleDetected { parent, child });
        }
        if child == self.root {
            return Err(DomError::InvalidParent(child));
        }
        if self.record(child).is_some_and(|r| r.parent.is_some()) {
            return Err(DomError::InvalidParent(child));
        }

        if let Some(parent_rec) = self.record_mut(parent) {
            parent_rec.children.push(child);
        }
        if let Some(child_rec) = self.record_mut(child) {
            child_rec.parent = Some(parent);
        }
        Ok(())
    }

    /// Detach `key` and free it together with everything below it.
    /// Returns the freed keys, `key` first.
    pub fn remove(&mut self, key: NodeKey) -> Result<Vec<NodeKey>, DomError> {
        if key == self.root {
            return Err(DomError::RootRemoval);
        }
        self.ensure_allocated(key)?;

        if let Some(parent) = self.record(key).and_then(|r| r.parent)
            && let Some(parent_rec) = self.record_mut(parent)
        {
            parent_rec.children.retain(|k| *k != key);
        }

        let removed = self.free_subtree(key);
        log::trace!(target: "dom", "removed {key} ({} nodes)", removed.len());
        Ok(removed)
    }

    pub fn is_allocated(&self, key: NodeKey) -> bool {
        self.record(key).is_some()
    }

    /// `true` if `key` is reachable from the document root.
    pub fn is_connected(&self, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = self.record(node).and_then(|r| r.parent);
        }
        false
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.record(key)?.parent
    }

    pub fn name(&self, key: NodeKey) -> Option<&str> {
        match &self.record(key)?.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Attribute value; a valueless attribute reads as `""`.
    pub fn attr(&self, key: NodeKey, name: &str) -> Option<&str> {
        match &self.record(key)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_deref().unwrap_or("")),
            _ => None,
        }
    }

    pub fn set_attr(
        &mut self,
        key: NodeKey,
        name: &str,
        value: Option<String>,
    ) -> Result<(), DomError> {
        let record = self.record_mut(key).ok_or(DomError::StaleKey(key))?;
        let NodeKind::Element { attributes, .. } = &mut record.kind else {
            return Err(DomError::WrongNodeKind(key));
        };
        match attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value,
            None => attributes.push((name.to_string(), value)),
        }
        Ok(())
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeKey {
        let record = NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(slot.node.is_none(), "free list points at a live slot");
            slot.node = Some(record);
            return NodeKey::new(index, slot.generation);
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            node: Some(record),
        });
        NodeKey::new(index, 0)
    }

    fn free_subtree(&mut self, key: NodeKey) -> Vec<NodeKey> {
        let mut removed = Vec::new();
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slot_mut(current) else {
                continue;
            };
            let Some(record) = slot.node.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(current.index());
            stack.extend(record.children.iter().rev().copied());
            removed.push(current);
        }
        removed
    }

    fn is_descendant(&self, ancestor: NodeKey, maybe_descendant: NodeKey) -> bool {
        let mut current = self.parent(maybe_descendant);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    fn ensure_allocated(&self, key: NodeKey) -> Result<(), DomError> {
        if self.is_allocated(key) {
            Ok(())
        } else {
            Err(DomError::StaleKey(key))
        }
    }

    fn slot_mut(&mut self, key: NodeKey) -> Option<&mut Slot> {
        self.slots
            .get_mut(key.index() as usize)
            .filter(|s| s.generation == key.generation())
    }

    fn record(&self, key: NodeKey) -> Option<&NodeRecord> {
        self.slots
            .get(key.index() as usize)
            .filter(|s| s.generation == key.generation())?
            .node
            .as_ref()
    }

    fn record_mut(&mut self, key: NodeKey) -> Option<&mut NodeRecord> {
        self.slot_mut(key)?.node.as_mut()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree for Document {
    fn is_live(&self, id: ElementId) -> bool {
        self.is_connected(id.into())
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.attr(id.into(), name)
    }

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        Document::parent(self, id.into()).map(ElementId::from)
    }
}
