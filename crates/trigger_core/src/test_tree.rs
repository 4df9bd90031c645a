//! Minimal in-memory `ElementTree` for unit tests.

use crate::id::ElementId;
use crate::tree::ElementTree;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct TestTree {
    next: u64,
    parents: HashMap<ElementId, Option<ElementId>>,
    attrs: HashMap<ElementId, Vec<(String, String)>>,
}

impl TestTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn element(
        &mut self,
        parent: Option<ElementId>,
        attrs: &[(&str, &str)],
    ) -> ElementId {
        self.next += 1;
        let id = ElementId::from_raw(self.next);
        self.parents.insert(id, parent);
        self.attrs.insert(
            id,
            attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        id
    }

    /// Detach an element and everything below it.
    pub(crate) fn remove(&mut self, id: ElementId) {
        let doomed: Vec<ElementId> = self
            .parents
            .keys()
            .copied()
            .filter(|&el| self.contains(id, el))
            .collect();
        for el in doomed {
            self.parents.remove(&el);
            self.attrs.remove(&el);
        }
    }
}

impl ElementTree for TestTree {
    fn is_live(&self, id: ElementId) -> bool {
        self.parents.contains_key(&id)
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.attrs
            .get(&id)?
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.parents.get(&id).copied().flatten()
    }
}
