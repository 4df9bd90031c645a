//! Timing state store keyed by element identity.
//!
//! Entries are logically weak: an entry whose element has left the document
//! can be evicted at any point without observable effect. Eviction happens
//! opportunistically whenever the scheduler touches an entry and finds its
//! element gone, and in bulk through [`TimingStore::prune`].

use crate::id::ElementId;
use crate::spec::TriggerSpec;
use crate::state::TimingState;
use crate::tree::ElementTree;
use std::collections::HashMap;

pub(crate) struct TimingStore<C> {
    /// Resolved once per element, kept for the element's lifetime.
    specs: HashMap<ElementId, TriggerSpec>,
    states: HashMap<ElementId, TimingState<C>>,
    /// Store-wide so an element that went idle and re-armed can never match
    /// a deadline queued by an earlier cycle.
    next_generation: u64,
}

impl<C> TimingStore<C> {
    pub(crate) fn new() -> Self {
        Self {
            specs: HashMap::new(),
            states: HashMap::new(),
            next_generation: 0,
        }
    }

    pub(crate) fn spec(&self, id: ElementId) -> Option<TriggerSpec> {
        self.specs.get(&id).copied()
    }

    pub(crate) fn cache_spec(&mut self, id: ElementId, spec: TriggerSpec) {
        self.specs.insert(id, spec);
    }

    pub(crate) fn state(&self, id: ElementId) -> Option<&TimingState<C>> {
        self.states.get(&id)
    }

    pub(crate) fn insert_state(
        &mut self,
        id: ElementId,
        state: TimingState<C>,
    ) -> Option<TimingState<C>> {
        self.states.insert(id, state)
    }

    pub(crate) fn remove_state(&mut self, id: ElementId) -> Option<TimingState<C>> {
        self.states.remove(&id)
    }

    pub(crate) fn bump_generation(&mut self) -> u64 {
        self.next_generation = self.next_generation.wrapping_add(1);
        self.next_generation
    }

    /// Forget everything about an element.
    pub(crate) fn evict(&mut self, id: ElementId) -> bool {
        let had_spec = self.specs.remove(&id).is_some();
        let had_state = self.states.remove(&id).is_some();
        had_spec || had_state
    }

    /// Elements currently holding non-idle state, in a stable order.
    pub(crate) fn ids_with_state(&self) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = self.states.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn state_len(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn pending_debounces(&self) -> usize {
        self.states
            .values()
            .filter(|s| matches!(s, TimingState::DebouncePending { .. }))
            .count()
    }

    /// Evict every entry whose element is no longer live. Returns how many
    /// elements were forgotten.
    pub(crate) fn prune<T: ElementTree + ?Sized>(&mut self, tree: &T) -> usize {
        let mut dead: Vec<ElementId> = self
            .specs
            .keys()
            .chain(self.states.keys())
            .copied()
            .filter(|&id| !tree.is_live(id))
            .collect();
        dead.sort_unstable();
        dead.dedup();
        for id in &dead {
            self.evict(*id);
        }
        dead.len()
    }
}

impl<C> std::fmt::Debug for TimingStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimingStore")
            .field("specs", &self.specs)
            .field("states", &self.states)
            .field("next_generation", &self.next_generation)
            .finish()
    }
}
