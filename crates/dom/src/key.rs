use trigger_core::ElementId;

/// Generational handle into a [`Document`](crate::Document).
///
/// A removed node's slot is reused with a bumped generation, so a key kept
/// past its node's removal never resolves to the node that took its place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    index: u32,
    generation: u32,
}

impl NodeKey {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }

    pub const fn to_bits(self) -> u64 {
        (self.generation as u64) << 32 | self.index as u64
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

impl From<NodeKey> for ElementId {
    fn from(key: NodeKey) -> Self {
        ElementId::from_raw(key.to_bits())
    }
}

impl From<ElementId> for NodeKey {
    fn from(id: ElementId) -> Self {
        NodeKey::from_bits(id.as_raw())
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}
