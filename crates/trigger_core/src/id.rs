//! Generic, UI-agnostic identifier for paced elements.
//!
//! This type intentionally uses a plain `u64` to avoid coupling to any DOM
//! or framework-specific node key. Integration layers provide `From`
//! implementations to convert from their native key types; a generational
//! arena key packs naturally into the 64 bits, which is what lets the store
//! tell a recycled slot apart from the element that used to live there.

use std::fmt;

/// Opaque identifier for an element within a [`TriggerScheduler`](crate::TriggerScheduler).
///
/// Two distinct elements never share an id for as long as both are reachable
/// from the caller. The value has no meaning within this crate; it is a key.
///
/// # Integration
///
/// ```ignore
/// impl From<NodeKey> for ElementId {
///     fn from(key: NodeKey) -> Self {
///         ElementId::from_raw(key.to_bits())
///     }
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Create an `ElementId` from a raw u64 value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying raw value.
    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<ElementId> for u64 {
    #[inline]
    fn from(id: ElementId) -> Self {
        id.as_raw()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{:x}", self.0)
    }
}
