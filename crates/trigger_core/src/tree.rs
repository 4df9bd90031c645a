//! The seam between the scheduler and the live document.
//!
//! The scheduler never owns elements. It asks the tree whether an element is
//! still live, what it declares, and where it sits, and nothing else.

use crate::id::ElementId;

pub trait ElementTree {
    /// `true` while the element is attached to the document.
    fn is_live(&self, id: ElementId) -> bool;

    /// Value of an attribute declared on the element itself.
    ///
    /// A valueless attribute should be reported as `Some("")` so that it is
    /// rejected as malformed instead of being mistaken for an absent one.
    fn attribute(&self, id: ElementId, name: &str) -> Option<&str>;

    fn parent(&self, id: ElementId) -> Option<ElementId>;

    /// Inclusive descendant test: `true` if `id` is `scope` or lies under it.
    fn contains(&self, scope: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == scope {
                return true;
            }
            current = self.parent(node);
        }
        false
    }
}

impl<T: ElementTree + ?Sized> ElementTree for &T {
    fn is_live(&self, id: ElementId) -> bool {
        (**self).is_live(id)
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        (**self).attribute(id, name)
    }

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        (**self).parent(id)
    }

    fn contains(&self, scope: ElementId, id: ElementId) -> bool {
        (**self).contains(scope, id)
    }
}
