//! The entity record.
//!
//! An [`Entity`] is a `u64` identity plus the [`Capability`] mask it was
//! created with. It carries no component data of its own; that lives in the
//! component stores, keyed by the identity.

use std::fmt;

use crate::capability::Capability;

/// An entity: identity and capability mask.
///
/// Both fields are fixed at creation. Entities are only built by
/// [`EntityManager::create_entity`](crate::EntityManager::create_entity),
/// which guarantees a non-zero, unique identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    id: u64,
    mask: Capability,
}

impl Entity {
    /// The null entity identity. Never issued by an allocator.
    pub const INVALID_ID: u64 = 0;

    pub(crate) const fn new(id: u64, mask: Capability) -> Self {
        Self { id, mask }
    }

    /// Returns the identity.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.id
    }

    /// Returns the capability mask.
    #[must_use]
    pub const fn mask(self) -> Capability {
        self.mask
    }

    /// Returns `true` if the mask includes every bit of `capability`.
    #[must_use]
    pub const fn has(self, capability: Capability) -> bool {
        self.mask.contains(capability)
    }

    /// Returns `true` if this is a valid (non-zero) entity.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.id != Self::INVALID_ID
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}, {})", self.id, self.mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let e = Entity::new(42, Capability::POSITIONED);
        assert_eq!(e.id(), 42);
        assert_eq!(e.mask(), Capability::POSITIONED);
        assert!(e.is_valid());
        assert!(e.has(Capability::POSITIONED));
    }

    #[test]
    fn test_invalid() {
        let e = Entity::new(Entity::INVALID_ID, Capability::empty());
        assert!(!e.is_valid());
        assert!(!e.has(Capability::POSITIONED));
    }

    #[test]
    fn test_display() {
        let e = Entity::new(7, Capability::POSITIONED);
        assert_eq!(e.to_string(), "Entity(7, POSITIONED)");
    }
}
