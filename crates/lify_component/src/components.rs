//! The set of component stores owned by an entity manager.

use std::sync::Arc;

use crate::position::Position;
use crate::store::ComponentStore;

/// Every component store, one per component kind.
///
/// Systems get a shared `Arc<Components>` and may read and write slot
/// contents. Only the [`StoreInitializer`] created alongside it can add
/// slots. Add a store here when a new capability is introduced, and teach
/// the entity manager which capability bit initialises it.
#[derive(Debug)]
pub struct Components {
    position: ComponentStore<Position>,
}

impl Components {
    /// Position, scale and velocity of `POSITIONED` entities.
    #[must_use]
    pub fn position(&self) -> &ComponentStore<Position> {
        &self.position
    }
}

/// The only handle that can add slots to a [`Components`].
///
/// Created together with its stores by [`StoreInitializer::with_capacity`].
/// It is not `Clone`: whoever owns it (the entity manager) owns the
/// structure of the stores, while everyone else only touches contents.
#[derive(Debug)]
pub struct StoreInitializer {
    components: Arc<Components>,
}

impl StoreInitializer {
    /// Create all stores pre-sized for `capacity` entities.
    ///
    /// The capacity is a hint; stores grow past it as needed.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            components: Arc::new(Components {
                position: ComponentStore::with_capacity(capacity),
            }),
        }
    }

    /// The stores this initializer fills.
    #[must_use]
    pub fn components(&self) -> &Arc<Components> {
        &self.components
    }

    /// Give `entity` a default-valued [`Position`] slot.
    pub fn init_position(&self, entity: u64) {
        self.components.position.insert_default(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_capacity_presizes_stores() {
        let stores = StoreInitializer::with_capacity(64);
        assert!(stores.components().position().capacity() >= 64);
        assert!(stores.components().position().is_empty());
    }

    #[test]
    fn test_init_position_is_visible_through_shared_handle() {
        let stores = StoreInitializer::with_capacity(4);
        let shared = Arc::clone(stores.components());

        stores.init_position(3);
        assert!(shared.position().contains(3));
        assert_eq!(shared.position().get(3), Some(Position::default()));
    }
}
