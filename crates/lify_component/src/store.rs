//! Identity-keyed storage for a single component kind.

use dashmap::DashMap;

use crate::component::Component;

/// A concurrent map from entity identity to one component kind.
///
/// Game systems may read and write component contents from any thread.
/// Slots are only added through a
/// [`StoreInitializer`](crate::StoreInitializer); nothing removes them.
///
/// Access is copy-out or closure-scoped so no shard lock outlives a call.
/// A closure passed to [`ComponentStore::with`] or
/// [`ComponentStore::with_mut`] holds the shard lock while it runs and must
/// not create entities.
#[derive(Debug)]
pub struct ComponentStore<T: Component> {
    data: DashMap<u64, T>,
}

impl<T: Component> ComponentStore<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: DashMap::with_capacity(capacity),
        }
    }

    /// Initialise a default-valued slot for `entity`, resetting any
    /// existing one.
    pub(crate) fn insert_default(&self, entity: u64) {
        self.data.insert(entity, T::default());
    }

    /// Returns a copy of the component of `entity`, if it has one.
    #[must_use]
    pub fn get(&self, entity: u64) -> Option<T>
    where
        T: Clone,
    {
        self.data.get(&entity).map(|slot| slot.value().clone())
    }

    /// Run `f` on the component of `entity`, if it has one.
    pub fn with<R>(&self, entity: u64, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.data.get(&entity).map(|slot| f(slot.value()))
    }

    /// Run `f` on a mutable reference to the component of `entity`, if it
    /// has one.
    pub fn with_mut<R>(&self, entity: u64, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.data
            .get_mut(&entity)
            .map(|mut slot| f(slot.value_mut()))
    }

    /// Returns `true` if `entity` has a slot in this store.
    #[must_use]
    pub fn contains(&self, entity: u64) -> bool {
        self.data.contains_key(&entity)
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no entity has a slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns how many slots fit before the backing map reallocates.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// The component name, as reported by [`Component::type_name`].
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        T::type_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use glam::Vec2;

    #[test]
    fn test_insert_default_creates_zeroed_slot() {
        let store: ComponentStore<Position> = ComponentStore::with_capacity(8);
        assert!(!store.contains(7));

        store.insert_default(7);
        assert!(store.contains(7));
        assert_eq!(store.get(7), Some(Position::default()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_with_mut_writes_through() {
        let store: ComponentStore<Position> = ComponentStore::with_capacity(1);
        store.insert_default(1);
        store.with_mut(1, |p| p.position = Vec2::new(3.0, 4.0));
        assert_eq!(store.with(1, |p| p.position), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_missing_entity_is_none() {
        let store: ComponentStore<Position> = ComponentStore::with_capacity(0);
        assert!(store.get(42).is_none());
        assert!(store.with(42, |_| ()).is_none());
        assert!(store.with_mut(42, |_| ()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_while_reading_same_store() {
        let store: ComponentStore<Position> = ComponentStore::with_capacity(1);
        store.insert_default(1);
        // No lock is held between calls, so inserting after a read never
        // contends with the reader, whichever shard the new key lands in.
        let copy = store.get(1);
        for id in 2..=256 {
            store.insert_default(id);
        }
        assert_eq!(copy, Some(Position::default()));
        assert_eq!(store.len(), 256);
    }

    #[test]
    fn test_grows_past_capacity_hint() {
        let store: ComponentStore<Position> = ComponentStore::with_capacity(2);
        for id in 1..=100 {
            store.insert_default(id);
        }
        assert_eq!(store.len(), 100);
        assert!(store.contains(100));
    }

    #[test]
    fn test_type_name() {
        let store: ComponentStore<Position> = ComponentStore::with_capacity(0);
        assert_eq!(store.type_name(), "Position");
    }
}
