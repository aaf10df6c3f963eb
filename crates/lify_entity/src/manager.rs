//! The entity manager.
//!
//! The [`EntityManager`] owns the active entity collection, the staging
//! collection for entities created during the current frame, the identity
//! allocator, and a shared handle to the component stores.
//!
//! Creation may happen from any number of threads. Each call allocates an
//! identity with a single atomic increment, then, under one lock, initialises
//! every component store the mask claims and appends the entity to staging.
//! [`EntityManager::update`] moves staging into the active collection and is
//! the only place the active collection changes.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use lify_component::{Component, ComponentStore, Components, Position, StoreInitializer};

use crate::allocator::IdAllocator;
use crate::capability::Capability;
use crate::config::ManagerConfig;
use crate::entity::Entity;
use crate::error::{EntityError, EntityResult};

/// Creates entities and publishes them to the active collection once per
/// frame.
///
/// `create_entity` takes `&self` and may be called concurrently. `update`
/// takes `&mut self`, so it can never overlap a creation call or a borrow of
/// [`EntityManager::entities`].
///
/// Component access goes through copies or closures, never through guards
/// that outlive a call, so reading an entity's data and then creating more
/// entities on the same thread cannot block.
#[derive(Debug)]
pub struct EntityManager {
    /// Owner of the component stores' structure. Systems get shared handles
    /// through [`EntityManager::components`] and only touch slot contents.
    stores: StoreInitializer,
    /// Entities visible to systems for the current frame.
    entities: Vec<Entity>,
    /// Entities created since the last [`EntityManager::update`]. The lock
    /// also serialises component store initialisation.
    staging: Mutex<Vec<Entity>>,
    allocator: IdAllocator,
    strict_capabilities: bool,
}

impl EntityManager {
    /// Create a manager with strict capability validation, pre-allocating
    /// collections and stores for `size_hint` entities.
    #[must_use]
    pub fn new(size_hint: usize) -> Self {
        Self::with_config(ManagerConfig::new(size_hint))
    }

    /// Create a manager from a [`ManagerConfig`].
    #[must_use]
    pub fn with_config(config: ManagerConfig) -> Self {
        info!(
            size_hint = config.size_hint,
            strict_capabilities = config.strict_capabilities,
            "entity manager created"
        );
        Self {
            stores: StoreInitializer::with_capacity(config.size_hint),
            entities: Vec::with_capacity(config.size_hint),
            staging: Mutex::new(Vec::with_capacity(config.size_hint)),
            allocator: IdAllocator::new(),
            strict_capabilities: config.strict_capabilities,
        }
    }

    /// Create an entity with the given capability mask.
    ///
    /// The entity goes into staging and becomes part of
    /// [`EntityManager::entities`] at the next [`EntityManager::update`].
    /// Every component store claimed by `mask` already holds a
    /// default-valued slot for it when this returns, so the caller can fill
    /// in initial component data straight away.
    ///
    /// An empty mask is valid and yields an entity with no component data.
    ///
    /// Must not be called from inside a closure passed to
    /// [`EntityManager::with_position`] or [`EntityManager::with_position_mut`],
    /// which hold a store lock while they run.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidCapability`] if `mask` has bits outside
    /// [`Capability::DEFINED`] and the manager is strict. Nothing is
    /// allocated or staged in that case.
    pub fn create_entity(&self, mask: Capability) -> EntityResult<Entity> {
        let unknown = mask.unknown_bits();
        if unknown != 0 {
            if self.strict_capabilities {
                return Err(EntityError::InvalidCapability { bits: unknown });
            }
            warn!(
                mask = mask.bits(),
                unknown,
                "creating entity with capability bits that have no store"
            );
        }

        let entity = Entity::new(self.allocator.allocate(), mask);

        {
            let mut staging = self.staging.lock();
            if mask.contains(Capability::POSITIONED) {
                self.stores.init_position(entity.id());
            }
            staging.push(entity);
        }

        debug!(entity = entity.id(), mask = %mask, "entity staged");
        Ok(entity)
    }

    /// Merge staged entities into the active collection, in staging order.
    ///
    /// Staging order is the order creation calls took the staging lock. The
    /// identity is allocated before that lock, so under concurrent creation
    /// merge order can differ from identity order; on one thread they agree.
    ///
    /// Call exactly once per frame boundary. Returns the number of entities
    /// merged; with nothing staged the active collection is left untouched.
    pub fn update(&mut self) -> usize {
        let staging = self.staging.get_mut();
        let merged = staging.len();
        if merged == 0 {
            return 0;
        }

        // `append` leaves staging empty but keeps its capacity.
        self.entities.append(staging);

        debug!(merged, active = self.entities.len(), "staged entities merged");
        merged
    }

    /// The active collection.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate over the active collection.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of active entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity has been merged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// A copy of the entities waiting for the next merge.
    #[must_use]
    pub fn pending(&self) -> Vec<Entity> {
        self.staging.lock().clone()
    }

    /// Number of entities waiting for the next merge.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.staging.lock().len()
    }

    /// The last identity issued, or 0 if none has been.
    #[must_use]
    pub fn last_id(&self) -> u64 {
        self.allocator.last_id()
    }

    /// Shared handle to the component stores.
    ///
    /// Systems may read and write slot contents through it, from any thread
    /// and for as long as they like. Slots are only ever added by
    /// [`EntityManager::create_entity`].
    #[must_use]
    pub fn components(&self) -> Arc<Components> {
        Arc::clone(self.stores.components())
    }

    /// A copy of the [`Position`] of `entity`.
    ///
    /// Returns `Ok(None)` if the entity is not `POSITIONED`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::MissingComponent`] if the entity is
    /// `POSITIONED` but the store has no slot for it.
    pub fn position(&self, entity: Entity) -> EntityResult<Option<Position>> {
        self.with_position(entity, |position| *position)
    }

    /// Run `f` on the [`Position`] of `entity`.
    ///
    /// Returns `Ok(None)` if the entity is not `POSITIONED`. `f` runs under
    /// the store's shard lock and must not create entities.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::MissingComponent`] if the entity is
    /// `POSITIONED` but the store has no slot for it.
    pub fn with_position<R>(
        &self,
        entity: Entity,
        f: impl FnOnce(&Position) -> R,
    ) -> EntityResult<Option<R>> {
        if !entity.has(Capability::POSITIONED) {
            return Ok(None);
        }
        let store = self.stores.components().position();
        store
            .with(entity.id(), f)
            .map(Some)
            .ok_or_else(|| missing(store, entity))
    }

    /// Run `f` on a mutable reference to the [`Position`] of `entity`.
    ///
    /// Returns `Ok(None)` if the entity is not `POSITIONED`. `f` runs under
    /// the store's shard lock and must not create entities.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::MissingComponent`] if the entity is
    /// `POSITIONED` but the store has no slot for it.
    pub fn with_position_mut<R>(
        &self,
        entity: Entity,
        f: impl FnOnce(&mut Position) -> R,
    ) -> EntityResult<Option<R>> {
        if !entity.has(Capability::POSITIONED) {
            return Ok(None);
        }
        let store = self.stores.components().position();
        store
            .with_mut(entity.id(), f)
            .map(Some)
            .ok_or_else(|| missing(store, entity))
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::with_config(ManagerConfig::default())
    }
}

fn missing<T: Component>(store: &ComponentStore<T>, entity: Entity) -> EntityError {
    EntityError::MissingComponent {
        entity: entity.id(),
        component: store.type_name(),
    }
}
