//! Game systems driven by the frame loop.
//!
//! Systems read the manager's active collection and touch component data
//! through the shared stores. Spawners only create; the new entities show up
//! for iteration after the frame's merge.

use lify_component::{Position, Vec2};
use lify_entity::{Capability, Entity, EntityManager, EntityResult};
use tracing::debug;

/// Initial velocity given to spawned `POSITIONED` entities.
const SPAWN_VELOCITY: Vec2 = Vec2::new(1.0, 0.5);

/// Advance every active `POSITIONED` entity by its velocity.
///
/// Returns how many entities moved.
///
/// # Errors
///
/// Returns [`EntityError::MissingComponent`](lify_entity::EntityError::MissingComponent)
/// if an entity claims a position the store does not hold.
pub fn movement(manager: &EntityManager, dt: f32) -> EntityResult<usize> {
    let mut moved = 0;
    for &entity in manager.iter() {
        if manager.with_position_mut(entity, |p| p.integrate(dt))?.is_some() {
            moved += 1;
        }
    }
    Ok(moved)
}

/// Create `count` entities, alternating between `POSITIONED` and no
/// capabilities, and seed the positioned ones.
///
/// Safe to run from several threads against the same manager.
///
/// # Errors
///
/// Propagates creation and lookup errors from the manager.
pub fn spawn(manager: &EntityManager, spawner: usize, count: usize) -> EntityResult<Vec<Entity>> {
    let mut spawned = Vec::with_capacity(count);
    for i in 0..count {
        let mask = if i % 2 == 0 {
            Capability::POSITIONED
        } else {
            Capability::empty()
        };
        let entity = manager.create_entity(mask)?;

        let seed =
            Position::new(Vec2::new(spawner as f32, i as f32)).with_velocity(SPAWN_VELOCITY);
        manager.with_position_mut(entity, |p| *p = seed)?;
        spawned.push(entity);
    }
    debug!(spawner, count, "spawner finished");
    Ok(spawned)
}
