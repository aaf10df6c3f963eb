//! # lify_entity
//!
//! Entity lifecycle for the lify engine.
//!
//! This crate provides:
//!
//! - [`Capability`]: a 16-bit mask declaring which component kinds an
//!   entity owns.
//! - [`Entity`]: an immutable identity + mask pair.
//! - [`IdAllocator`]: lock-free, monotonically increasing identities.
//! - [`EntityManager`]: creates entities into a staging area and merges
//!   them into the active collection once per frame.
//!
//! ## Frame cadence
//!
//! ```text
//! frame N:   systems iterate manager.entities()   (stable snapshot)
//!            spawners call manager.create_entity(..) from any thread
//!                 -> identity allocated, stores initialised, entity staged
//! boundary:  manager.update()                     (staged -> active)
//! frame N+1: systems see the new entities, in creation order
//! ```
//!
//! Entities are never removed. Identities are never reused for the lifetime
//! of a manager.

pub mod allocator;
pub mod capability;
pub mod config;
pub mod entity;
pub mod error;
pub mod manager;

pub use allocator::IdAllocator;
pub use capability::Capability;
pub use config::ManagerConfig;
pub use entity::Entity;
pub use error::{EntityError, EntityResult};
pub use manager::EntityManager;
