//! # lify_component
//!
//! The "C" in ECS. Defines what a component is and where component data
//! lives.
//!
//! This crate provides:
//!
//! - [`Component`] trait: the contract all component data must satisfy.
//! - [`ComponentStore`]: a concurrent map from entity identity to one
//!   component kind.
//! - [`Components`]: the bundle of every store the entity manager fills.
//! - [`StoreInitializer`]: the single handle allowed to add slots.
//! - [`Position`]: position, scale and velocity in 2D space.
//!
//! Stores are keyed by raw `u64` entity identities. They never generate
//! identities themselves; the entity manager hands them out.

pub mod component;
pub mod components;
pub mod position;
pub mod store;

pub use component::Component;
pub use components::{Components, StoreInitializer};
pub use position::Position;
pub use store::ComponentStore;

pub use glam::Vec2;
