//! 2D position component.
//!
//! [`Position`] bundles where an entity is, how large it is, and how fast it
//! moves. Entities created with the `POSITIONED` capability get one.

use glam::Vec2;

use crate::component::Component;

/// Position, scale and velocity in 2D world space.
///
/// The default value is all zeroes, which is what a freshly created entity
/// receives before the caller fills it in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    /// World-space position.
    pub position: Vec2,
    /// Per-axis scale factor.
    pub scale: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
}

impl Position {
    /// Create a stationary position with unit scale.
    #[must_use]
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            scale: Vec2::ONE,
            velocity: Vec2::ZERO,
        }
    }

    /// Set the velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Advance the position by `velocity * dt`.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}
