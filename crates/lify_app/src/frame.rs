//! Frame loop.
//!
//! Each frame runs in three steps:
//!
//! 1. Movement over the active entities (a stable snapshot).
//! 2. Spawner systems on scoped threads, creating entities concurrently.
//! 3. One merge of the staged entities into the active collection.
//!
//! The merge takes `&mut EntityManager`, so it cannot start until every
//! spawner thread has been joined.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use lify_component::Components;
use lify_entity::{EntityManager, EntityResult};
use tracing::{debug, info, warn};

use crate::systems;

/// Configuration for the frame loop.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Target frames per second.
    pub frame_rate: f64,
    /// Maximum number of frames to run (0 = unlimited).
    pub max_frames: u64,
    /// Number of spawner systems running concurrently each frame.
    pub spawners: usize,
    /// Entities each spawner creates per frame.
    pub spawns_per_frame: usize,
}

impl FrameConfig {
    /// The time budget of one frame.
    ///
    /// # Errors
    ///
    /// Fails unless `frame_rate` is finite and positive, and its inverse
    /// fits in a [`Duration`].
    pub fn frame_duration(&self) -> Result<Duration> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            bail!("frame rate must be a positive number, got {}", self.frame_rate);
        }
        Ok(Duration::try_from_secs_f64(1.0 / self.frame_rate)?)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            max_frames: 0,
            spawners: 4,
            spawns_per_frame: 8,
        }
    }
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// The frame number, starting at 1.
    pub frame_id: u64,
    /// Entities moved by the movement system.
    pub moved: usize,
    /// Entities merged at the end of the frame.
    pub merged: usize,
    /// Slots in the position store after the frame.
    pub positioned: usize,
    /// Active entities after the merge.
    pub active: usize,
}

/// The frame driver's state.
#[derive(Debug)]
pub struct FrameLoop {
    frame_id: u64,
    config: FrameConfig,
    manager: EntityManager,
    /// Shared store handle, as any system thread would hold it.
    components: Arc<Components>,
}

impl FrameLoop {
    /// Create a frame loop driving `manager`.
    #[must_use]
    pub fn new(config: FrameConfig, manager: EntityManager) -> Self {
        let components = manager.components();
        Self {
            frame_id: 0,
            config,
            manager,
            components,
        }
    }

    /// Returns the number of completed frames.
    #[must_use]
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /// Returns the entity manager.
    #[must_use]
    pub fn manager(&self) -> &EntityManager {
        &self.manager
    }

    /// Run one frame.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by a system.
    pub fn frame(&mut self, dt: f64) -> EntityResult<FrameStats> {
        self.frame_id += 1;

        let moved = systems::movement(&self.manager, dt as f32)?;

        let manager = &self.manager;
        let spawners = self.config.spawners;
        let per_spawner = self.config.spawns_per_frame;
        std::thread::scope(|s| -> EntityResult<()> {
            let handles: Vec<_> = (0..spawners)
                .map(|spawner| s.spawn(move || systems::spawn(manager, spawner, per_spawner)))
                .collect();
            for handle in handles {
                match handle.join() {
                    Ok(result) => {
                        result?;
                    }
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            Ok(())
        })?;

        let merged = self.manager.update();

        let stats = FrameStats {
            frame_id: self.frame_id,
            moved,
            merged,
            positioned: self.components.position().len(),
            active: self.manager.len(),
        };
        debug!(
            frame_id = stats.frame_id,
            moved = stats.moved,
            merged = stats.merged,
            active = stats.active,
            "frame complete"
        );
        Ok(stats)
    }

    /// Run frames at the configured rate until `max_frames` is reached, or
    /// forever if it is 0.
    ///
    /// # Errors
    ///
    /// Fails before the first frame if the frame rate is not a positive
    /// number. Otherwise stops at and returns the first frame error.
    pub fn run(&mut self) -> Result<()> {
        let frame_duration = self.config.frame_duration()?;
        let mut frame_count = 0u64;

        info!(
            frame_rate = self.config.frame_rate,
            max_frames = self.config.max_frames,
            spawners = self.config.spawners,
            "starting frame loop"
        );

        loop {
            let start = Instant::now();

            self.frame(frame_duration.as_secs_f64())?;

            frame_count += 1;
            if self.config.max_frames > 0 && frame_count >= self.config.max_frames {
                info!(
                    frames = frame_count,
                    entities = self.manager.len(),
                    "frame loop complete"
                );
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            } else {
                warn!(
                    frame_id = self.frame_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = frame_duration.as_millis() as u64,
                    "frame exceeded time budget"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lify_component::Position;

    use super::*;

    fn small_config() -> FrameConfig {
        FrameConfig {
            frame_rate: 1000.0,
            max_frames: 0,
            spawners: 3,
            spawns_per_frame: 4,
        }
    }

    #[test]
    fn test_frame_advances_counter() {
        let mut frame_loop = FrameLoop::new(small_config(), EntityManager::new(16));
        assert_eq!(frame_loop.frame_id(), 0);
        frame_loop.frame(1.0 / 60.0).unwrap();
        assert_eq!(frame_loop.frame_id(), 1);
        frame_loop.frame(1.0 / 60.0).unwrap();
        assert_eq!(frame_loop.frame_id(), 2);
    }

    #[test]
    fn test_new_entities_move_from_the_next_frame() {
        let mut frame_loop = FrameLoop::new(small_config(), EntityManager::new(16));

        let first = frame_loop.frame(1.0).unwrap();
        assert_eq!(
            first,
            FrameStats {
                frame_id: 1,
                moved: 0,
                merged: 12,
                positioned: 6,
                active: 12,
            }
        );

        // Each spawner makes two positioned entities per frame.
        let second = frame_loop.frame(1.0).unwrap();
        assert_eq!(second.moved, 6);
        assert_eq!(second.merged, 12);
        assert_eq!(second.active, 24);
        assert_eq!(second.positioned, 12);
    }

    #[test]
    fn test_active_entities_have_unique_ids_and_consistent_stores() {
        let mut frame_loop = FrameLoop::new(small_config(), EntityManager::new(0));
        for _ in 0..5 {
            frame_loop.frame(0.5).unwrap();
        }

        let manager = frame_loop.manager();
        let mut ids: Vec<u64> = manager.iter().map(|e| e.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 60);
        assert_eq!(manager.last_id(), 60);

        for entity in manager.iter() {
            let position: Option<Position> = manager.position(*entity).unwrap();
            assert_eq!(position.is_some(), entity.has(lify_entity::Capability::POSITIONED));
        }
    }

    #[test]
    fn test_run_limited_frames() {
        let config = FrameConfig {
            max_frames: 5,
            ..small_config()
        };
        let mut frame_loop = FrameLoop::new(config, EntityManager::new(64));
        frame_loop.run().unwrap();
        assert_eq!(frame_loop.frame_id(), 5);
        assert_eq!(frame_loop.manager().len(), 60);
    }

    #[test]
    fn test_frame_duration_matches_rate() {
        let config = FrameConfig {
            frame_rate: 50.0,
            ..small_config()
        };
        assert_eq!(config.frame_duration().unwrap(), Duration::from_millis(20));
    }

    #[test]
    fn test_run_rejects_unusable_frame_rates() {
        for frame_rate in [0.0, -30.0, f64::NAN, f64::INFINITY, 1e-300] {
            let config = FrameConfig {
                frame_rate,
                max_frames: 1,
                ..small_config()
            };
            let mut frame_loop = FrameLoop::new(config, EntityManager::new(1));
            assert!(frame_loop.run().is_err(), "frame rate {frame_rate} accepted");
            assert_eq!(frame_loop.frame_id(), 0);
        }
    }
}
