//! # lify_app: frame driver
//!
//! Runs a fixed-rate frame loop over an [`EntityManager`]:
//!
//! 1. The movement system iterates the active entities.
//! 2. Spawner systems create entities from several threads at once.
//! 3. The manager merges the new entities, exactly once per frame.
//!
//! The manager reads `LIFY_SIZE_HINT` and `LIFY_STRICT_CAPABILITIES` from
//! the environment; command-line flags override them.

mod frame;
mod systems;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use frame::{FrameConfig, FrameLoop};
use lify_entity::{EntityManager, ManagerConfig};

#[derive(Debug, Parser)]
#[command(name = "lify_app", about = "Frame-staged entity manager demo")]
struct Args {
    /// Number of frames to run (0 = unlimited)
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Target frames per second
    #[arg(short = 'r', long, default_value_t = 60.0, value_parser = parse_frame_rate)]
    frame_rate: f64,

    /// Number of concurrent spawner systems
    #[arg(short, long, default_value_t = 4)]
    spawners: usize,

    /// Entities each spawner creates per frame
    #[arg(short = 'n', long, default_value_t = 8)]
    spawns_per_frame: usize,

    /// Pre-allocation hint for entity collections and stores
    #[arg(long)]
    size_hint: Option<usize>,

    /// Accept capability bits that have no backing store
    #[arg(long)]
    permissive: bool,
}

/// Accept only finite, positive frame rates.
fn parse_frame_rate(raw: &str) -> Result<f64, String> {
    let rate: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("must be a positive number, got {raw}"))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("lify_app=info".parse()?))
        .init();

    let args = Args::parse();

    let mut manager_config = ManagerConfig::from_env()?;
    if let Some(size_hint) = args.size_hint {
        manager_config.size_hint = size_hint;
    }
    if args.permissive {
        manager_config.strict_capabilities = false;
    }

    let config = FrameConfig {
        frame_rate: args.frame_rate,
        max_frames: args.frames,
        spawners: args.spawners,
        spawns_per_frame: args.spawns_per_frame,
    };

    info!(?config, ?manager_config, "frame driver starting");

    let mut frame_loop = FrameLoop::new(config, EntityManager::with_config(manager_config));
    frame_loop.run()?;

    info!(
        frames = frame_loop.frame_id(),
        entities = frame_loop.manager().len(),
        "frame driver shut down"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("30"), Ok(30.0));
        assert_eq!(parse_frame_rate("0.5"), Ok(0.5));
        assert!(parse_frame_rate("0").is_err());
        assert!(parse_frame_rate("-60").is_err());
        assert!(parse_frame_rate("NaN").is_err());
        assert!(parse_frame_rate("inf").is_err());
        assert!(parse_frame_rate("fast").is_err());
    }

    #[test]
    fn test_cli_rejects_zero_frame_rate() {
        assert!(Args::try_parse_from(["lify_app", "--frame-rate", "0"]).is_err());
        let args = Args::try_parse_from(["lify_app", "--frame-rate", "120"]).unwrap();
        assert_eq!(args.frame_rate, 120.0);
    }
}
