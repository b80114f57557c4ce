//! Headless runner for the plant growth simulation.
//!
//! Builds a [`Config`] from the defaults plus `KEY=VALUE` overrides given
//! on the command line, grows a plant from the middle of the soil patch
//! and logs a summary of the resulting geometry.
//!
//! ```text
//! plant-run [--seed N] [KEY=VALUE ...]
//! plant-run --seed 7 CYCLES=80 BRANCH_PROB=0.4 FLOWER_COLORS=red,white
//! ```
//!
//! Logging goes through `env_logger`; set `RUST_LOG=warn` to silence the
//! per-cycle lines.

use anyhow::{Context, bail};
use glam::DVec2;
use plant_core::{Config, GrowthEngine, PlantState, Position, Segment};
use std::time::{SystemTime, UNIX_EPOCH};

/// Parsed command line.
struct Args {
    cfg: Config,
    seed: u64,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut cfg = Config::default();
    let mut seed = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--seed" {
            let value = args.next().context("--seed needs a value")?;
            seed = Some(
                value
                    .parse::<u64>()
                    .with_context(|| format!("invalid seed `{value}`"))?,
            );
        } else if let Some((key, value)) = arg.split_once('=') {
            cfg.set(key, value)
                .with_context(|| format!("bad override `{arg}`"))?;
        } else {
            bail!("unexpected argument `{arg}` (expected --seed N or KEY=VALUE)");
        }
    }

    let seed = match seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default(),
    };
    Ok(Args { cfg, seed })
}

/// Axis-aligned bounds of a set of segments, `None` when there are none.
fn bounds(segments: &[Segment]) -> Option<(DVec2, DVec2)> {
    segments
        .iter()
        .flat_map(|s| [s.start, s.end])
        .fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
}

fn log_summary(plant: &PlantState, cfg: &Config) {
    let counts = plant.counts();
    log::info!(
        "Grew {} cycles: {} branches, {} roots, {} leaves, {} flowers, {} shoot tips",
        plant.cycles_run(),
        counts.branches,
        counts.roots,
        counts.leaves,
        counts.flowers,
        counts.branch_tips,
    );

    if let Some((lo, hi)) = bounds(plant.branches()) {
        log::info!("Shoot extent: x {:.2}..{:.2}, y {:.2}..{:.2}", lo.x, hi.x, lo.y, hi.y);
    }
    if let Some((lo, hi)) = bounds(plant.roots()) {
        log::info!("Root extent: x {:.2}..{:.2}, y {:.2}..{:.2}", lo.x, hi.x, lo.y, hi.y);
        if lo.y < -cfg.soil_depth {
            log::warn!(
                "Roots reach y = {:.2}, below the soil depth of {}",
                lo.y,
                cfg.soil_depth
            );
        }
    }
}

/// Parses arguments, grows the plant and logs the outcome.
///
/// ### Returns
/// - `Ok(())` after a completed run.
/// - `Err` on malformed arguments or an invalid parameter record.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args { cfg, seed } = parse_args(std::env::args().skip(1))?;
    log::info!("Seed {seed}");

    let origin = Position::new(cfg.width / 2.0, 0.0);
    let mut engine =
        GrowthEngine::seeded(origin, cfg, seed).context("invalid simulation parameters")?;
    engine.grow_default();

    log_summary(engine.plant(), engine.config());
    Ok(())
}
