//! The growth engine: owns a [`PlantState`] and drives its cycle loop.
//!
//! The engine is the only thing that mutates its plant. Each cycle it runs
//! [`phases::shoot_phase`] followed by [`phases::root_phase`], then reports
//! the deltas to its [`GrowthObserver`].

use crate::{
    config::{Config, ConfigError},
    observer::{CycleReport, GrowthObserver, LogObserver},
    phases,
    plant::PlantState,
    types::{Flower, Leaf, Position, Segment},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Drives a [`PlantState`] through discrete growth cycles.
///
/// ### Fields
/// - `plant` - The plant being grown.
/// - `cfg` - Validated growth parameters, fixed for the engine's life.
/// - `rng` - Random source for every stochastic choice.
/// - `observer` - Receives one [`CycleReport`] per cycle.
pub struct GrowthEngine<R: Rng = ChaCha8Rng> {
    plant: PlantState,
    cfg: Config,
    rng: R,
    observer: Box<dyn GrowthObserver>,
}

impl GrowthEngine<ChaCha8Rng> {
    /// Builds an engine whose random source is a `ChaCha8Rng` seeded from
    /// `seed`. Two engines built with equal arguments grow identical plants.
    ///
    /// ### Errors
    /// Returns the first [`ConfigError`] reported by [`Config::validate`].
    pub fn seeded(origin: Position, cfg: Config, seed: u64) -> Result<Self, ConfigError> {
        Self::new(origin, cfg, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> GrowthEngine<R> {
    /// Builds an engine for a seedling at `origin`.
    ///
    /// The seedling has one shoot tip heading up (`π/2`) and one root tip
    /// heading down (`-π/2`). Progress is reported through [`LogObserver`]
    /// until [`GrowthEngine::with_observer`] swaps it out.
    ///
    /// ### Parameters
    /// - `origin` - Where both initial tips start.
    /// - `cfg` - Growth parameters; validated here.
    /// - `rng` - Random source consumed by every cycle.
    ///
    /// ### Errors
    /// Returns the first [`ConfigError`] reported by [`Config::validate`].
    pub fn new(origin: Position, cfg: Config, rng: R) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            plant: PlantState::new(origin),
            cfg,
            rng,
            observer: Box::new(LogObserver),
        })
    }

    /// Replaces the progress observer.
    pub fn with_observer(mut self, observer: impl GrowthObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn plant(&self) -> &PlantState {
        &self.plant
    }

    /// Hands the grown plant over, dropping the engine.
    pub fn into_plant(self) -> PlantState {
        self.plant
    }

    pub fn branches(&self) -> &[Segment] {
        self.plant.branches()
    }

    pub fn roots(&self) -> &[Segment] {
        self.plant.roots()
    }

    pub fn leaves(&self) -> &[Leaf] {
        self.plant.leaves()
    }

    pub fn flowers(&self) -> &[Flower] {
        self.plant.flowers()
    }

    /// Runs `cycles` growth cycles in place.
    ///
    /// Cycles are numbered `1..=cycles` within each call, so flowering
    /// onset is measured from the start of this call. The plant's lifetime
    /// count, [`PlantState::cycles_run`], keeps growing across calls.
    /// Geometry already present is never modified; new segments, leaves
    /// and flowers are appended.
    pub fn grow(&mut self, cycles: usize) {
        self.observer.on_start(cycles);

        for cycle in 1..=cycles {
            let report = self.step(cycle);
            self.observer.on_cycle(&report);
        }
    }

    /// Runs the default number of cycles, `config().cycles`.
    pub fn grow_default(&mut self) {
        self.grow(self.cfg.cycles);
    }

    /// Runs cycle `cycle` of the current call and returns what it changed.
    fn step(&mut self, cycle: usize) -> CycleReport {
        let start = Instant::now();
        let before = self.plant.counts();

        phases::shoot_phase(&mut self.plant, &self.cfg, cycle, &mut self.rng);
        phases::root_phase(&mut self.plant, &self.cfg, &mut self.rng);
        self.plant.cycles_run += 1;

        let after = self.plant.counts();
        CycleReport {
            cycle,
            branch_tips: (before.branch_tips, after.branch_tips),
            root_tips: (before.root_tips, after.root_tips),
            branches_added: after.branches - before.branches,
            roots_added: after.roots - before.roots,
            leaves_added: after.leaves - before.leaves,
            flowers_added: after.flowers - before.flowers,
            elapsed: start.elapsed(),
        }
    }
}
