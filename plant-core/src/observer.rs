//! Per-cycle progress telemetry.
//!
//! The engine hands a [`CycleReport`] to its [`GrowthObserver`] after every
//! cycle. Reports are advisory; observers cannot influence growth.

use std::time::Duration;

/// What changed during one growth cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleReport {
    /// 1-based cycle index within the current `grow` call.
    pub cycle: usize,
    /// Shoot tip count before and after the cycle.
    pub branch_tips: (usize, usize),
    /// Root tip count before and after the cycle.
    pub root_tips: (usize, usize),
    pub branches_added: usize,
    pub roots_added: usize,
    pub leaves_added: usize,
    pub flowers_added: usize,
    pub elapsed: Duration,
}

/// Receives a [`CycleReport`] after every cycle.
pub trait GrowthObserver {
    /// Called once at the start of every `grow` call.
    fn on_start(&mut self, _cycles: usize) {}

    fn on_cycle(&mut self, report: &CycleReport);
}

/// Writes one `info` line per cycle through the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

/// Discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl CycleReport {
    /// Single-line summary, e.g.
    /// `Cycle   3: Δtips=2->3 Δbr=2 Δrt=1 Δlv=2 Δfl=0 time=0.000s`.
    pub fn summary(&self) -> String {
        format!(
            "Cycle {:>3}: Δtips={}->{} Δbr={} Δrt={} Δlv={} Δfl={} time={:.3}s",
            self.cycle,
            self.branch_tips.0,
            self.branch_tips.1,
            self.branches_added,
            self.roots_added,
            self.leaves_added,
            self.flowers_added,
            self.elapsed.as_secs_f64(),
        )
    }
}

impl GrowthObserver for LogObserver {
    fn on_start(&mut self, cycles: usize) {
        log::info!("Starting growth for {cycles} cycles...");
    }

    fn on_cycle(&mut self, report: &CycleReport) {
        log::info!("{}", report.summary());
    }
}

impl GrowthObserver for NullObserver {
    fn on_cycle(&mut self, _report: &CycleReport) {}
}

impl<F> GrowthObserver for F
where
    F: FnMut(&CycleReport),
{
    fn on_cycle(&mut self, report: &CycleReport) {
        self(report)
    }
}
