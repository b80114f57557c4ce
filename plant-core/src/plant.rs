use crate::types::{Flower, Leaf, Position, Segment, Tip};
use std::f64::consts::FRAC_PI_2;

/// Sizes of every growing collection at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlantCounts {
    pub branch_tips: usize,
    pub root_tips: usize,
    pub branches: usize,
    pub roots: usize,
    pub leaves: usize,
    pub flowers: usize,
}

/// The whole evolving plant.
///
/// Geometry collections are append-only: once a segment, leaf or flower
/// has been pushed it keeps its index and value for the lifetime of the
/// state. Only the two tip sets are replaced between cycles.
#[derive(Clone, Debug)]
pub struct PlantState {
    pub(crate) branch_tips: Vec<Tip>,
    pub(crate) root_tips: Vec<Tip>,
    pub(crate) branches: Vec<Segment>,
    pub(crate) roots: Vec<Segment>,
    pub(crate) leaves: Vec<Leaf>,
    pub(crate) flowers: Vec<Flower>,
    pub(crate) cycles_run: usize,
}

impl PlantState {
    /// A seedling at `origin`: a shoot tip heading up and a root tip
    /// heading down, with no geometry yet.
    pub fn new(origin: Position) -> Self {
        Self {
            branch_tips: vec![Tip::new(origin, FRAC_PI_2)],
            root_tips: vec![Tip::new(origin, -FRAC_PI_2)],
            branches: Vec::new(),
            roots: Vec::new(),
            leaves: Vec::new(),
            flowers: Vec::new(),
            cycles_run: 0,
        }
    }

    pub fn branch_tips(&self) -> &[Tip] {
        &self.branch_tips
    }

    pub fn root_tips(&self) -> &[Tip] {
        &self.root_tips
    }

    pub fn branches(&self) -> &[Segment] {
        &self.branches
    }

    pub fn roots(&self) -> &[Segment] {
        &self.roots
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    /// Number of cycles grown so far, over every `grow` call.
    pub fn cycles_run(&self) -> usize {
        self.cycles_run
    }

    pub fn counts(&self) -> PlantCounts {
        PlantCounts {
            branch_tips: self.branch_tips.len(),
            root_tips: self.root_tips.len(),
            branches: self.branches.len(),
            roots: self.roots.len(),
            leaves: self.leaves.len(),
            flowers: self.flowers.len(),
        }
    }

    /// Installs the next shoot generation unless it is empty, in which
    /// case the current tips are kept (growth stalls).
    pub(crate) fn replace_branch_tips(&mut self, next: Vec<Tip>) {
        if !next.is_empty() {
            self.branch_tips = next;
        }
    }

    /// Root counterpart of [`PlantState::replace_branch_tips`].
    pub(crate) fn replace_root_tips(&mut self, next: Vec<Tip>) {
        if !next.is_empty() {
            self.root_tips = next;
        }
    }
}
