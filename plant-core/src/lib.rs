//! Core 2-D plant growth simulation library.
//!
//! A plant grows over discrete cycles: shoot tips climb towards the light,
//! split and flower, while root tips follow the soil moisture. The result
//! is plain geometry (segments, leaves and flowers) for an external
//! renderer to draw.
//!
//! Main components:
//! - [`fields`] — sunlight, temperature and moisture scalar fields.
//! - [`growth_rule`] — the per-tip shoot advance rule.
//! - [`plant`] — the plant state and its append-only geometry.
//! - [`phases`] — above- and below-ground halves of one cycle.
//! - [`engine`] — the cycle loop driving a plant.
//! - [`observer`] — per-cycle progress reports.
//! - [`config`] — the parameter record and its validation.
//! - [`types`] — positions, tips, segments, leaves and flowers.

pub mod config;
pub mod engine;
pub mod fields;
pub mod growth_rule;
pub mod observer;
pub mod phases;
pub mod plant;
pub mod types;

pub use config::{Config, ConfigError};
pub use engine::GrowthEngine;
pub use observer::{CycleReport, GrowthObserver, LogObserver, NullObserver};
pub use plant::{PlantCounts, PlantState};
pub use types::{Flower, Leaf, Position, Segment, Tip};
