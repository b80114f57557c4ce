//! Per-tip shoot advance rule.
//!
//! Given a batch of shoot tips and one uniform random value per tip, the
//! rule samples the environment at every tip, derives a growth factor and
//! returns where each tip moves next. Tips never interact, so the batch is
//! evaluated with [`crate::fields::map_batch`] and may run in parallel.

use crate::{
    config::Config,
    fields::{self, map_batch},
    types::{Position, Tip},
};

/// Structure-of-arrays view of a tip set, as fed to the scalar fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TipBatch {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub angle: Vec<f64>,
}

/// Result of advancing one tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthStep {
    /// New tip position before any ground clamp.
    pub pos: Position,
    /// New heading, `theta` in [`branch_growth`].
    pub angle: f64,
    /// Growth factor sampled at the pre-update position.
    pub growth_factor: f64,
}

impl TipBatch {
    pub fn from_tips(tips: &[Tip]) -> Self {
        Self {
            x: tips.iter().map(|t| t.pos.x).collect(),
            y: tips.iter().map(|t| t.pos.y).collect(),
            angle: tips.iter().map(|t| t.angle).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Environmental growth factor from sampled field values.
///
/// `sun * water * (1 - |temp - 25| / 50)`. Not clamped, so it turns
/// negative when `temp` is more than 50 degrees away from 25.
#[inline]
pub fn growth_factor(sun: f64, temp: f64, water: f64) -> f64 {
    sun * water * (1.0 - (temp - 25.0).abs() / 50.0)
}

/// Advances every tip of a shoot batch by one step.
///
/// For tip `i`:
/// 1. Sample sunlight, temperature and moisture at `(x[i], y[i])`.
/// 2. `gf = growth_factor(sun, temp, water)`.
/// 3. `length = cfg.base_branch_len * gf`.
/// 4. `theta = angle[i] + (2 * rand_off[i] - 1) * cfg.branch_angle_range`.
/// 5. The new position is `(x[i], y[i]) + length * (cos theta, sin theta)`.
///
/// ### Parameters
/// - `tips` - Current tip positions and headings.
/// - `rand_off` - One uniform value in `[0, 1)` per tip, used for the
///   angular perturbation.
/// - `cfg` - Provides `base_branch_len`, `branch_angle_range`, `width`
///   and `height`.
///
/// ### Returns
/// One [`GrowthStep`] per input tip, in input order.
///
/// ### Panics
/// Panics if `rand_off` and `tips` differ in length.
pub fn branch_growth(tips: &TipBatch, rand_off: &[f64], cfg: &Config) -> Vec<GrowthStep> {
    assert_eq!(
        tips.len(),
        rand_off.len(),
        "branch_growth: one angle offset per tip is required"
    );

    let sun = fields::sunlight_batch(&tips.y, cfg.height);
    let temp = fields::temperature_batch(&tips.x, cfg.width);
    let water = fields::moisture_batch(&tips.x, &tips.y, cfg.width, cfg.height);

    map_batch(tips.len(), |i| {
        let gf = growth_factor(sun[i], temp[i], water[i]);
        let length = cfg.base_branch_len * gf;
        let theta = tips.angle[i] + (rand_off[i] * 2.0 - 1.0) * cfg.branch_angle_range;
        let (sin, cos) = theta.sin_cos();

        GrowthStep {
            pos: Position::new(tips.x[i] + length * cos, tips.y[i] + length * sin),
            angle: theta,
            growth_factor: gf,
        }
    })
}
