//! The two halves of one growth cycle.
//!
//! Every cycle runs:
//! 1. [`shoot_phase`] — above ground. Every shoot tip advances through
//!    [`branch_growth`], leaves a segment and a leaf behind, may bifurcate,
//!    and may flower once the plant is old enough.
//! 2. [`root_phase`] — below ground. Every root tip advances by a length
//!    set by the local soil moisture.
//!
//! Both phases append geometry in tip order and install the next tip
//! generation through the stall policy of [`PlantState`].

use crate::{
    config::Config,
    fields,
    growth_rule::{TipBatch, branch_growth},
    plant::PlantState,
    types::{Flower, Leaf, Position, Segment, Tip},
};
use rand::{Rng, seq::IndexedRandom};

/// Forces a shoot endpoint to stay on or above the ground line `y = 0`.
#[inline]
pub fn ground_clamp(mut pos: Position) -> Position {
    if pos.y < 0.0 {
        pos.y = 0.0;
    }
    pos
}

/// Advances all shoot tips of `plant` by one cycle.
///
/// Does nothing when the plant has no shoot tips. Otherwise:
///
/// 1. Draws one angle offset per tip, then one bifurcation value per tip.
/// 2. Runs [`branch_growth`] on the whole tip batch.
/// 3. For each tip, in order:
///    - ground-clamps the new endpoint and appends a [`Segment`] from the
///      old position plus a [`Leaf`] of size `leaf_base_size * gf`;
///    - queues the advanced tip for the next generation;
///    - if the tip's bifurcation value is below `branch_prob * gf`, draws a
///      fresh angle offset and grows a second segment (and leaf) of length
///      `base_branch_len * gf` from the same start, queuing that tip too.
/// 4. If `cycle >= cfg.flower_cycle_start`, puts a flower on every queued
///    tip, with a color drawn from `cfg.flower_colors`.
/// 5. Replaces the shoot tips with the queued generation (kept as-is if
///    the generation is empty).
///
/// ### Parameters
/// - `plant` - Plant to mutate.
/// - `cfg` - Growth parameters.
/// - `cycle` - 1-based index of the cycle being run.
/// - `rng` - Random source for offsets, bifurcation and flower colors.
pub fn shoot_phase(plant: &mut PlantState, cfg: &Config, cycle: usize, rng: &mut impl Rng) {
    let n = plant.branch_tips.len();
    if n == 0 {
        return;
    }

    let batch = TipBatch::from_tips(&plant.branch_tips);
    let rand_off: Vec<f64> = (0..n).map(|_| rng.random()).collect();
    let rand_br: Vec<f64> = (0..n).map(|_| rng.random()).collect();
    let steps = branch_growth(&batch, &rand_off, cfg);

    let mut next = Vec::with_capacity(n * 2);
    for ((tip, step), &br) in plant.branch_tips.iter().zip(&steps).zip(&rand_br) {
        let start = tip.pos;
        let gf = step.growth_factor;

        let end = ground_clamp(step.pos);
        plant.branches.push(Segment::new(start, end));
        plant.leaves.push(Leaf {
            pos: end,
            size: cfg.leaf_base_size * gf,
        });
        next.push(Tip::new(end, step.angle));

        // The same draw that paired with this tip decides the split.
        if br < cfg.branch_prob * gf {
            let theta = tip.angle + (rng.random::<f64>() * 2.0 - 1.0) * cfg.branch_angle_range;
            let length = cfg.base_branch_len * gf;
            let end = ground_clamp(start + length * Position::new(theta.cos(), theta.sin()));

            plant.branches.push(Segment::new(start, end));
            plant.leaves.push(Leaf {
                pos: end,
                size: cfg.leaf_base_size * gf,
            });
            next.push(Tip::new(end, theta));
        }
    }

    if cycle >= cfg.flower_cycle_start {
        for tip in &next {
            if let Some(color) = cfg.flower_colors.choose(rng) {
                plant.flowers.push(Flower {
                    pos: tip.pos,
                    size: cfg.flower_base_size,
                    color: color.clone(),
                });
            }
        }
    }

    plant.replace_branch_tips(next);
}

/// Advances all root tips of `plant` by one cycle.
///
/// Each root tip moves `base_root_len * moisture(tip)` along its heading
/// perturbed by a uniform offset in `[-root_angle_range, root_angle_range)`,
/// computed as `(2u - 1) * root_angle_range` like the shoot offsets.
/// Roots are never ground-clamped and never branch.
///
/// ### Parameters
/// - `plant` - Plant to mutate.
/// - `cfg` - Growth parameters.
/// - `rng` - Random source for the angular offsets.
pub fn root_phase(plant: &mut PlantState, cfg: &Config, rng: &mut impl Rng) {
    let range = cfg.root_angle_range;
    let mut next = Vec::with_capacity(plant.root_tips.len());

    for tip in &plant.root_tips {
        let water = fields::moisture(tip.pos.x, tip.pos.y, cfg.width, cfg.height);
        let length = cfg.base_root_len * water;
        let theta = tip.angle + (rng.random::<f64>() * 2.0 - 1.0) * range;
        let end = tip.pos + length * Position::new(theta.cos(), theta.sin());

        plant.roots.push(Segment::new(tip.pos, end));
        next.push(Tip::new(end, theta));
    }

    plant.replace_root_tips(next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth_rule::growth_factor;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::FRAC_PI_2;

    fn straight_cfg() -> Config {
        Config {
            branch_angle_range: 0.0,
            root_angle_range: 0.0,
            branch_prob: 0.0,
            ..Config::default()
        }
    }

    fn seedling() -> PlantState {
        PlantState::new(Position::new(50.0, 0.0))
    }

    fn gf_at(pos: Position, cfg: &Config) -> f64 {
        growth_factor(
            fields::sunlight(pos.y, cfg.height),
            fields::temperature(pos.x, cfg.width),
            fields::moisture(pos.x, pos.y, cfg.width, cfg.height),
        )
    }

    #[test]
    fn ground_clamp_only_touches_negative_y() {
        assert_eq!(
            ground_clamp(Position::new(3.0, -2.0)),
            Position::new(3.0, 0.0)
        );
        assert_eq!(
            ground_clamp(Position::new(3.0, 2.0)),
            Position::new(3.0, 2.0)
        );
    }

    #[test]
    fn shoot_pointing_down_is_clamped_to_ground() {
        let cfg = straight_cfg();
        let mut plant = seedling();
        plant.branch_tips[0].angle = -FRAC_PI_2;
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        shoot_phase(&mut plant, &cfg, 1, &mut rng);

        assert_eq!(plant.branches.len(), 1);
        assert_eq!(plant.branches[0].end.y, 0.0);
        assert_eq!(plant.branch_tips[0].pos.y, 0.0);
        assert_eq!(plant.branch_tips[0].angle, -FRAC_PI_2);
    }

    #[test]
    fn shoot_leaves_a_leaf_sized_by_growth_factor() {
        let cfg = straight_cfg();
        let mut plant = seedling();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let gf = gf_at(Position::new(50.0, 0.0), &cfg);

        shoot_phase(&mut plant, &cfg, 1, &mut rng);

        assert_eq!(plant.leaves.len(), 1);
        assert_eq!(plant.leaves[0].pos, plant.branches[0].end);
        assert_eq!(plant.leaves[0].size, cfg.leaf_base_size * gf);
    }

    #[test]
    fn certain_bifurcation_spawns_second_branch_from_same_start() {
        let cfg = Config {
            // gf is positive here, so any value in [0, 1) passes.
            branch_prob: 1.0e6,
            ..Config::default()
        };
        let mut plant = seedling();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let start = plant.branch_tips[0].pos;
        let gf = gf_at(start, &cfg);

        shoot_phase(&mut plant, &cfg, 1, &mut rng);

        assert_eq!(plant.branch_tips.len(), 2);
        assert_eq!(plant.branches.len(), 2);
        assert_eq!(plant.leaves.len(), 2);
        assert!(plant.branches.iter().all(|s| s.start == start));

        // The split branch has the full base length scaled by gf.
        let second = plant.branches[1];
        assert!((second.length() - cfg.base_branch_len * gf).abs() < 1e-12);
        assert_eq!(plant.branch_tips[1].pos, second.end);
        assert_eq!(plant.leaves[1].size, plant.leaves[0].size);
    }

    #[test]
    fn split_branch_angle_comes_from_a_fresh_draw() {
        let cfg = Config {
            branch_prob: 1.0e6,
            branch_angle_range: 0.5,
            ..Config::default()
        };
        let angle = FRAC_PI_2;

        // One tip draws: offset, split value, then the split angle.
        let mut replay = ChaCha8Rng::seed_from_u64(9);
        let offset: f64 = replay.random();
        let _split: f64 = replay.random();
        let fresh: f64 = replay.random();

        let mut plant = seedling();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        shoot_phase(&mut plant, &cfg, 1, &mut rng);

        assert_eq!(plant.branch_tips.len(), 2);
        assert_eq!(
            plant.branch_tips[0].angle,
            angle + (offset * 2.0 - 1.0) * cfg.branch_angle_range
        );
        assert_eq!(
            plant.branch_tips[1].angle,
            angle + (fresh * 2.0 - 1.0) * cfg.branch_angle_range
        );
        assert_ne!(plant.branch_tips[1].angle, plant.branch_tips[0].angle);
    }

    #[test]
    fn bifurcation_is_gated_by_the_paired_draw() {
        let cfg = Config {
            branch_prob: 2.0,
            ..Config::default()
        };
        let start = Position::new(50.0, 0.0);
        let threshold = cfg.branch_prob * gf_at(start, &cfg);
        let mut outcomes = [0usize; 2];

        for seed in 0..64 {
            // Replay the draws the phase makes: offset first, then split value.
            let mut replay = ChaCha8Rng::seed_from_u64(seed);
            let _offset: f64 = replay.random();
            let split: f64 = replay.random();
            let expected = if split < threshold { 2 } else { 1 };

            let mut plant = seedling();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            shoot_phase(&mut plant, &cfg, 1, &mut rng);

            assert_eq!(plant.branch_tips.len(), expected, "seed {seed}");
            assert_eq!(plant.branches.len(), expected, "seed {seed}");
            outcomes[expected - 1] += 1;
        }

        assert!(outcomes[0] > 0 && outcomes[1] > 0, "{outcomes:?}");
    }

    #[test]
    fn flowers_start_at_the_configured_cycle() {
        let cfg = Config {
            flower_cycle_start: 3,
            branch_prob: 1.0e6,
            ..Config::default()
        };
        let mut plant = seedling();
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        shoot_phase(&mut plant, &cfg, 1, &mut rng);
        shoot_phase(&mut plant, &cfg, 2, &mut rng);
        assert!(plant.flowers.is_empty());

        shoot_phase(&mut plant, &cfg, 3, &mut rng);

        // Every tip bifurcates: 1 -> 2 -> 4 -> 8.
        assert_eq!(plant.branch_tips.len(), 8);
        assert_eq!(plant.flowers.len(), 8);
        for (flower, tip) in plant.flowers.iter().zip(&plant.branch_tips) {
            assert_eq!(flower.pos, tip.pos);
            assert_eq!(flower.size, cfg.flower_base_size);
            assert!(cfg.flower_colors.contains(&flower.color));
        }
    }

    #[test]
    fn shoot_phase_without_tips_is_a_no_op() {
        let cfg = Config::default();
        let mut plant = seedling();
        plant.branch_tips.clear();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        shoot_phase(&mut plant, &cfg, 50, &mut rng);

        assert!(plant.branch_tips.is_empty());
        assert!(plant.branches.is_empty());
        assert!(plant.flowers.is_empty());
    }

    #[test]
    fn root_grows_by_moisture_and_is_not_clamped() {
        let cfg = straight_cfg();
        let mut plant = seedling();
        // Point the root upwards; nothing stops it crossing y = 0.
        plant.root_tips[0].angle = FRAC_PI_2;
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let water = fields::moisture(50.0, 0.0, cfg.width, cfg.height);

        root_phase(&mut plant, &cfg, &mut rng);

        assert_eq!(plant.roots.len(), 1);
        let seg = plant.roots[0];
        assert_eq!(seg.start, Position::new(50.0, 0.0));
        assert!(seg.end.y > 0.0);
        assert!((seg.length() - cfg.base_root_len * water).abs() < 1e-12);
        assert_eq!(plant.root_tips, vec![Tip::new(seg.end, FRAC_PI_2)]);
    }

    #[test]
    fn root_angle_stays_within_range() {
        let cfg = Config::default();
        let mut plant = seedling();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..20 {
            let before = plant.root_tips[0].angle;
            root_phase(&mut plant, &cfg, &mut rng);
            let delta = plant.root_tips[0].angle - before;
            assert!(delta.abs() <= cfg.root_angle_range + 1e-12);
        }
        assert_eq!(plant.roots.len(), 20);
        assert_eq!(plant.root_tips.len(), 1);
    }

    #[test]
    fn negative_root_angle_range_does_not_panic() {
        let cfg = Config {
            root_angle_range: -0.1,
            ..Config::default()
        };
        let mut plant = seedling();
        let mut rng = ChaCha8Rng::seed_from_u64(10);

        root_phase(&mut plant, &cfg, &mut rng);

        assert_eq!(plant.roots.len(), 1);
        let delta = plant.root_tips[0].angle + FRAC_PI_2;
        assert!(delta.abs() <= 0.1 + 1e-12, "delta {delta}");
    }

    #[test]
    fn root_phase_without_tips_keeps_empty_set() {
        let cfg = Config::default();
        let mut plant = seedling();
        plant.root_tips.clear();
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        root_phase(&mut plant, &cfg, &mut rng);

        assert!(plant.roots.is_empty());
        assert!(plant.root_tips.is_empty());
    }
}
