//! Synthetic environmental scalar fields.
//!
//! Three stateless fields drive growth:
//! - [`sunlight`] — varies with height, `0.5 + 0.5 * sin(π y / H)`.
//! - [`temperature`] — varies across the patch, `20 + 10 * cos(π x / W)`.
//! - [`moisture`] — a Gaussian bump centred in the domain.
//!
//! Each field has a point form and a `*_batch` form. Batch forms return a
//! `Vec` index-aligned with their input, accept empty batches and switch
//! to a `rayon` parallel map once the batch reaches [`PAR_THRESHOLD`].
//!
//! None of the fields clamp their output: positions outside the nominal
//! domain (roots below `y = 0`, shoots above `HEIGHT`) extrapolate the
//! formulas as-is.

use rayon::prelude::*;
use std::f64::consts::PI;

/// Batch size from which field and growth evaluation runs in parallel.
pub const PAR_THRESHOLD: usize = 512;

/// Sunlight intensity at height `y`.
///
/// Nominally in `[0, 1]` for `y ∈ [0, height]`.
#[inline]
pub fn sunlight(y: f64, height: f64) -> f64 {
    0.5 + 0.5 * (PI * y / height).sin()
}

/// Temperature at horizontal position `x`.
///
/// Nominally in `[10, 30]` for `x ∈ [0, width]`.
#[inline]
pub fn temperature(x: f64, width: f64) -> f64 {
    20.0 + 10.0 * (PI * x / width).cos()
}

/// Soil moisture at `(x, y)`.
///
/// A 2-D Gaussian centred at `(width / 2, height / 2)` with standard
/// deviation `width / 4`, lifted into `(0.5, 1.0]`.
#[inline]
pub fn moisture(x: f64, y: f64, width: f64, height: f64) -> f64 {
    let cx = width / 2.0;
    let cy = height / 2.0;
    let sigma = width / 4.0;
    let dx = x - cx;
    let dy = y - cy;
    0.5 + 0.5 * (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp()
}

/// Evaluates [`sunlight`] for every entry of `ys`.
pub fn sunlight_batch(ys: &[f64], height: f64) -> Vec<f64> {
    map_batch(ys.len(), |i| sunlight(ys[i], height))
}

/// Evaluates [`temperature`] for every entry of `xs`.
pub fn temperature_batch(xs: &[f64], width: f64) -> Vec<f64> {
    map_batch(xs.len(), |i| temperature(xs[i], width))
}

/// Evaluates [`moisture`] for every `(xs[i], ys[i])` pair.
///
/// ### Panics
/// Panics if `xs` and `ys` differ in length.
pub fn moisture_batch(xs: &[f64], ys: &[f64], width: f64, height: f64) -> Vec<f64> {
    assert_eq!(xs.len(), ys.len(), "moisture_batch: x/y length mismatch");
    map_batch(xs.len(), |i| moisture(xs[i], ys[i], width, height))
}

/// Maps `f` over `0..len`, in parallel for large batches.
///
/// The output is index-aligned regardless of which path ran.
pub(crate) fn map_batch<T, F>(len: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if len >= PAR_THRESHOLD {
        (0..len).into_par_iter().map(f).collect()
    } else {
        (0..len).map(f).collect()
    }
}
