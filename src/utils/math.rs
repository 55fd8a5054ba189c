//! Small numeric helpers shared by every part of the indoor model.

use chrono::NaiveDateTime;

use super::random::RandomSource;

/// Restrict `value` to `[min, max]`. Either bound may be omitted.
///
/// The lower bound is applied first, so an inverted pair (`min > max`)
/// resolves to `max`.
pub fn clamp(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut v = value;
    if let Some(lo) = min {
        if v < lo {
            v = lo;
        }
    }
    if let Some(hi) = max {
        if v > hi {
            v = hi;
        }
    }
    v
}

/// Linear interpolation `start + (end - start) * factor`.
///
/// `factor` is not clamped here; callers keep it in `[0, 1]`.
pub fn interpolate(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}

/// Perturb `value` by a uniform offset in `[-magnitude, +magnitude]`.
pub fn fluctuate<R: RandomSource + ?Sized>(value: f64, magnitude: f64, rng: &mut R) -> f64 {
    let magnitude = magnitude.abs();
    value + rng.uniform(-magnitude, magnitude)
}

/// Fraction of the `[start, end]` window elapsed at `now`.
///
/// Returns 0.0 at or before `start`, 1.0 at or after `end`, and the linear
/// fraction in between. A zero-length window is treated as already elapsed.
pub fn time_factor(now: NaiveDateTime, start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    if now <= start {
        return 0.0;
    }
    if now >= end {
        return 1.0;
    }
    let total = (end - start).num_milliseconds() as f64;
    let elapsed = (now - start).num_milliseconds() as f64;
    elapsed / total
}
