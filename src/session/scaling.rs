use crate::{
    foundation::core::ScaleFactors,
    session::model::{Baseline, ModelDimensions},
};

/// Derived scale factors never leave this range, whatever the sliders say.
pub const SCALE_FACTOR_MIN: f64 = 0.5;
/// Upper bound of the derived scale factor range.
pub const SCALE_FACTOR_MAX: f64 = 1.5;

/// Map body dimensions against a model baseline to per-axis visual scale.
///
/// Height drives the vertical factor, weight the horizontal one; each ratio
/// is clamped to [0.5, 1.5]. A baseline component ≤ 0 yields 1.0 for that
/// axis. Pure and deterministic: the preview and the compositor both call
/// this so their factors agree bit-for-bit.
pub fn compute_scale_factors(dims: ModelDimensions, baseline: Baseline) -> ScaleFactors {
    ScaleFactors {
        scale_x: axis_factor(dims.weight_kg, baseline.weight_kg),
        scale_y: axis_factor(dims.height_cm, baseline.height_cm),
    }
}

fn axis_factor(value: f64, base: f64) -> f64 {
    if base <= 0.0 || !base.is_finite() || !value.is_finite() {
        return 1.0;
    }
    (value / base).clamp(SCALE_FACTOR_MIN, SCALE_FACTOR_MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/session/scaling.rs"]
mod tests;
