use kurbo::Vec2;

use crate::session::model::{LayerSlot, TransformState};

/// Garment scale is kept within this range no matter what the sliders send.
pub const SCALE_MIN: f64 = 0.2;
/// Upper bound of the garment scale range.
pub const SCALE_MAX: f64 = 3.0;

/// Partial transform update merged into a slot's state by
/// [`TransformStore::update`]. Unset fields keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformPatch {
    /// New uniform scale, if set.
    pub scale: Option<f64>,
    /// New horizontal offset, if set.
    pub offset_x: Option<f64>,
    /// New vertical offset, if set.
    pub offset_y: Option<f64>,
    /// New opacity, if set.
    pub opacity: Option<f64>,
}

impl TransformPatch {
    /// Patch setting only the scale.
    pub fn scale(value: f64) -> Self {
        Self {
            scale: Some(value),
            ..Self::default()
        }
    }

    /// Patch setting only the offset (both axes).
    pub fn offset(value: Vec2) -> Self {
        Self {
            offset_x: Some(value.x),
            offset_y: Some(value.y),
            ..Self::default()
        }
    }

    /// Patch setting only the opacity.
    pub fn opacity(value: f64) -> Self {
        Self {
            opacity: Some(value),
            ..Self::default()
        }
    }
}

/// Holds the per-slot transform state for both garment layers.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformStore {
    states: [TransformState; 2],
}

impl TransformStore {
    /// Read-only snapshot of a slot's transform.
    pub fn get(&self, slot: LayerSlot) -> TransformState {
        self.states[slot.index()]
    }

    /// Set a slot back to the identity transform.
    pub fn reset(&mut self, slot: LayerSlot) {
        self.states[slot.index()] = TransformState::IDENTITY;
    }

    /// Merge `patch` into the slot's state. Scale is clamped to
    /// [`SCALE_MIN`, `SCALE_MAX`], opacity to [0, 1]; offsets are unclamped.
    /// Non-finite values are dropped. Returns the state after the merge.
    pub fn update(&mut self, slot: LayerSlot, patch: TransformPatch) -> TransformState {
        let state = &mut self.states[slot.index()];
        if let Some(scale) = patch.scale.filter(|v| v.is_finite()) {
            state.scale = scale.clamp(SCALE_MIN, SCALE_MAX);
        }
        if let Some(x) = patch.offset_x.filter(|v| v.is_finite()) {
            state.offset.x = x;
        }
        if let Some(y) = patch.offset_y.filter(|v| v.is_finite()) {
            state.offset.y = y;
        }
        if let Some(opacity) = patch.opacity.filter(|v| v.is_finite()) {
            state.opacity = opacity.clamp(0.0, 1.0);
        }
        *state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/transforms.rs"]
mod tests;
