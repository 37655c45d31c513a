use kurbo::{Point, Vec2};

use crate::{
    foundation::error::StudioResult,
    session::commands::StudioEffect,
    session::model::{LayerSlot, StudioSession},
    session::transforms::TransformPatch,
};

/// An in-flight drag over one garment layer.
///
/// Pointer-down captures the slot's offset as the drag origin; every move
/// applies `origin + (pointer − pointer_start)` immediately, with no
/// smoothing. The other slot is never touched. Pointer-up needs no
/// round-trip: the store already holds the live value, so the gesture is
/// simply dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGesture {
    slot: LayerSlot,
    origin: Vec2,
    pointer_start: Point,
}

impl DragGesture {
    /// Start dragging the garment in `slot`. Fails when the slot is empty.
    /// Also points the adjustment controls at the dragged slot, matching
    /// what a pointer-down on a layer means in the UI.
    pub fn begin(
        session: &mut StudioSession,
        slot: LayerSlot,
        pointer: Point,
    ) -> StudioResult<Self> {
        session.set_active_slot(slot)?;
        Ok(Self {
            slot,
            origin: session.transforms().get(slot).offset,
            pointer_start: pointer,
        })
    }

    /// The slot this gesture drags.
    pub fn slot(&self) -> LayerSlot {
        self.slot
    }

    /// The offset this gesture produces for the current pointer position.
    pub fn offset_at(&self, pointer: Point) -> Vec2 {
        self.origin + (pointer - self.pointer_start)
    }

    /// Apply the pointer position to the dragged slot's transform.
    pub fn update(&self, session: &mut StudioSession, pointer: Point) -> Vec<StudioEffect> {
        let offset = self.offset_at(pointer);
        session
            .transforms_mut()
            .update(self.slot, TransformPatch::offset(offset));
        vec![StudioEffect::ReprojectSlot(self.slot)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/drag.rs"]
mod tests;
