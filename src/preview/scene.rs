use kurbo::{Affine, Point, Vec2};

use crate::{
    assets::store::ImageRef,
    foundation::core::ScaleFactors,
    session::model::{LayerSlot, StudioSession, TransformState},
    session::scaling::compute_scale_factors,
};

/// The model layer of the live preview: image plus non-uniform scale,
/// anchored at the image's own center.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelLayer {
    /// The model's image source.
    pub image: ImageRef,
    /// Non-uniform scale from the dimension sliders.
    pub scale: ScaleFactors,
}

impl ModelLayer {
    /// Placement matrix mapping the model image's own pixel space (given its
    /// native `width`/`height`) onto the preview surface, centered on
    /// `anchor` and scaled per-axis about it.
    pub fn placement(&self, anchor: Point, width: f64, height: f64) -> Affine {
        Affine::translate(anchor.to_vec2())
            * Affine::scale_non_uniform(self.scale.scale_x, self.scale.scale_y)
            * Affine::translate(Vec2::new(-width / 2.0, -height / 2.0))
    }
}

/// One garment layer of the live preview.
#[derive(Clone, Debug, PartialEq)]
pub struct GarmentLayer {
    /// The slot this layer occupies.
    pub slot: LayerSlot,
    /// The garment's image source.
    pub image: ImageRef,
    /// The slot's display transform.
    pub transform: TransformState,
}

impl GarmentLayer {
    /// Placement matrix for a garment with native `width`/`height`: centered
    /// on the shared `anchor`, translated by the slot offset, scaled
    /// uniformly about its own center. Opacity is carried separately in
    /// [`Self::transform`].
    pub fn placement(&self, anchor: Point, width: f64, height: f64) -> Affine {
        Affine::translate(anchor.to_vec2() + self.transform.offset)
            * Affine::scale(self.transform.scale)
            * Affine::translate(Vec2::new(-width / 2.0, -height / 2.0))
    }
}

/// The fully projected preview: model layer plus garment layers in draw
/// order (Bottom first, Top above). Nothing here is rasterized; the UI layer
/// maps placements onto whatever surface it renders with.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewScene {
    /// The body model layer.
    pub model: ModelLayer,
    /// Garment layers in draw order.
    pub garments: Vec<GarmentLayer>,
}

/// Project the whole session into a preview scene.
#[tracing::instrument(skip(session))]
pub fn project(session: &StudioSession) -> PreviewScene {
    let model = project_model(session);
    let garments = LayerSlot::DRAW_ORDER
        .into_iter()
        .filter_map(|slot| project_slot(session, slot))
        .collect();
    PreviewScene { model, garments }
}

/// Project only the model layer (dimension slider input).
pub fn project_model(session: &StudioSession) -> ModelLayer {
    ModelLayer {
        image: session.model().image.clone(),
        scale: compute_scale_factors(session.dimensions(), session.model().baseline),
    }
}

/// Project a single garment slot; `None` when the slot is empty. Transform
/// edits re-project just the touched slot through this.
pub fn project_slot(session: &StudioSession, slot: LayerSlot) -> Option<GarmentLayer> {
    let item = session.assignment(slot)?;
    Some(GarmentLayer {
        slot,
        image: item.image.clone(),
        transform: session.transforms().get(slot),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/preview/scene.rs"]
mod tests;
