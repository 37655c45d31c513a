//! Heuristic size advice from the current model scaling and garment
//! transforms. An estimate, not a fit engine: the thresholds compare how far
//! the user pushed the body sliders against how far they resized the
//! garments to make them sit right.

use crate::{
    foundation::core::ScaleFactors,
    gallery::records::is_outerwear,
    session::model::{LayerSlot, StudioSession},
    session::scaling::compute_scale_factors,
};

/// Standard garment size bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeAdvice {
    /// Extra small.
    Xs,
    /// Small.
    S,
    /// Medium.
    M,
    /// Large.
    L,
    /// Extra large.
    Xl,
}

impl std::fmt::Display for SizeAdvice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Xs => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
        })
    }
}

/// Recommend a size for the current outfit, or `None` when no garment is
/// assigned.
///
/// Model factor is the mean of the two body scale axes; garment factor is the
/// mean scale across occupied slots. A scaled-up body wearing scaled-down
/// garments points at a larger size and vice versa, with extreme factors
/// pushing to XL or XS. Outerwear never advises below M.
pub fn recommend_size(session: &StudioSession) -> Option<SizeAdvice> {
    if !session.has_any_garment() {
        return None;
    }

    let ScaleFactors { scale_x, scale_y } =
        compute_scale_factors(session.dimensions(), session.model().baseline);
    let model_factor = (scale_x + scale_y) / 2.0;

    let garment_scales: Vec<f64> = LayerSlot::DRAW_ORDER
        .into_iter()
        .filter(|&slot| session.assignment(slot).is_some())
        .map(|slot| session.transforms().get(slot).scale)
        .collect();
    let garment_factor = garment_scales.iter().sum::<f64>() / garment_scales.len() as f64;

    let mut size = SizeAdvice::M;
    if model_factor > 1.1 && garment_factor < 0.95 {
        size = SizeAdvice::L;
    } else if model_factor < 0.9 && garment_factor > 1.05 {
        size = SizeAdvice::S;
    } else if garment_factor > 1.5 || model_factor > 1.3 {
        size = SizeAdvice::Xl;
    } else if garment_factor < 0.6 || model_factor < 0.7 {
        size = SizeAdvice::Xs;
    }

    let wearing_outerwear = LayerSlot::DRAW_ORDER
        .into_iter()
        .filter_map(|slot| session.assignment(slot))
        .any(|item| is_outerwear(&item.category));
    if wearing_outerwear && size < SizeAdvice::M {
        size = SizeAdvice::M;
    }

    Some(size)
}

#[cfg(test)]
#[path = "../tests/unit/advisory.rs"]
mod tests;
