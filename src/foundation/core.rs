use crate::foundation::error::{StudioError, StudioResult};

pub use kurbo::{Affine, Point, Vec2};

/// Output raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> StudioResult<Self> {
        if width == 0 || height == 0 {
            return Err(StudioError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Geometric center of the canvas in pixel coordinates.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// On-screen preview box, used to map preview-space pixel offsets into
/// raster-space pixel offsets when the two differ in size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in preview-space pixels.
    pub width: f64,
    /// Height in preview-space pixels.
    pub height: f64,
}

impl Viewport {
    /// Build a viewport, rejecting non-finite or non-positive dimensions.
    pub fn new(width: f64, height: f64) -> StudioResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(StudioError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Per-axis ratio that converts a preview-space offset into an offset on
    /// `canvas`. Identity when the viewport matches the canvas exactly.
    pub fn offset_ratio(self, canvas: Canvas) -> Vec2 {
        Vec2::new(
            f64::from(canvas.width) / self.width,
            f64::from(canvas.height) / self.height,
        )
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red, premultiplied by alpha.
    pub r: u8,
    /// Green, premultiplied by alpha.
    pub g: u8,
    /// Blue, premultiplied by alpha.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black, the compositor's clear color.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight (non-premultiplied) RGBA to premultiplied form.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

/// Non-uniform visual scale derived from model dimensions vs their baseline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleFactors {
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
}

impl ScaleFactors {
    /// No scaling on either axis.
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Average of both axes; the size-advisory heuristic keys off this.
    pub fn mean(self) -> f64 {
        (self.scale_x + self.scale_y) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
