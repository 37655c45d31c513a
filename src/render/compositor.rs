use kurbo::Vec2;
use rayon::prelude::*;

use crate::{
    assets::store::{ImageRef, PreparedImage, PreparedImageStore},
    foundation::core::{Canvas, ScaleFactors, Viewport},
    foundation::error::{StudioError, StudioResult},
    foundation::math::{lerp_u8, mul_div255_u8},
    session::model::{LayerSlot, StudioSession, TransformState},
    session::scaling::compute_scale_factors,
};

/// One garment to draw, captured at snapshot time.
#[derive(Clone, Debug, PartialEq)]
pub struct GarmentDraw {
    /// The slot this garment occupies.
    pub slot: LayerSlot,
    /// The garment's image source.
    pub image: ImageRef,
    /// The slot's display transform at snapshot time.
    pub transform: TransformState,
}

/// Immutable snapshot of everything the compositor needs for one save.
///
/// Taken at the moment the save action is invoked; slider or drag input after
/// that moment cannot affect an in-flight composite.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeJob {
    /// The model's image source.
    pub model_image: ImageRef,
    /// Non-uniform body scale at snapshot time.
    pub scale: ScaleFactors,
    /// Garments in draw order: Bottom first, Top above.
    pub layers: Vec<GarmentDraw>,
    /// The preview box the offsets were arranged in, when it differs from the
    /// output canvas. `None` means preview and raster share pixel units.
    pub viewport: Option<Viewport>,
}

impl CompositeJob {
    /// Capture the session state needed to composite. Rejects a session with
    /// zero occupied slots before any drawing can happen.
    pub fn snapshot(session: &StudioSession, viewport: Option<Viewport>) -> StudioResult<Self> {
        let layers: Vec<GarmentDraw> = LayerSlot::DRAW_ORDER
            .into_iter()
            .filter_map(|slot| {
                session.assignment(slot).map(|item| GarmentDraw {
                    slot,
                    image: item.image.clone(),
                    transform: session.transforms().get(slot),
                })
            })
            .collect();
        if layers.is_empty() {
            return Err(StudioError::input(
                "compositing requires at least one garment",
            ));
        }

        Ok(Self {
            model_image: session.model().image.clone(),
            scale: compute_scale_factors(session.dimensions(), session.model().baseline),
            layers,
            viewport,
        })
    }

    /// Every image reference this job draws, model first.
    pub fn image_refs(&self) -> impl Iterator<Item = &ImageRef> {
        std::iter::once(&self.model_image).chain(self.layers.iter().map(|l| &l.image))
    }
}

/// A flattened frame in row-major premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 bytes, 4 per pixel.
    pub rgba8_premul: Vec<u8>,
}

impl FrameRgba {
    fn new(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            rgba8_premul: vec![0u8; canvas.width as usize * canvas.height as usize * 4],
        }
    }

    /// Convert to a straight-alpha image for encoding or inspection.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut out = Vec::with_capacity(self.rgba8_premul.len());
        for px in self.rgba8_premul.chunks_exact(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                out.extend_from_slice(&[0, 0, 0, 0]);
                continue;
            }
            for c in &px[..3] {
                out.push(((u16::from(*c) * 255 + a / 2) / a).min(255) as u8);
            }
            out.push(px[3]);
        }
        image::RgbaImage::from_raw(self.width, self.height, out)
            .expect("frame buffer length matches dimensions")
    }

    /// Encode the frame as PNG bytes (straight alpha).
    pub fn encode_png(&self) -> StudioResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.to_rgba_image()
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .map_err(|e| StudioError::decode(format!("encode composite png: {e}")))?;
        Ok(bytes)
    }
}

/// Axis-aligned destination rectangle in canvas pixel coordinates.
#[derive(Clone, Copy, Debug)]
struct DstRect {
    x0: f64,
    y0: f64,
    width: f64,
    height: f64,
}

impl DstRect {
    fn centered_at(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            x0: cx - width / 2.0,
            y0: cy - height / 2.0,
            width,
            height,
        }
    }
}

/// Render the job into a flattened raster.
///
/// The output canvas takes the model image's native pixel dimensions, so the
/// result is resolution-independent of the on-screen preview. Draw order is
/// fixed: model, then Bottom garment, then Top. Every image must already be
/// prepared in `images`; nothing here performs IO.
#[tracing::instrument(skip(job, images))]
pub fn compose(job: &CompositeJob, images: &PreparedImageStore) -> StudioResult<FrameRgba> {
    if job.layers.is_empty() {
        return Err(StudioError::input(
            "compositing requires at least one garment",
        ));
    }

    // Resolve everything before the first pixel is drawn; a missing image
    // must not leave a partial composite.
    let model = images.get(&job.model_image)?;
    let garments = job
        .layers
        .iter()
        .map(|draw| Ok((draw, images.get(&draw.image)?)))
        .collect::<StudioResult<Vec<_>>>()?;

    let canvas = Canvas::new(model.width, model.height)?;
    let center = canvas.center();
    let mut frame = FrameRgba::new(canvas);

    let model_rect = DstRect::centered_at(
        center.x,
        center.y,
        f64::from(model.width) * job.scale.scale_x,
        f64::from(model.height) * job.scale.scale_y,
    );
    draw_scaled(&mut frame.rgba8_premul, canvas, model, model_rect, 1.0);

    // Preview-space offsets map 1:1 onto the canvas unless the preview box
    // had different dimensions; then they rescale proportionally so the
    // raster matches what the user arranged.
    let ratio = job
        .viewport
        .map(|v| v.offset_ratio(canvas))
        .unwrap_or(Vec2::new(1.0, 1.0));

    for (draw, img) in garments {
        let t = draw.transform;
        let rect = DstRect::centered_at(
            center.x + t.offset.x * ratio.x,
            center.y + t.offset.y * ratio.y,
            f64::from(img.width) * t.scale,
            f64::from(img.height) * t.scale,
        );
        tracing::debug!(slot = ?draw.slot, scale = t.scale, opacity = t.opacity, "drawing garment layer");
        draw_scaled(&mut frame.rgba8_premul, canvas, img, rect, t.opacity);
    }

    Ok(frame)
}

/// Draw `src` into `dst` over the given rectangle with bilinear sampling and
/// the layer opacity, source-over in premultiplied space. Rows render in
/// parallel; output is deterministic because rows are independent.
fn draw_scaled(dst: &mut [u8], canvas: Canvas, src: &PreparedImage, rect: DstRect, opacity: f64) {
    if rect.width <= 0.0 || rect.height <= 0.0 || opacity <= 0.0 {
        return;
    }

    let y_start = rect.y0.floor().max(0.0) as usize;
    let y_end = ((rect.y0 + rect.height).ceil().min(f64::from(canvas.height))).max(0.0) as usize;
    let x_start = rect.x0.floor().max(0.0) as usize;
    let x_end = ((rect.x0 + rect.width).ceil().min(f64::from(canvas.width))).max(0.0) as usize;
    if y_start >= y_end || x_start >= x_end {
        return;
    }

    let row_bytes = canvas.width as usize * 4;
    dst.par_chunks_exact_mut(row_bytes)
        .enumerate()
        .skip(y_start)
        .take(y_end - y_start)
        .for_each(|(y, row)| {
            for x in x_start..x_end {
                // Map the destination pixel center into source pixel space.
                let u = ((x as f64 + 0.5) - rect.x0) / rect.width * f64::from(src.width) - 0.5;
                let v = ((y as f64 + 0.5) - rect.y0) / rect.height * f64::from(src.height) - 0.5;
                let sample = sample_bilinear(src, u, v);
                let px = &mut row[x * 4..x * 4 + 4];
                let out = over([px[0], px[1], px[2], px[3]], sample, opacity);
                px.copy_from_slice(&out);
            }
        });
}

/// Bilinear sample of a premultiplied RGBA8 image, clamped to the edges.
/// Interpolating premultiplied channels directly is correct; straight alpha
/// would bleed fringe colors.
fn sample_bilinear(src: &PreparedImage, u: f64, v: f64) -> [u8; 4] {
    let max_x = (src.width - 1) as f64;
    let max_y = (src.height - 1) as f64;
    let u = u.clamp(0.0, max_x);
    let v = v.clamp(0.0, max_y);

    let x0 = u.floor() as usize;
    let y0 = v.floor() as usize;
    let x1 = (x0 + 1).min(src.width as usize - 1);
    let y1 = (y0 + 1).min(src.height as usize - 1);
    let fx = u - u.floor();
    let fy = v - v.floor();

    let texel = |x: usize, y: usize| -> [u8; 4] {
        let i = (y * src.width as usize + x) * 4;
        let p = &src.rgba8_premul[i..i + 4];
        [p[0], p[1], p[2], p[3]]
    };

    let (p00, p10, p01, p11) = (texel(x0, y0), texel(x1, y0), texel(x0, y1), texel(x1, y1));
    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = lerp_u8(p00[c], p10[c], fx);
        let bottom = lerp_u8(p01[c], p11[c], fx);
        out[c] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Source-over for premultiplied RGBA8 with an extra layer opacity.
fn over(dst: [u8; 4], src: [u8; 4], opacity: f64) -> [u8; 4] {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
