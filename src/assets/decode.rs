use std::sync::Arc;

use crate::{StudioError, StudioResult, assets::store::PreparedImage};

/// Decode encoded image bytes and convert to premultiplied RGBA8.
///
/// Any decode failure is a [`StudioError::Decode`]; callers rely on this to
/// abort a composite atomically before drawing anything.
pub fn decode_image(bytes: &[u8]) -> StudioResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| StudioError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
