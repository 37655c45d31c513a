use std::path::Path;

use crate::{
    assets::store::PreparedImageStore,
    foundation::core::Viewport,
    foundation::error::StudioResult,
    gallery::records::{GalleryItem, OutfitRecord},
    gallery::store::{KeyValueStore, StudioStore},
    render::compositor::{self, CompositeJob, FrameRgba},
    session::model::StudioSession,
};

/// Options for a save-outfit run.
#[derive(Clone, Debug, Default)]
pub struct SaveOptions {
    /// Record name; a timestamped name is minted when absent.
    pub display_name: Option<String>,
    /// The preview box the garment offsets were arranged in, when it differs
    /// from the output canvas.
    pub viewport: Option<Viewport>,
}

/// Snapshot the session and render it to a flattened frame.
///
/// State is captured before any IO; edits made while images load or pixels
/// blend cannot bleed into the result.
#[tracing::instrument(skip(session, asset_root))]
pub fn composite_session(
    session: &StudioSession,
    asset_root: impl AsRef<Path> + std::fmt::Debug,
    viewport: Option<Viewport>,
) -> StudioResult<FrameRgba> {
    let job = CompositeJob::snapshot(session, viewport)?;
    let images = PreparedImageStore::prepare(job.image_refs(), asset_root)?;
    compositor::compose(&job, &images)
}

/// Composite the session and append the result to the user's gallery.
///
/// Returns the stored record. A failure at any stage (snapshot, decode,
/// drawing, encode, persistence) leaves the gallery unchanged.
#[tracing::instrument(skip(session, store, asset_root))]
pub fn save_outfit<S: KeyValueStore>(
    session: &StudioSession,
    store: &mut StudioStore<S>,
    user_id: &str,
    asset_root: impl AsRef<Path> + std::fmt::Debug,
    options: SaveOptions,
) -> StudioResult<OutfitRecord> {
    let frame = composite_session(session, asset_root, options.viewport)?;
    let raster_png = frame.encode_png()?;

    let display_name = options.display_name.unwrap_or_else(|| {
        format!("Outfit {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"))
    });
    let record = OutfitRecord::new(display_name, raster_png);
    store.add_gallery_item(user_id, GalleryItem::Outfit(record.clone()))?;
    tracing::info!(id = %record.id, "outfit saved to gallery");
    Ok(record)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
