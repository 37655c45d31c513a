//! FitStudio is a virtual try-on compositing and session engine.
//!
//! It layers garment images over a body model, tracks per-layer display
//! transforms, and flattens the arrangement into a raster (`FrameRgba`) saved
//! to a per-user gallery.
//!
//! # Pipeline overview
//!
//! 1. **Session**: `StudioSession` holds the model selection, body
//!    dimensions, the two garment slots, and their transforms
//! 2. **Preview**: `preview::project` turns the session into placement
//!    matrices for a live UI surface
//! 3. **Composite**: `CompositeJob::snapshot + compose -> FrameRgba`
//!    (deterministic CPU raster at the model image's native size)
//! 4. **Gallery** (optional): `save_outfit` encodes the frame as PNG and
//!    appends an immutable `OutfitRecord` to the user's gallery
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: compositing is pure and stable for a
//!   given snapshot.
//! - **No IO in the compositor**: external IO is front-loaded in
//!   [`PreparedImageStore`].
//! - **Premultiplied RGBA8** end-to-end: the compositor blends premultiplied
//!   pixels and unpremultiplies only at PNG encode time.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod advisory;
mod assets;
mod foundation;
mod gallery;
mod preview;
mod render;
mod session;

pub use advisory::{SizeAdvice, recommend_size};
pub use assets::decode::decode_image;
pub use assets::store::{ImageRef, PreparedImage, PreparedImageStore, normalize_rel_path};
pub use foundation::core::{
    Affine, Canvas, Point, Rgba8Premul, ScaleFactors, Vec2, Viewport,
};
pub use foundation::error::{StudioError, StudioResult};
pub use gallery::records::{
    CategoryMap, GalleryItem, OutfitRecord, base_categories, classify_category, is_outerwear,
};
pub use gallery::store::{
    JsonFileStore, KeyValueStore, LastStudioState, MemoryStore, StudioStore, UploadedModel,
};
pub use preview::drag::DragGesture;
pub use preview::scene::{GarmentLayer, ModelLayer, PreviewScene, project, project_model, project_slot};
pub use render::compositor::{CompositeJob, FrameRgba, GarmentDraw, compose};
pub use render::pipeline::{SaveOptions, composite_session, save_outfit};
pub use session::commands::{StudioCommand, StudioEffect, apply_command};
pub use session::model::{
    Audience, Baseline, ClothingItem, DEFAULT_BACKGROUND_COLOR, DEFAULT_BASELINE_HEIGHT_CM,
    DEFAULT_BASELINE_WEIGHT_KG, GarmentKind, Gender, LayerSlot, ModelDimensions, ModelKind,
    ModelSelection, StudioSession, TransformState,
};
pub use session::scaling::{SCALE_FACTOR_MAX, SCALE_FACTOR_MIN, compute_scale_factors};
pub use session::transforms::{SCALE_MAX, SCALE_MIN, TransformPatch, TransformStore};
