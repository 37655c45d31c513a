use kurbo::Vec2;

use crate::{
    assets::store::ImageRef,
    foundation::error::{StudioError, StudioResult},
    session::transforms::TransformStore,
};

/// Baseline height used when an uploaded model carries no authored dimensions.
pub const DEFAULT_BASELINE_HEIGHT_CM: f64 = 170.0;
/// Baseline weight used when an uploaded model carries no authored dimensions.
pub const DEFAULT_BASELINE_WEIGHT_KG: f64 = 70.0;
/// Studio background used until the user picks another color.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#f1f5f9";

/// Body model gender, used to filter the garment catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Female body model.
    Female,
    /// Male body model.
    Male,
}

/// Who a garment is cut for. `Unisex` garments fit either model gender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// Cut for female models only.
    Female,
    /// Cut for male models only.
    Male,
    /// Fits either model gender.
    Unisex,
}

impl Audience {
    /// Whether a garment with this audience fits a model of `gender`.
    pub fn fits(self, gender: Gender) -> bool {
        match self {
            Self::Unisex => true,
            Self::Female => gender == Gender::Female,
            Self::Male => gender == Gender::Male,
        }
    }
}

/// Where the model asset came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// One of the predefined catalog models.
    Default,
    /// A user-uploaded model image.
    Uploaded,
}

/// The (height, weight) a model asset was authored at. Scale factors are
/// computed relative to this.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    /// Authored height in centimeters.
    pub height_cm: f64,
    /// Authored weight in kilograms.
    pub weight_kg: f64,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            height_cm: DEFAULT_BASELINE_HEIGHT_CM,
            weight_kg: DEFAULT_BASELINE_WEIGHT_KG,
        }
    }
}

/// User-adjustable body dimensions driving the visual scale of the model.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelDimensions {
    /// Height in centimeters.
    pub height_cm: f64,
    /// Weight in kilograms.
    pub weight_kg: f64,
}

impl ModelDimensions {
    /// Dimensions matching a baseline exactly (identity scale).
    pub fn from_baseline(baseline: Baseline) -> Self {
        Self {
            height_cm: baseline.height_cm,
            weight_kg: baseline.weight_kg,
        }
    }
}

/// The selected body model. Immutable once selected; replaced wholesale on
/// re-selection.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelSelection {
    /// Whether this is a catalog model or an upload.
    pub kind: ModelKind,
    /// Model gender, used to filter the garment catalog.
    pub gender: Gender,
    /// Human-readable name shown in the UI.
    pub display_name: String,
    /// The model's image source.
    pub image: ImageRef,
    /// The (height, weight) the asset was authored at.
    pub baseline: Baseline,
}

impl ModelSelection {
    /// The predefined female model (authored at 165 cm / 60 kg).
    pub fn default_female() -> Self {
        Self {
            kind: ModelKind::Default,
            gender: Gender::Female,
            display_name: "Default Female".to_string(),
            image: ImageRef::Path("models/female.png".to_string()),
            baseline: Baseline {
                height_cm: 165.0,
                weight_kg: 60.0,
            },
        }
    }

    /// The predefined male model (authored at 175 cm / 75 kg).
    pub fn default_male() -> Self {
        Self {
            kind: ModelKind::Default,
            gender: Gender::Male,
            display_name: "Default Male".to_string(),
            image: ImageRef::Path("models/male.png".to_string()),
            baseline: Baseline {
                height_cm: 175.0,
                weight_kg: 75.0,
            },
        }
    }

    /// A user-uploaded model. Uploaded assets carry no authored dimensions,
    /// so the default baseline applies.
    pub fn uploaded(gender: Gender, image: ImageRef) -> Self {
        Self {
            kind: ModelKind::Uploaded,
            gender,
            display_name: "Uploaded Model".to_string(),
            image,
            baseline: Baseline::default(),
        }
    }
}

/// One of the two fixed garment layers.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LayerSlot {
    /// Lower layer, drawn first.
    Bottom,
    /// Upper layer, drawn above Bottom.
    Top,
}

impl LayerSlot {
    /// Both slots in draw order (Bottom first, Top above).
    pub const DRAW_ORDER: [Self; 2] = [Self::Bottom, Self::Top];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Bottom => 0,
            Self::Top => 1,
        }
    }
}

/// Garment classification driving slot placement. `Other` garments (dresses)
/// occupy the Top slot and are mutually exclusive with a Bottom garment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentKind {
    /// Upper-body garment (shirts, jackets).
    Top,
    /// Lower-body garment (trousers, skirts).
    Bottom,
    /// Full-body garment (dresses); occupies the Top slot.
    Other,
}

impl GarmentKind {
    /// The slot a garment of this kind occupies.
    pub fn slot(self) -> LayerSlot {
        match self {
            Self::Top | Self::Other => LayerSlot::Top,
            Self::Bottom => LayerSlot::Bottom,
        }
    }
}

/// A clothing item: predefined catalog entry or user upload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClothingItem {
    /// Stable item identifier.
    pub id: String,
    /// Human-readable name shown in the UI.
    pub display_name: String,
    /// The garment's image source.
    pub image: ImageRef,
    /// Free-form catalog category label.
    pub category: String,
    /// Who the garment is cut for.
    pub audience: Audience,
    /// Classification driving slot placement.
    pub kind: GarmentKind,
}

/// Per-slot display transform: uniform scale, pixel offset from the model
/// anchor, and alpha. Identity is `{1, (0,0), 1}`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformState {
    /// Uniform scale factor.
    pub scale: f64,
    /// Pixel offset from the model anchor.
    pub offset: Vec2,
    /// Alpha in `[0, 1]`.
    pub opacity: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformState {
    /// Untransformed state: scale 1, zero offset, fully opaque.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Vec2::ZERO,
        opacity: 1.0,
    };

    /// Whether this transform equals [`Self::IDENTITY`].
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }
}

/// The whole studio session: active model, body dimensions, the two garment
/// slots with their transforms, and the background color.
///
/// Owned by one UI context at a time; every mutation goes through the methods
/// here (or [`crate::session::commands::apply_command`]) so the slot
/// invariants hold.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StudioSession {
    model: ModelSelection,
    dimensions: ModelDimensions,
    assignments: [Option<ClothingItem>; 2],
    transforms: TransformStore,
    active_slot: Option<LayerSlot>,
    background_color: String,
}

impl StudioSession {
    /// Open a session on `model` with dimensions at the model's baseline.
    pub fn new(model: ModelSelection) -> Self {
        let dimensions = ModelDimensions::from_baseline(model.baseline);
        Self {
            model,
            dimensions,
            assignments: [None, None],
            transforms: TransformStore::default(),
            active_slot: None,
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }

    /// The currently selected body model.
    pub fn model(&self) -> &ModelSelection {
        &self.model
    }

    /// The current user-adjusted body dimensions.
    pub fn dimensions(&self) -> ModelDimensions {
        self.dimensions
    }

    /// The current studio background color (CSS hex string).
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// The slot adjustment controls currently target, if any.
    pub fn active_slot(&self) -> Option<LayerSlot> {
        self.active_slot
    }

    /// The garment assigned to `slot`, if any.
    pub fn assignment(&self, slot: LayerSlot) -> Option<&ClothingItem> {
        self.assignments[slot.index()].as_ref()
    }

    /// The per-slot display transforms.
    pub fn transforms(&self) -> &TransformStore {
        &self.transforms
    }

    /// Mutable access to the per-slot display transforms.
    pub fn transforms_mut(&mut self) -> &mut TransformStore {
        &mut self.transforms
    }

    /// Whether at least one garment slot is occupied.
    pub fn has_any_garment(&self) -> bool {
        self.assignments.iter().any(Option::is_some)
    }

    /// Replace the model wholesale. Dimensions reset to the new model's
    /// baseline; garment assignments and transforms are preserved (garments
    /// are independent of model identity).
    pub fn select_model(&mut self, model: ModelSelection) {
        self.dimensions = ModelDimensions::from_baseline(model.baseline);
        self.model = model;
    }

    /// Overwrite the body dimensions.
    pub fn set_dimensions(&mut self, dimensions: ModelDimensions) {
        self.dimensions = dimensions;
    }

    /// Overwrite the studio background color.
    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = color.into();
    }

    /// Assign a garment to the slot its kind dictates. The slot's transform
    /// is reset to identity before the new garment is exposed; an `Other`
    /// garment evicts any Bottom assignment.
    ///
    /// Returns the occupied slot and whether the Bottom slot was evicted.
    pub fn assign_garment(&mut self, item: ClothingItem) -> (LayerSlot, bool) {
        let slot = item.kind.slot();
        let mut evicted_bottom = false;

        if item.kind == GarmentKind::Other && self.assignments[LayerSlot::Bottom.index()].is_some()
        {
            self.assignments[LayerSlot::Bottom.index()] = None;
            self.transforms.reset(LayerSlot::Bottom);
            evicted_bottom = true;
        }

        self.transforms.reset(slot);
        self.assignments[slot.index()] = Some(item);
        self.active_slot = Some(slot);
        (slot, evicted_bottom)
    }

    /// Clear both garment slots and reset their transforms.
    pub fn clear_outfit(&mut self) {
        for slot in LayerSlot::DRAW_ORDER {
            self.assignments[slot.index()] = None;
            self.transforms.reset(slot);
        }
        self.active_slot = None;
    }

    /// Point adjustment controls at `slot`. Fails when the slot is empty.
    pub fn set_active_slot(&mut self, slot: LayerSlot) -> StudioResult<()> {
        if self.assignment(slot).is_none() {
            return Err(StudioError::input(format!("{slot:?} slot has no garment")));
        }
        self.active_slot = Some(slot);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/model.rs"]
mod tests;
