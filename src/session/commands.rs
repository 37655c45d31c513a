use crate::{
    foundation::error::{StudioError, StudioResult},
    session::model::{ClothingItem, LayerSlot, ModelDimensions, ModelSelection, StudioSession},
    session::transforms::TransformPatch,
};

/// A discrete user action against the studio session.
///
/// Commands are the only write path the UI layer uses; the transform store
/// and the compositor never see UI events directly.
#[derive(Clone, Debug, PartialEq)]
pub enum StudioCommand {
    /// Replace the active model. Dimensions reset to the new baseline;
    /// garment transforms are preserved.
    SelectModel(ModelSelection),
    /// Slider input for body dimensions.
    SetDimensions {
        /// New height in centimeters.
        height_cm: f64,
        /// New weight in kilograms.
        weight_kg: f64,
    },
    /// Place a garment on the slot its kind dictates.
    AssignGarment(ClothingItem),
    /// Slider input for the targeted slot (the active slot when `None`).
    EditTransform {
        /// Slot to edit; the active slot when `None`.
        slot: Option<LayerSlot>,
        /// Fields to merge into the slot's transform.
        patch: TransformPatch,
    },
    /// Reset one slot's transform to identity.
    ResetTransform(LayerSlot),
    /// Change the studio background color.
    SetBackground(String),
    /// Remove both garments and reset their transforms.
    ClearOutfit,
}

/// Side effects the caller must carry out after a command is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudioEffect {
    /// The model layer changed; re-project it in the preview.
    ReprojectModel,
    /// One garment slot changed; re-project exactly that slot.
    ReprojectSlot(LayerSlot),
    /// A slot was emptied; remove its layer from the preview.
    ClearSlot(LayerSlot),
    /// The persistable studio summary changed; write it through the store.
    PersistStudioState,
}

/// Apply one command to the session and report the effects to carry out.
///
/// A failed command leaves the session untouched.
#[tracing::instrument(skip(session, command), fields(command = command_name(&command)))]
pub fn apply_command(
    session: &mut StudioSession,
    command: StudioCommand,
) -> StudioResult<Vec<StudioEffect>> {
    match command {
        StudioCommand::SelectModel(model) => {
            session.select_model(model);
            Ok(vec![
                StudioEffect::ReprojectModel,
                StudioEffect::PersistStudioState,
            ])
        }
        StudioCommand::SetDimensions {
            height_cm,
            weight_kg,
        } => {
            if !(height_cm.is_finite() && weight_kg.is_finite()) {
                return Err(StudioError::input("dimensions must be finite"));
            }
            session.set_dimensions(ModelDimensions {
                height_cm,
                weight_kg,
            });
            Ok(vec![
                StudioEffect::ReprojectModel,
                StudioEffect::PersistStudioState,
            ])
        }
        StudioCommand::AssignGarment(item) => {
            let (slot, evicted_bottom) = session.assign_garment(item);
            let mut effects = Vec::with_capacity(2);
            if evicted_bottom {
                effects.push(StudioEffect::ClearSlot(LayerSlot::Bottom));
            }
            effects.push(StudioEffect::ReprojectSlot(slot));
            Ok(effects)
        }
        StudioCommand::EditTransform { slot, patch } => {
            let slot = match slot {
                Some(slot) => {
                    session.set_active_slot(slot)?;
                    slot
                }
                None => session
                    .active_slot()
                    .ok_or_else(|| StudioError::input("no garment selected to adjust"))?,
            };
            session.transforms_mut().update(slot, patch);
            Ok(vec![StudioEffect::ReprojectSlot(slot)])
        }
        StudioCommand::ResetTransform(slot) => {
            session.transforms_mut().reset(slot);
            Ok(vec![StudioEffect::ReprojectSlot(slot)])
        }
        StudioCommand::SetBackground(color) => {
            session.set_background_color(color);
            Ok(vec![StudioEffect::PersistStudioState])
        }
        StudioCommand::ClearOutfit => {
            session.clear_outfit();
            Ok(vec![
                StudioEffect::ClearSlot(LayerSlot::Bottom),
                StudioEffect::ClearSlot(LayerSlot::Top),
            ])
        }
    }
}

fn command_name(command: &StudioCommand) -> &'static str {
    match command {
        StudioCommand::SelectModel(_) => "select_model",
        StudioCommand::SetDimensions { .. } => "set_dimensions",
        StudioCommand::AssignGarment(_) => "assign_garment",
        StudioCommand::EditTransform { .. } => "edit_transform",
        StudioCommand::ResetTransform(_) => "reset_transform",
        StudioCommand::SetBackground(_) => "set_background",
        StudioCommand::ClearOutfit => "clear_outfit",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/commands.rs"]
mod tests;
