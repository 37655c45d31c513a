use super::*;

use crate::{assets::store::ImageRef, session::model::{Audience, GarmentKind}};

fn session() -> StudioSession {
    StudioSession::new(ModelSelection::default_female())
}

fn item(id: &str, kind: GarmentKind) -> ClothingItem {
    ClothingItem {
        id: id.to_string(),
        display_name: id.to_string(),
        image: ImageRef::Path(format!("garments/{id}.png")),
        category: "Tops".to_string(),
        audience: Audience::Unisex,
        kind,
    }
}

#[test]
fn select_model_reprojects_and_persists() {
    let mut s = session();
    let effects = apply_command(
        &mut s,
        StudioCommand::SelectModel(ModelSelection::default_male()),
    )
    .unwrap();
    assert_eq!(
        effects,
        vec![StudioEffect::ReprojectModel, StudioEffect::PersistStudioState]
    );
    assert_eq!(s.dimensions().height_cm, 175.0);
}

#[test]
fn set_dimensions_rejects_non_finite_input() {
    let mut s = session();
    let err = apply_command(
        &mut s,
        StudioCommand::SetDimensions {
            height_cm: f64::NAN,
            weight_kg: 60.0,
        },
    )
    .unwrap_err();
    assert!(matches!(err, StudioError::Input(_)));
    assert_eq!(s.dimensions().height_cm, 165.0);
}

#[test]
fn set_dimensions_updates_and_reprojects() {
    let mut s = session();
    let effects = apply_command(
        &mut s,
        StudioCommand::SetDimensions {
            height_cm: 180.0,
            weight_kg: 64.0,
        },
    )
    .unwrap();
    assert_eq!(
        effects,
        vec![StudioEffect::ReprojectModel, StudioEffect::PersistStudioState]
    );
    assert_eq!(s.dimensions().weight_kg, 64.0);
}

#[test]
fn assign_garment_reprojects_its_slot() {
    let mut s = session();
    let effects =
        apply_command(&mut s, StudioCommand::AssignGarment(item("tee", GarmentKind::Top)))
            .unwrap();
    assert_eq!(effects, vec![StudioEffect::ReprojectSlot(LayerSlot::Top)]);
}

#[test]
fn dress_assignment_reports_the_eviction() {
    let mut s = session();
    apply_command(
        &mut s,
        StudioCommand::AssignGarment(item("jeans", GarmentKind::Bottom)),
    )
    .unwrap();
    let effects = apply_command(
        &mut s,
        StudioCommand::AssignGarment(item("dress", GarmentKind::Other)),
    )
    .unwrap();
    assert_eq!(
        effects,
        vec![
            StudioEffect::ClearSlot(LayerSlot::Bottom),
            StudioEffect::ReprojectSlot(LayerSlot::Top),
        ]
    );
}

#[test]
fn edit_transform_needs_a_target() {
    let mut s = session();
    let err = apply_command(
        &mut s,
        StudioCommand::EditTransform {
            slot: None,
            patch: TransformPatch::scale(1.2),
        },
    )
    .unwrap_err();
    assert!(matches!(err, StudioError::Input(_)));
}

#[test]
fn edit_transform_rejects_an_empty_explicit_slot() {
    let mut s = session();
    let err = apply_command(
        &mut s,
        StudioCommand::EditTransform {
            slot: Some(LayerSlot::Bottom),
            patch: TransformPatch::scale(1.2),
        },
    )
    .unwrap_err();
    assert!(matches!(err, StudioError::Input(_)));
}

#[test]
fn edit_transform_defaults_to_the_active_slot() {
    let mut s = session();
    apply_command(&mut s, StudioCommand::AssignGarment(item("tee", GarmentKind::Top))).unwrap();

    let effects = apply_command(
        &mut s,
        StudioCommand::EditTransform {
            slot: None,
            patch: TransformPatch::scale(1.2),
        },
    )
    .unwrap();
    assert_eq!(effects, vec![StudioEffect::ReprojectSlot(LayerSlot::Top)]);
    assert_eq!(s.transforms().get(LayerSlot::Top).scale, 1.2);
}

#[test]
fn explicit_slot_becomes_the_active_slot() {
    let mut s = session();
    apply_command(&mut s, StudioCommand::AssignGarment(item("tee", GarmentKind::Top))).unwrap();
    apply_command(
        &mut s,
        StudioCommand::AssignGarment(item("jeans", GarmentKind::Bottom)),
    )
    .unwrap();
    assert_eq!(s.active_slot(), Some(LayerSlot::Bottom));

    apply_command(
        &mut s,
        StudioCommand::EditTransform {
            slot: Some(LayerSlot::Top),
            patch: TransformPatch::opacity(0.5),
        },
    )
    .unwrap();
    assert_eq!(s.active_slot(), Some(LayerSlot::Top));
    assert_eq!(s.transforms().get(LayerSlot::Top).opacity, 0.5);
}

#[test]
fn reset_transform_restores_identity() {
    let mut s = session();
    apply_command(&mut s, StudioCommand::AssignGarment(item("tee", GarmentKind::Top))).unwrap();
    apply_command(
        &mut s,
        StudioCommand::EditTransform {
            slot: None,
            patch: TransformPatch::scale(2.5),
        },
    )
    .unwrap();

    let effects =
        apply_command(&mut s, StudioCommand::ResetTransform(LayerSlot::Top)).unwrap();
    assert_eq!(effects, vec![StudioEffect::ReprojectSlot(LayerSlot::Top)]);
    assert!(s.transforms().get(LayerSlot::Top).is_identity());
}

#[test]
fn set_background_persists_state() {
    let mut s = session();
    let effects =
        apply_command(&mut s, StudioCommand::SetBackground("#112233".to_string())).unwrap();
    assert_eq!(effects, vec![StudioEffect::PersistStudioState]);
    assert_eq!(s.background_color(), "#112233");
}

#[test]
fn clear_outfit_clears_both_slots() {
    let mut s = session();
    apply_command(&mut s, StudioCommand::AssignGarment(item("tee", GarmentKind::Top))).unwrap();

    let effects = apply_command(&mut s, StudioCommand::ClearOutfit).unwrap();
    assert_eq!(
        effects,
        vec![
            StudioEffect::ClearSlot(LayerSlot::Bottom),
            StudioEffect::ClearSlot(LayerSlot::Top),
        ]
    );
    assert!(!s.has_any_garment());
}
