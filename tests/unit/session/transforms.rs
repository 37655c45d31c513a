use super::*;

#[test]
fn default_store_holds_identity_for_both_slots() {
    let store = TransformStore::default();
    assert!(store.get(LayerSlot::Top).is_identity());
    assert!(store.get(LayerSlot::Bottom).is_identity());
}

#[test]
fn scale_clamps_to_range() {
    let mut store = TransformStore::default();
    let state = store.update(LayerSlot::Top, TransformPatch::scale(10.0));
    assert_eq!(state.scale, SCALE_MAX);

    let state = store.update(LayerSlot::Top, TransformPatch::scale(0.01));
    assert_eq!(state.scale, SCALE_MIN);

    let state = store.update(LayerSlot::Top, TransformPatch::scale(1.4));
    assert_eq!(state.scale, 1.4);
}

#[test]
fn opacity_clamps_to_unit_interval() {
    let mut store = TransformStore::default();
    assert_eq!(
        store.update(LayerSlot::Bottom, TransformPatch::opacity(2.0)).opacity,
        1.0
    );
    assert_eq!(
        store.update(LayerSlot::Bottom, TransformPatch::opacity(-0.5)).opacity,
        0.0
    );
    assert_eq!(
        store.update(LayerSlot::Bottom, TransformPatch::opacity(0.8)).opacity,
        0.8
    );
}

#[test]
fn offsets_are_not_clamped() {
    let mut store = TransformStore::default();
    let state = store.update(
        LayerSlot::Top,
        TransformPatch::offset(Vec2::new(-5000.0, 9000.0)),
    );
    assert_eq!(state.offset, Vec2::new(-5000.0, 9000.0));
}

#[test]
fn non_finite_values_are_dropped() {
    let mut store = TransformStore::default();
    store.update(LayerSlot::Top, TransformPatch::scale(1.5));
    let state = store.update(LayerSlot::Top, TransformPatch::scale(f64::NAN));
    assert_eq!(state.scale, 1.5);

    let state = store.update(
        LayerSlot::Top,
        TransformPatch::offset(Vec2::new(f64::INFINITY, 3.0)),
    );
    assert_eq!(state.offset, Vec2::new(0.0, 3.0));
}

#[test]
fn patch_touches_only_set_fields() {
    let mut store = TransformStore::default();
    store.update(LayerSlot::Top, TransformPatch::scale(2.0));
    store.update(LayerSlot::Top, TransformPatch::offset(Vec2::new(7.0, -3.0)));
    let state = store.update(LayerSlot::Top, TransformPatch::opacity(0.5));

    assert_eq!(state.scale, 2.0);
    assert_eq!(state.offset, Vec2::new(7.0, -3.0));
    assert_eq!(state.opacity, 0.5);
}

#[test]
fn reset_restores_identity_independently() {
    let mut store = TransformStore::default();
    store.update(LayerSlot::Top, TransformPatch::scale(2.0));
    store.update(LayerSlot::Bottom, TransformPatch::scale(0.5));

    store.reset(LayerSlot::Top);
    assert!(store.get(LayerSlot::Top).is_identity());
    assert_eq!(store.get(LayerSlot::Bottom).scale, 0.5);
}
