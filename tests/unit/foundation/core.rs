use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(1, 1).is_ok());
}

#[test]
fn canvas_center_is_half_extent() {
    let canvas = Canvas::new(100, 50).unwrap();
    assert_eq!(canvas.center(), Point::new(50.0, 25.0));
}

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(0.0, 10.0).is_err());
    assert!(Viewport::new(10.0, -1.0).is_err());
    assert!(Viewport::new(f64::NAN, 10.0).is_err());
    assert!(Viewport::new(320.0, 480.0).is_ok());
}

#[test]
fn offset_ratio_is_identity_for_matching_sizes() {
    let canvas = Canvas::new(400, 600).unwrap();
    let viewport = Viewport::new(400.0, 600.0).unwrap();
    assert_eq!(viewport.offset_ratio(canvas), Vec2::new(1.0, 1.0));
}

#[test]
fn offset_ratio_scales_per_axis() {
    let canvas = Canvas::new(800, 600).unwrap();
    let viewport = Viewport::new(400.0, 200.0).unwrap();
    assert_eq!(viewport.offset_ratio(canvas), Vec2::new(2.0, 3.0));
}

#[test]
fn from_straight_rgba_premultiplies() {
    let px = Rgba8Premul::from_straight_rgba(100, 50, 200, 128);
    assert_eq!(px.r, ((100u16 * 128 + 127) / 255) as u8);
    assert_eq!(px.g, ((50u16 * 128 + 127) / 255) as u8);
    assert_eq!(px.b, ((200u16 * 128 + 127) / 255) as u8);
    assert_eq!(px.a, 128);

    assert_eq!(
        Rgba8Premul::from_straight_rgba(255, 255, 255, 0),
        Rgba8Premul::transparent()
    );
}

#[test]
fn scale_factors_mean_averages_both_axes() {
    assert_eq!(ScaleFactors::IDENTITY.mean(), 1.0);
    let f = ScaleFactors {
        scale_x: 0.8,
        scale_y: 1.2,
    };
    assert!((f.mean() - 1.0).abs() < 1e-12);
}
