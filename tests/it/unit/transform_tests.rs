//! Coordinate Transform Tests

use crate::helpers::{assert_close, pos};
use gridsketch::{CanvasContext, CoordinateTransform, DrawingConfig, EngineError};

#[test]
fn test_default_scale_is_ten_centimeters_per_cell() {
    let t = CoordinateTransform::default();
    assert_eq!(t.cell_size(), 10.0);
    assert_eq!(t.bounds(), (5.0, 100.0));
    assert_close(t.unit_meters(), 0.1);
}

#[test]
fn test_screen_to_grid_at_larger_cells() {
    let mut t = CoordinateTransform::default();
    t.set_cell_size(25.0).unwrap();
    let g = t.screen_to_grid(pos(37.0, 38.0));
    assert_eq!(g.snapped, pos(25.0, 50.0));
    assert_close(g.real.x, 0.1);
    assert_close(g.real.y, 0.2);
}

#[test]
fn test_pixel_metric_round_trip() {
    let mut t = CoordinateTransform::default();
    t.set_cell_size(17.5).unwrap();
    let px = pos(35.0, 70.0);
    let real = t.pixel_to_metric(px);
    assert_close(real.x, 0.2);
    assert_close(real.y, 0.4);
    let back = t.metric_to_pixel(real);
    assert_close(back.x, 35.0);
    assert_close(back.y, 70.0);
}

#[test]
fn test_clamp_cell_size() {
    let mut t = CoordinateTransform::default();
    assert!(t.clamp_cell_size(1000.0));
    assert_eq!(t.cell_size(), 100.0);
    assert!(t.clamp_cell_size(0.0));
    assert_eq!(t.cell_size(), 5.0);
    assert!(!t.clamp_cell_size(f64::NAN));
    assert_eq!(t.cell_size(), 5.0);
}

#[test]
fn test_set_cell_size_rejects_nan() {
    let mut t = CoordinateTransform::default();
    assert!(matches!(
        t.set_cell_size(f64::NAN),
        Err(EngineError::OutOfRange { .. })
    ));
    assert_eq!(t.cell_size(), 10.0);
}

#[test]
fn test_zoom_rounds_to_step_first() {
    let mut t = CoordinateTransform::default();
    t.set_cell_size(12.3).unwrap();
    assert!(t.zoom(1));
    assert_eq!(t.cell_size(), 15.0);
}

#[test]
fn test_custom_config_bounds() {
    let config = DrawingConfig {
        default_cell_size: 40.0,
        min_cell_size: 20.0,
        max_cell_size: 60.0,
        unit_meters: 1.0,
        ..Default::default()
    };
    let mut t = CoordinateTransform::new(&config);
    assert_eq!(t.cell_size(), 40.0);
    assert!(t.set_cell_size(10.0).is_err());
    let real = t.pixel_to_metric(pos(80.0, 0.0));
    assert_close(real.x, 2.0);
}

#[test]
fn test_canvas_context_identity_by_default() {
    let ctx = CanvasContext::default();
    assert_eq!(ctx.to_canvas(pos(12.0, 34.0)), pos(12.0, 34.0));
}

#[test]
fn test_canvas_context_then_snap() {
    let ctx = CanvasContext::new(pos(100.0, 50.0), (1.0, 1.0));
    let t = CoordinateTransform::default();
    let g = t.screen_to_grid(ctx.to_canvas(pos(134.0, 76.0)));
    assert_eq!(g.snapped, pos(30.0, 30.0));
}
