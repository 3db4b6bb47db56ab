//! Grid Rescale Integration Tests

use crate::helpers::{TestSessionBuilder, assert_close, click, pos, session_with_square};
use gridsketch::{ClickOutcome, EngineError};

#[test]
fn test_rescale_keeps_meters_and_moves_pixels() {
    let mut session = session_with_square();
    assert_eq!(session.rescale_grid(20.0), Ok(true));

    let corner = session.points().get(3).unwrap();
    assert_eq!(corner.pixel, pos(200.0, 200.0));
    assert_close(corner.real.x, 1.0);
    assert_close(corner.real.y, 1.0);
    assert_close(session.total_area(), 1.0);
}

#[test]
fn test_rescale_out_of_range_changes_nothing() {
    let mut session = session_with_square();
    let before: Vec<_> = session.points().iter().cloned().collect();

    let err = session.rescale_grid(150.0).unwrap_err();
    assert_eq!(
        err,
        EngineError::OutOfRange {
            value: 150.0,
            min: 5.0,
            max: 100.0
        }
    );
    assert!(session.rescale_grid(2.0).is_err());

    let after: Vec<_> = session.points().iter().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(session.transform().cell_size(), 10.0);
}

#[test]
fn test_same_cell_size_is_noop() {
    let mut session = session_with_square();
    assert_eq!(session.rescale_grid(10.0), Ok(false));
}

#[test]
fn test_hit_testing_follows_rescale() {
    let mut session = session_with_square();
    session.rescale_grid(50.0).unwrap();

    assert_eq!(session.point_at(pos(500.0, 0.0)), Some(2));
    assert_eq!(session.point_at(pos(100.0, 0.0)), None);
    assert_eq!(session.shape_at(pos(250.0, 250.0)), Some(0));
}

#[test]
fn test_drawing_continues_at_new_scale() {
    let mut session = TestSessionBuilder::new()
        .with_open_shape(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)])
        .build();
    session.rescale_grid(20.0).unwrap();

    // (0, 1m) is now at 200px; the first point moved to (0, 0) still
    click(&mut session, 0.0, 200.0);
    let outcome = click(&mut session, 4.0, 4.0);
    let ClickOutcome::Closed { area_m2, .. } = outcome else {
        panic!("expected close, got {outcome:?}");
    };
    assert_close(area_m2, 1.0);
}

#[test]
fn test_zoom_grid_reprojects() {
    let mut session = session_with_square();
    assert!(session.zoom_grid(2));
    assert_eq!(session.transform().cell_size(), 20.0);
    assert_eq!(session.points().get(2).unwrap().pixel, pos(200.0, 0.0));

    assert!(session.zoom_grid(-10));
    assert_eq!(session.transform().cell_size(), 5.0);
    assert!(!session.zoom_grid(-1));
}

#[test]
fn test_rescale_preserves_lengths_for_view() {
    let mut session = TestSessionBuilder::new()
        .with_cell_size(25.0)
        .with_closed_polygon(&[(0.0, 0.0), (75.0, 0.0), (75.0, 100.0)])
        .build();
    let lengths_before: Vec<f64> = session.view().shapes[0]
        .segments
        .iter()
        .map(|s| s.length_m)
        .collect();

    session.rescale_grid(40.0).unwrap();
    let lengths_after: Vec<f64> = session.view().shapes[0]
        .segments
        .iter()
        .map(|s| s.length_m)
        .collect();

    assert_eq!(lengths_before.len(), 3);
    for (b, a) in lengths_before.iter().zip(&lengths_after) {
        assert_close(*a, *b);
    }
    assert_close(lengths_before[2], 0.5);
}

#[test]
fn test_drag_select_on_rescaled_grid_line() {
    let mut session = TestSessionBuilder::new()
        .with_polyline(&[(430.0, 0.0), (430.0, 100.0)])
        .build();
    session.rescale_grid(30.0).unwrap();
    assert_eq!(session.points().get(1).unwrap().pixel, pos(1290.0, 0.0));

    session.begin_drag_select(pos(1290.0, -10.0));
    let added = session.end_drag_select(pos(1350.0, 10.0));
    assert_eq!(added, 1);
    assert!(session.is_selected(1));
}
