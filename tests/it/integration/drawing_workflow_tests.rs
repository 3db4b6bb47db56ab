//! Drawing Workflow Integration Tests

use crate::helpers::{
    SQUARE_1M, TestSessionBuilder, assert_close, assert_point_count, assert_shape_count, click,
    click_all, empty_session, pos, session_with_square,
};
use gridsketch::session::ConstructionState;
use gridsketch::{ClickOutcome, DrawingMode, ShapeKind};

#[test]
fn test_square_closes_with_one_square_meter() {
    let mut session = empty_session();
    click(&mut session, 0.0, 0.0);
    click(&mut session, 100.0, 0.0);
    click(&mut session, 100.0, 100.0);
    click(&mut session, 0.0, 100.0);

    // within 5cm of the first point: snaps to (0, 0)
    let outcome = click(&mut session, 3.0, 2.0);
    let ClickOutcome::Closed { shape, area_m2 } = outcome else {
        panic!("expected close, got {outcome:?}");
    };
    assert_eq!(shape, 0);
    assert_close(area_m2, 1.0);

    let square = &session.shapes()[0];
    assert!(square.is_closed());
    assert_eq!(square.len(), 4);
    let lengths: Vec<f64> = square
        .perimeter_segments(session.points())
        .map(|s| s.length_m)
        .collect();
    assert_eq!(lengths.len(), 4);
    for length in lengths {
        assert_close(length, 1.0);
    }
    assert_eq!(
        gridsketch::report::format_length(square.perimeter_m(session.points()) / 4.0),
        "1.00m"
    );
}

#[test]
fn test_three_point_triangle_closes() {
    let mut session = empty_session();
    click_all(&mut session, &[(0.0, 0.0), (100.0, 0.0), (0.0, 100.0)]);
    let outcome = click(&mut session, 0.0, 0.0);
    assert_close(outcome.closed_area().unwrap(), 0.5);
}

#[test]
fn test_single_point_close_is_noop() {
    let mut session = empty_session();
    click(&mut session, 50.0, 50.0);
    assert_eq!(session.close_active_shape(), ClickOutcome::Ignored);

    let shape = session.active_shape().unwrap();
    assert!(!shape.is_closed());
    assert_eq!(shape.len(), 1);
    assert_eq!(
        session.construction_state(),
        ConstructionState::Building { points: 1, anchor: 1 }
    );
}

#[test]
fn test_click_far_from_anchor_adds_point() {
    let mut session = empty_session();
    click_all(&mut session, &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]);
    // one cell away is 0.1m, outside the 5cm tolerance
    let outcome = click(&mut session, 10.0, 0.0);
    assert!(matches!(outcome, ClickOutcome::Placed { point: 4, shape: 0 }));
    assert!(!session.shapes()[0].is_closed());
}

#[test]
fn test_new_shape_after_close_receives_points() {
    let mut session = session_with_square();
    assert_eq!(session.active_shape_index(), Some(1));

    let outcome = click(&mut session, 300.0, 300.0);
    assert_eq!(outcome, ClickOutcome::Placed { point: 5, shape: 1 });
    assert_eq!(session.shapes()[1].points(), &[5]);
}

#[test]
fn test_auto_and_user_names() {
    let session = TestSessionBuilder::new()
        .with_closed_polygon(&SQUARE_1M)
        .with_named_polygon("Garage", &[(200.0, 0.0), (300.0, 0.0), (300.0, 100.0)])
        .build();
    assert_eq!(session.shapes()[0].name, "Figure 1");
    assert_eq!(session.shapes()[1].name, "Garage");
}

#[test]
fn test_total_area_sums_closed_shapes_only() {
    let session = TestSessionBuilder::new()
        .with_closed_polygon(&SQUARE_1M)
        .with_closed_polygon(&[(200.0, 0.0), (400.0, 0.0), (400.0, 100.0), (200.0, 100.0)])
        .with_open_shape(&[(500.0, 0.0), (600.0, 0.0), (600.0, 100.0)])
        .build();
    assert_close(session.total_area(), 3.0);
    assert_close(session.shape_area(2).unwrap(), 0.0);
    assert!(session.shape_area(9).is_err());
}

#[test]
fn test_abandoned_shape_keeps_points() {
    let mut session = empty_session();
    click_all(&mut session, &[(0.0, 0.0), (100.0, 0.0)]);
    let new_index = session.start_new_shape();
    assert_eq!(new_index, 1);
    // reusing the empty active shape does not spawn another
    assert_eq!(session.start_new_shape(), 1);

    assert_shape_count(&session, 2);
    assert_point_count(&session, 2);
    assert_eq!(session.shapes()[0].len(), 2);
    assert!(session.construction_state().is_idle());
}

#[test]
fn test_polyline_lengths() {
    let session = TestSessionBuilder::new()
        .with_polyline(&[(0.0, 0.0), (30.0, 40.0), (30.0, 140.0)])
        .build();
    let line = session.active_shape().unwrap();
    assert_eq!(line.kind, ShapeKind::Polyline);
    let lengths: Vec<f64> = line
        .perimeter_segments(session.points())
        .map(|s| s.length_m)
        .collect();
    assert_eq!(lengths.len(), 2);
    assert_close(lengths[0], 0.5);
    assert_close(lengths[1], 1.0);
    assert_close(session.total_area(), 0.0);
}

#[test]
fn test_fill_mode_closes_abandoned_polygon() {
    let mut session = TestSessionBuilder::new()
        .with_open_shape(&SQUARE_1M)
        .build();
    session.start_new_shape();
    session.set_mode(DrawingMode::Fill);

    let outcome = click(&mut session, 40.0, 60.0);
    assert!(matches!(outcome, ClickOutcome::Filled { shape: 0, .. }));
    assert_close(outcome.closed_area().unwrap(), 1.0);
    assert_eq!(session.shapes()[0].name, "Figure 1");
    // the active shape was not the filled one
    assert_eq!(session.active_shape_index(), Some(1));
}

#[test]
fn test_reset_restarts_everything() {
    let mut session = session_with_square();
    session.rescale_grid(20.0).unwrap();
    session.toggle_selection(1).unwrap();
    session.reset();

    assert_shape_count(&session, 1);
    assert_point_count(&session, 0);
    assert!(session.selection().is_empty());
    assert_eq!(session.active_shape_index(), Some(0));
    assert_eq!(session.transform().cell_size(), 20.0);

    let outcome = click(&mut session, 0.0, 0.0);
    assert_eq!(outcome, ClickOutcome::Placed { point: 1, shape: 0 });
}

#[test]
fn test_guide_tracks_cursor() {
    let mut session = empty_session();
    click(&mut session, 0.0, 0.0);
    session.pointer_moved(pos(63.0, 1.0));

    let guide = session.guide().unwrap();
    assert_eq!(guide.end, pos(60.0, 0.0));
    assert_close(guide.length_m, 0.6);
    assert!(guide.axis_aligned);
    assert_eq!(session.coordinates_readout().as_deref(), Some("0.60m, 0.00m"));

    session.pointer_left();
    assert!(session.guide().is_none());
}

#[test]
fn test_open_shape_total_label_is_zero() {
    let session = TestSessionBuilder::new()
        .with_open_shape(&[(0.0, 0.0)])
        .build();
    let total = session.total_area();
    assert!(total.is_sign_positive());
    assert_eq!(gridsketch::report::format_area(total), "0.00 m²");
    assert!(session.view().total_area_m2.is_sign_positive());
}
