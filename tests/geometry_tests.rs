mod common;

use common::grid30;
use keyvolve::geometry::{GeometryIndex, KeyPositions};

#[test]
fn grid_columns_map_to_the_expected_fingers() {
    let geom = GeometryIndex::build(&grid30()).unwrap();
    let expected = [0u8, 0, 1, 2, 3, 6, 7, 8, 9, 9];
    for (i, key) in geom.keys.iter().enumerate() {
        assert_eq!(
            key.finger,
            expected[i % 10],
            "column {} got finger {}",
            i % 10,
            key.finger
        );
    }
}

#[test]
fn hands_split_at_the_center() {
    let geom = GeometryIndex::build(&grid30()).unwrap();
    for key in &geom.keys {
        let expected = if key.col <= 4 { 0 } else { 1 };
        assert_eq!(key.hand, expected, "column {} on wrong hand", key.col);
    }
}

#[test]
fn normalized_x_spans_the_full_range() {
    let geom = GeometryIndex::build(&grid30()).unwrap();
    let min = geom.keys.iter().map(|k| k.rel_x).fold(f32::INFINITY, f32::min);
    let max = geom.keys.iter().map(|k| k.rel_x).fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(min, -1.0);
    assert_eq!(max, 1.0);
}

#[test]
fn mismatched_arrays_are_rejected() {
    let pos = KeyPositions {
        x: vec![0.0, 1.0],
        y: vec![0.0],
        row: vec![1, 1],
        column: vec![0, 1],
    };
    assert!(GeometryIndex::build(&pos).is_err());
}

#[test]
fn empty_geometry_is_rejected() {
    let pos = KeyPositions {
        x: vec![],
        y: vec![],
        row: vec![],
        column: vec![],
    };
    assert!(GeometryIndex::build(&pos).is_err());
}

#[test]
fn degenerate_geometry_is_rejected() {
    // All keys share one x position: no finger zones exist.
    let pos = KeyPositions {
        x: vec![2.0, 2.0, 2.0],
        y: vec![0.0, 1.0, 2.0],
        row: vec![1, 2, 3],
        column: vec![0, 0, 0],
    };
    assert!(GeometryIndex::build(&pos).is_err());
}

#[test]
fn out_of_range_rows_are_rejected() {
    let pos = KeyPositions {
        x: vec![0.0, 1.0],
        y: vec![0.0, 0.0],
        row: vec![1, 7],
        column: vec![0, 1],
    };
    assert!(GeometryIndex::build(&pos).is_err());
}
