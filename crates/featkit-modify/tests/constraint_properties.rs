//! Property tests for the constraint step.
//!
//! Whatever corner or edge gets dragged wherever, an axis-aligned
//! rectangle must come out the other side still an axis-aligned
//! rectangle.

use featkit_core::constants::COORD_TOLERANCE;
use featkit_core::{Point, Ring};
use featkit_modify::constraint::{move_corner, move_edge};
use proptest::prelude::*;

/// Consecutive vertices share exactly one axis, alternating around the
/// ring: the rectangle invariant for non-degenerate rectangles.
fn assert_rectangle(ring: &Ring) {
    assert!(ring.is_rectilinear(COORD_TOLERANCE));
    let pts = ring.closed_points();
    for w in pts.windows(2) {
        let same_x = (w[0].x - w[1].x).abs() <= COORD_TOLERANCE;
        let same_y = (w[0].y - w[1].y).abs() <= COORD_TOLERANCE;
        assert!(
            same_x != same_y,
            "vertices {:?} and {:?} must share exactly one axis",
            w[0],
            w[1]
        );
    }
    assert_eq!(pts.first(), pts.last(), "ring must stay closed");
}

proptest! {
    #[test]
    fn corner_drag_preserves_rectangle(
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
        w in 0.5f64..200.0,
        h in 0.5f64..200.0,
        corner in 0usize..4,
        tx in -500.0f64..500.0,
        ty in -500.0f64..500.0,
    ) {
        // skip targets that would collapse the rectangle to zero extent
        prop_assume!((tx - x).abs() > 1e-6 && (tx - (x + w)).abs() > 1e-6);
        prop_assume!((ty - y).abs() > 1e-6 && (ty - (y + h)).abs() > 1e-6);

        let mut ring = Ring::rect(x, y, w, h);
        move_corner(&mut ring, corner, Point::new(tx, ty), COORD_TOLERANCE).unwrap();
        assert_rectangle(&ring);
        // the dragged corner landed exactly on the target
        prop_assert_eq!(ring.vertex(corner), Some(Point::new(tx, ty)));
    }

    #[test]
    fn edge_drag_preserves_rectangle(
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
        w in 0.5f64..200.0,
        h in 0.5f64..200.0,
        insertion in 1usize..=4,
        tx in -500.0f64..500.0,
        ty in -500.0f64..500.0,
    ) {
        prop_assume!((tx - x).abs() > 1e-6 && (tx - (x + w)).abs() > 1e-6);
        prop_assume!((ty - y).abs() > 1e-6 && (ty - (y + h)).abs() > 1e-6);

        let mut ring = Ring::rect(x, y, w, h);
        let before: Vec<Point> = ring.vertices().to_vec();
        let moved = move_edge(&mut ring, insertion, Point::new(tx, ty), COORD_TOLERANCE).unwrap();
        assert_rectangle(&ring);
        // exactly the two flanking vertices changed
        for (i, v) in ring.vertices().iter().enumerate() {
            if i == moved.prev || i == moved.next {
                continue;
            }
            prop_assert_eq!(*v, before[i]);
        }
    }

    // Across a whole drag sequence the ring may pass through degenerate
    // shapes, so only rectilinearity and closure are claimed here.
    #[test]
    fn consecutive_corner_drags_stay_rectilinear(
        drags in prop::collection::vec((0usize..4, -300.0f64..300.0, -300.0f64..300.0), 1..8),
    ) {
        let mut ring = Ring::rect(0.0, 0.0, 40.0, 20.0);
        for (corner, tx, ty) in drags {
            move_corner(&mut ring, corner, Point::new(tx, ty), COORD_TOLERANCE).unwrap();
            prop_assert!(ring.is_rectilinear(COORD_TOLERANCE));
            let pts = ring.closed_points();
            prop_assert_eq!(pts.first(), pts.last());
        }
    }
}
