//! The constraint step applied on every drag move.
//!
//! A corner move propagates exactly one coordinate to each of its two
//! ring neighbors; an edge move shifts both endpoints of its segment
//! perpendicular to it. Either way, consecutive vertices keep sharing
//! one axis, so a rectangle stays a rectangle through any drag.

use featkit_core::error::{GeometryError, Result};
use featkit_core::{Point, Ring};

/// Outcome of a constraint step: the ring slots that moved besides the
/// dragged vertex itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Propagated {
    pub prev: usize,
    pub next: usize,
}

/// Moves corner `index` of `ring` to `target`, propagating one coordinate
/// to each neighbor.
///
/// Orientation comes from the pre-move coordinates: when the old position
/// shares x with the previous vertex and y with the next one (within
/// `tol`), the previous vertex takes the new x and the next one the new
/// y; otherwise the attribution is swapped.
pub fn move_corner(ring: &mut Ring, index: usize, target: Point, tol: f64) -> Result<Propagated> {
    let count = ring.vertex_count();
    let Some(old) = ring.vertex(index) else {
        return Err(GeometryError::VertexOutOfRange { index, count }.into());
    };
    let prev = (index + count - 1) % count;
    let next = (index + 1) % count;
    let Some(pv) = ring.vertex(prev) else {
        return Err(GeometryError::VertexOutOfRange { index: prev, count }.into());
    };
    let Some(nv) = ring.vertex(next) else {
        return Err(GeometryError::VertexOutOfRange { index: next, count }.into());
    };

    ring.set_vertex(index, target)?;
    if (old.x - pv.x).abs() <= tol && (old.y - nv.y).abs() <= tol {
        ring.set_vertex(prev, Point::new(target.x, pv.y))?;
        ring.set_vertex(next, Point::new(nv.x, target.y))?;
    } else {
        ring.set_vertex(next, Point::new(target.x, nv.y))?;
        ring.set_vertex(prev, Point::new(pv.x, target.y))?;
    }
    Ok(Propagated { prev, next })
}

/// Moves the segment in front of ring slot `insertion` so it passes
/// through `target` (edge-midpoint drag).
///
/// The flanking vertices are `insertion - 1` and `insertion` (wrapped).
/// When they share their x coordinate the edge is vertical and both take
/// the target's x; otherwise both take the target's y.
pub fn move_edge(ring: &mut Ring, insertion: usize, target: Point, tol: f64) -> Result<Propagated> {
    let count = ring.vertex_count();
    if insertion == 0 || insertion > count {
        return Err(GeometryError::VertexOutOfRange {
            index: insertion,
            count,
        }
        .into());
    }
    let prev = insertion - 1;
    let next = insertion % count;
    let Some(pv) = ring.vertex(prev) else {
        return Err(GeometryError::VertexOutOfRange { index: prev, count }.into());
    };
    let Some(nv) = ring.vertex(next) else {
        return Err(GeometryError::VertexOutOfRange { index: next, count }.into());
    };

    if (pv.x - nv.x).abs() <= tol {
        ring.set_vertex(prev, Point::new(target.x, pv.y))?;
        ring.set_vertex(next, Point::new(target.x, nv.y))?;
    } else {
        ring.set_vertex(prev, Point::new(pv.x, target.y))?;
        ring.set_vertex(next, Point::new(nv.x, target.y))?;
    }
    Ok(Propagated { prev, next })
}
