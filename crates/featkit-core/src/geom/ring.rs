//! Closed rings of plane vertices.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

use super::{Bounds, Point};

/// A closed ring of vertices.
///
/// The closing vertex is stored explicitly: the first and last stored
/// points always coincide. Editing addresses vertices by index in
/// `0..vertex_count()`, and writes to vertex 0 keep the closing duplicate
/// in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    /// Builds a ring from a vertex sequence, closing it when the input is
    /// open. Fails for fewer than three distinct vertices.
    ///
    /// The closing duplicate is detected by exact equality; nearly
    /// coincident endpoints stay distinct vertices.
    pub fn new(mut points: Vec<Point>) -> Result<Self> {
        if points.len() > 1 {
            let first = points[0];
            if points.last() == Some(&first) {
                points.pop();
            }
        }
        if points.len() < 3 {
            return Err(GeometryError::DegenerateRing {
                count: points.len(),
            }
            .into());
        }
        let first = points[0];
        points.push(first);
        Ok(Self { points })
    }

    /// Axis-aligned rectangle ring with vertices ordered counter-clockwise
    /// from `(x, y)`.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            points: vec![
                Point::new(x, y),
                Point::new(x + width, y),
                Point::new(x + width, y + height),
                Point::new(x, y + height),
                Point::new(x, y),
            ],
        }
    }

    /// Number of distinct vertices (the closing duplicate not counted).
    pub fn vertex_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Vertex at `index`, in `0..vertex_count()`.
    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.points[..self.points.len() - 1].get(index).copied()
    }

    /// All distinct vertices in ring order.
    pub fn vertices(&self) -> &[Point] {
        &self.points[..self.points.len() - 1]
    }

    /// The stored point sequence including the closing duplicate.
    pub fn closed_points(&self) -> &[Point] {
        &self.points
    }

    /// Writes vertex `index`, keeping the closing duplicate in sync.
    pub fn set_vertex(&mut self, index: usize, point: Point) -> Result<()> {
        let count = self.vertex_count();
        if index >= count {
            return Err(GeometryError::VertexOutOfRange { index, count }.into());
        }
        self.points[index] = point;
        if index == 0 {
            let last = self.points.len() - 1;
            self.points[last] = point;
        }
        Ok(())
    }

    /// Removes vertex `index`. Fails when the ring would drop under three
    /// distinct vertices.
    pub fn remove_vertex(&mut self, index: usize) -> Result<()> {
        let count = self.vertex_count();
        if index >= count {
            return Err(GeometryError::VertexOutOfRange { index, count }.into());
        }
        if count <= 3 {
            return Err(GeometryError::DegenerateRing { count: count - 1 }.into());
        }
        self.points.remove(index);
        if index == 0 {
            // the closing duplicate still names the removed vertex
            let last = self.points.len() - 1;
            self.points[last] = self.points[0];
        }
        Ok(())
    }

    /// Index of the vertex coinciding with `point` within `tol`.
    pub fn find_vertex(&self, point: &Point, tol: f64) -> Option<usize> {
        self.vertices().iter().position(|v| v.coincides(point, tol))
    }

    /// Shifts every vertex in place.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            p.translate(dx, dy);
        }
    }

    /// Bounding box of the ring.
    pub fn bounds(&self) -> Bounds {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in self.vertices() {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Bounds::new(min_x, min_y, max_x, max_y)
    }

    /// Average of the distinct vertices.
    pub fn centroid(&self) -> Point {
        let n = self.vertex_count() as f64;
        let (sx, sy) = self
            .vertices()
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n)
    }

    /// True when every edge is parallel to an axis.
    pub fn is_rectilinear(&self, tol: f64) -> bool {
        self.points
            .windows(2)
            .all(|w| (w[0].x - w[1].x).abs() <= tol || (w[0].y - w[1].y).abs() <= tol)
    }

    /// Even-odd containment test with an edge-distance tolerance, so
    /// presses on the outline itself also count as hits.
    pub fn contains(&self, p: &Point, tolerance: f64) -> bool {
        let n = self.vertex_count();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = self.points[i];
            let pj = self.points[j];
            if ((pi.y > p.y) != (pj.y > p.y))
                && (p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        if inside {
            return true;
        }
        tolerance > 0.0
            && self
                .points
                .windows(2)
                .any(|w| distance_to_segment(p, &w[0], &w[1]) <= tolerance)
    }
}

/// Distance from `p` to the segment `a..b`.
fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let len2 = vx * vx + vy * vy;
    if len2 == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * vx + (p.y - a.y) * vy) / len2).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * vx, a.y + t * vy);
    p.distance_to(&proj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_ring_is_closed() {
        let ring = Ring::rect(0.0, 0.0, 4.0, 2.0);
        assert_eq!(ring.vertex_count(), 4);
        let pts = ring.closed_points();
        assert_eq!(pts.first(), pts.last());
    }

    #[test]
    fn test_new_closes_open_input() {
        let ring = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(0.0, 2.0),
        ])
        .unwrap();
        assert_eq!(ring.vertex_count(), 4);
        assert_eq!(ring.closed_points().len(), 5);
    }

    #[test]
    fn test_new_rejects_degenerate_input() {
        let err = Ring::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).unwrap_err();
        assert!(err.is_geometry_error());
    }

    #[test]
    fn test_set_vertex_zero_syncs_closing_duplicate() {
        let mut ring = Ring::rect(0.0, 0.0, 4.0, 2.0);
        ring.set_vertex(0, Point::new(-1.0, -1.0)).unwrap();
        let pts = ring.closed_points();
        assert_eq!(pts[0], Point::new(-1.0, -1.0));
        assert_eq!(pts[pts.len() - 1], Point::new(-1.0, -1.0));
    }

    #[test]
    fn test_remove_vertex_keeps_closure() {
        let mut ring = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ])
        .unwrap();
        ring.remove_vertex(0).unwrap();
        assert_eq!(ring.vertex_count(), 4);
        let pts = ring.closed_points();
        assert_eq!(pts.first(), pts.last());
    }

    #[test]
    fn test_remove_vertex_refuses_below_three() {
        let mut ring = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
        ])
        .unwrap();
        assert!(ring.remove_vertex(1).is_err());
    }

    #[test]
    fn test_find_vertex() {
        let ring = Ring::rect(0.0, 0.0, 4.0, 2.0);
        assert_eq!(ring.find_vertex(&Point::new(4.0, 2.0), 1e-7), Some(2));
        assert_eq!(ring.find_vertex(&Point::new(9.0, 9.0), 1e-7), None);
    }

    #[test]
    fn test_contains() {
        let ring = Ring::rect(0.0, 0.0, 4.0, 2.0);
        assert!(ring.contains(&Point::new(2.0, 1.0), 0.0));
        assert!(!ring.contains(&Point::new(5.0, 1.0), 0.0));
        // on the outline, within tolerance only
        assert!(ring.contains(&Point::new(4.2, 1.0), 0.5));
        assert!(!ring.contains(&Point::new(4.2, 1.0), 0.1));
    }

    #[test]
    fn test_rectilinear() {
        assert!(Ring::rect(0.0, 0.0, 4.0, 2.0).is_rectilinear(1e-7));
        let skewed = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 1.0),
            Point::new(4.0, 2.0),
            Point::new(0.0, 2.0),
        ])
        .unwrap();
        assert!(!skewed.is_rectilinear(1e-7));
    }

    #[test]
    fn test_bounds_and_centroid() {
        let ring = Ring::rect(1.0, 2.0, 4.0, 2.0);
        assert_eq!(ring.bounds(), Bounds::new(1.0, 2.0, 5.0, 4.0));
        assert_eq!(ring.centroid(), Point::new(3.0, 3.0));
    }
}
