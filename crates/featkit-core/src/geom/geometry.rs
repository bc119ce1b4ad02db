use serde::{Deserialize, Serialize};

use super::{Bounds, Point, Ring};

/// Slot address of a ring inside a [`Geometry`].
///
/// `RingId(0)` names the sole ring of a ring geometry or the exterior of a
/// polygon; higher slots name interior rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RingId(pub usize);

/// Geometry kind, used by the editable-type allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// A single point.
    Point,
    /// A loose collection of points.
    MultiPoint,
    /// A closed ring.
    Ring,
    /// An exterior ring with optional holes.
    Polygon,
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryKind::Point => write!(f, "Point"),
            GeometryKind::MultiPoint => write!(f, "MultiPoint"),
            GeometryKind::Ring => write!(f, "Ring"),
            GeometryKind::Polygon => write!(f, "Polygon"),
        }
    }
}

/// A polygon: an exterior ring plus any number of interior rings (holes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub rings: Vec<Ring>,
}

impl Polygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    /// The exterior ring, when present.
    pub fn exterior(&self) -> Option<&Ring> {
        self.rings.first()
    }
}

/// A feature geometry: a point, a loose point collection, a closed ring,
/// or a polygon with holes.
///
/// Mutated in place by the editing machinery; handles address into it via
/// [`RingId`] + vertex index slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    MultiPoint(Vec<Point>),
    Ring(Ring),
    Polygon(Polygon),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::Ring(_) => GeometryKind::Ring,
            Geometry::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// Shifts the whole geometry in place.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Geometry::Point(p) => p.translate(dx, dy),
            Geometry::MultiPoint(points) => {
                for p in points {
                    p.translate(dx, dy);
                }
            }
            Geometry::Ring(ring) => ring.translate(dx, dy),
            Geometry::Polygon(polygon) => {
                for ring in &mut polygon.rings {
                    ring.translate(dx, dy);
                }
            }
        }
    }

    /// Bounding box of the geometry.
    pub fn bounds(&self) -> Bounds {
        match self {
            Geometry::Point(p) => Bounds::from_point(p),
            Geometry::MultiPoint(points) => {
                let mut bounds: Option<Bounds> = None;
                for p in points {
                    let pb = Bounds::from_point(p);
                    bounds = Some(match bounds {
                        Some(b) => b.union(&pb),
                        None => pb,
                    });
                }
                bounds.unwrap_or(Bounds::new(0.0, 0.0, 0.0, 0.0))
            }
            Geometry::Ring(ring) => ring.bounds(),
            Geometry::Polygon(polygon) => {
                let mut bounds: Option<Bounds> = None;
                for ring in &polygon.rings {
                    let rb = ring.bounds();
                    bounds = Some(match bounds {
                        Some(b) => b.union(&rb),
                        None => rb,
                    });
                }
                bounds.unwrap_or(Bounds::new(0.0, 0.0, 0.0, 0.0))
            }
        }
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        let (cx, cy) = self.bounds().center();
        Point::new(cx, cy)
    }

    /// Rings carried by this geometry, with their slot ids.
    pub fn rings(&self) -> impl Iterator<Item = (RingId, &Ring)> {
        let slice: &[Ring] = match self {
            Geometry::Ring(ring) => std::slice::from_ref(ring),
            Geometry::Polygon(polygon) => &polygon.rings,
            _ => &[],
        };
        slice.iter().enumerate().map(|(i, r)| (RingId(i), r))
    }

    /// Number of rings carried by this geometry.
    pub fn ring_count(&self) -> usize {
        match self {
            Geometry::Ring(_) => 1,
            Geometry::Polygon(polygon) => polygon.rings.len(),
            _ => 0,
        }
    }

    /// The ring in slot `id`.
    pub fn ring(&self, id: RingId) -> Option<&Ring> {
        match self {
            Geometry::Ring(ring) if id.0 == 0 => Some(ring),
            Geometry::Polygon(polygon) => polygon.rings.get(id.0),
            _ => None,
        }
    }

    /// Mutable access to the ring in slot `id`.
    pub fn ring_mut(&mut self, id: RingId) -> Option<&mut Ring> {
        match self {
            Geometry::Ring(ring) if id.0 == 0 => Some(ring),
            Geometry::Polygon(polygon) => polygon.rings.get_mut(id.0),
            _ => None,
        }
    }

    /// Hit test with a pick tolerance.
    pub fn contains(&self, p: &Point, tolerance: f64) -> bool {
        match self {
            Geometry::Point(pt) => pt.distance_to(p) <= tolerance,
            Geometry::MultiPoint(points) => points.iter().any(|pt| pt.distance_to(p) <= tolerance),
            Geometry::Ring(ring) => ring.contains(p, tolerance),
            Geometry::Polygon(polygon) => polygon
                .exterior()
                .is_some_and(|ring| ring.contains(p, tolerance)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_geometry() -> Geometry {
        Geometry::Ring(Ring::rect(0.0, 0.0, 4.0, 2.0))
    }

    #[test]
    fn test_kind() {
        assert_eq!(rect_geometry().kind(), GeometryKind::Ring);
        assert_eq!(
            Geometry::Point(Point::new(1.0, 1.0)).kind(),
            GeometryKind::Point
        );
    }

    #[test]
    fn test_translate() {
        let mut g = rect_geometry();
        g.translate(1.0, -1.0);
        assert_eq!(g.bounds(), Bounds::new(1.0, -1.0, 5.0, 1.0));
    }

    #[test]
    fn test_center() {
        assert_eq!(rect_geometry().center(), Point::new(2.0, 1.0));
    }

    #[test]
    fn test_ring_slots() {
        let polygon = Geometry::Polygon(Polygon::new(vec![
            Ring::rect(0.0, 0.0, 10.0, 10.0),
            Ring::rect(2.0, 2.0, 2.0, 2.0),
        ]));
        assert_eq!(polygon.ring_count(), 2);
        assert!(polygon.ring(RingId(1)).is_some());
        assert!(polygon.ring(RingId(2)).is_none());

        let ring = rect_geometry();
        assert!(ring.ring(RingId(0)).is_some());
        assert!(ring.ring(RingId(1)).is_none());
    }

    #[test]
    fn test_rings_enumeration() {
        let g = rect_geometry();
        let ids: Vec<RingId> = g.rings().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![RingId(0)]);
        assert_eq!(Geometry::Point(Point::new(0.0, 0.0)).rings().count(), 0);
    }

    #[test]
    fn test_contains() {
        let g = rect_geometry();
        assert!(g.contains(&Point::new(1.0, 1.0), 0.0));
        assert!(!g.contains(&Point::new(8.0, 8.0), 0.5));
        let mp = Geometry::MultiPoint(vec![Point::new(0.0, 0.0), Point::new(3.0, 3.0)]);
        assert!(mp.contains(&Point::new(3.1, 3.0), 0.2));
        assert!(!mp.contains(&Point::new(1.5, 1.5), 0.2));
    }
}
