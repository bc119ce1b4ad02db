//! Plane geometry for editable features.
//!
//! Rings are owned, indexable point sequences; composite geometries
//! address their rings through [`RingId`] slots rather than parent
//! back-references, so a handle can always re-derive its place after an
//! in-place edit.

mod bounds;
mod geometry;
mod point;
mod ring;

pub use bounds::Bounds;
pub use geometry::{Geometry, GeometryKind, Polygon, RingId};
pub use point::{PixelPoint, Point};
pub use ring::Ring;
