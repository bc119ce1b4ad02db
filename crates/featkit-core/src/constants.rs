//! Shared constants used across the FeatKit crates.

/// Tolerance for plane-coordinate equality comparisons.
///
/// Used by the constraint step when deciding which neighbor shares which
/// axis with a dragged vertex, and when recovering stale ring slots from
/// a retained neighbor point.
pub const COORD_TOLERANCE: f64 = 1e-7;

/// Opacity of edge-midpoint handles relative to corner handles.
pub const EDGE_HANDLE_OPACITY: f64 = 0.3;

/// Default handle pick radius, in pixels.
pub const DEFAULT_PICK_TOLERANCE: f64 = 5.0;
