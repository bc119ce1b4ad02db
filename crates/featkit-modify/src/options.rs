//! Modify-control configuration.

use serde::{Deserialize, Serialize};

use featkit_core::constants::DEFAULT_PICK_TOLERANCE;
use featkit_core::{Bounds, GeometryKind, RenderIntent};

/// Configuration for [`ModifyControl`](crate::ModifyControl).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyOptions {
    /// Materialize edge handles segment-locally through the spatial index
    /// instead of for every segment. Requires `index_bounds`.
    pub by_segment: bool,
    /// Keep a drag alive while the pointer is outside the canvas.
    pub document_drag: bool,
    /// Geometry kinds that may be selected for editing; `None` allows all.
    pub geometry_types: Option<Vec<GeometryKind>>,
    /// Deselect when a press lands outside every feature.
    pub clickout: bool,
    /// Deselect when the selected feature is pressed again.
    pub toggle: bool,
    /// Never select through interaction; the host selects explicitly.
    pub standalone: bool,
    /// Presentation intent for corner and edge handles.
    pub vertex_render_intent: RenderIntent,
    /// Handle pick radius, in pixels.
    pub pick_tolerance: f64,
    /// Plane bounds seeding the segment index (`by_segment` only).
    pub index_bounds: Option<Bounds>,
}

impl Default for ModifyOptions {
    fn default() -> Self {
        Self {
            by_segment: false,
            document_drag: false,
            geometry_types: None,
            clickout: true,
            toggle: true,
            standalone: false,
            vertex_render_intent: RenderIntent::Vertex,
            pick_tolerance: DEFAULT_PICK_TOLERANCE,
            index_bounds: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ModifyOptions::default();
        assert!(opts.clickout);
        assert!(opts.toggle);
        assert!(!opts.by_segment);
        assert!(!opts.standalone);
        assert_eq!(opts.pick_tolerance, DEFAULT_PICK_TOLERANCE);
        assert!(opts.geometry_types.is_none());
    }
}
