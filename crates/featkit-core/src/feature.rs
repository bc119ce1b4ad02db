//! Editable features and their lifecycle bookkeeping.

use serde::{Deserialize, Serialize};

use crate::geom::Geometry;

/// Lifecycle state of a feature, reported to the host once editing ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureState {
    /// Freshly created or loaded, no edits recorded.
    #[default]
    Unchanged,
    /// Created locally and not yet committed upstream.
    Insert,
    /// Geometry or attributes were edited.
    Update,
    /// Marked for removal.
    Delete,
}

/// Presentation intent passed to the rendering layer with a draw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderIntent {
    /// Ordinary feature presentation.
    #[default]
    Default,
    /// Feature under edit.
    Select,
    /// Short-lived helper presentation.
    Temporary,
    /// Corner and edge handle presentation.
    Vertex,
}

/// An editable feature: a geometry plus lifecycle bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub id: u64,
    pub geometry: Geometry,
    pub state: FeatureState,
    /// Pre-edit geometry attached once a completed drag modified the
    /// feature; consumed by the host to report what changed.
    pub original: Option<Geometry>,
    /// Marks editing affordances (handles) as opposed to domain data.
    pub sketch: bool,
}

impl Feature {
    /// Creates a new feature in the `Unchanged` state.
    pub fn new(id: u64, geometry: Geometry) -> Self {
        Self {
            id,
            geometry,
            state: FeatureState::Unchanged,
            original: None,
            sketch: false,
        }
    }

    /// Transitions the lifecycle state after an edit: `Unchanged` becomes
    /// `Update`, while `Insert` and `Delete` are preserved.
    pub fn mark_updated(&mut self) {
        if !matches!(self.state, FeatureState::Insert | FeatureState::Delete) {
            self.state = FeatureState::Update;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, Ring};

    #[test]
    fn test_new_feature_defaults() {
        let f = Feature::new(7, Geometry::Point(Point::new(1.0, 2.0)));
        assert_eq!(f.id, 7);
        assert_eq!(f.state, FeatureState::Unchanged);
        assert!(f.original.is_none());
        assert!(!f.sketch);
    }

    #[test]
    fn test_mark_updated_transitions() {
        let mut f = Feature::new(1, Geometry::Ring(Ring::rect(0.0, 0.0, 1.0, 1.0)));
        f.mark_updated();
        assert_eq!(f.state, FeatureState::Update);

        f.state = FeatureState::Insert;
        f.mark_updated();
        assert_eq!(f.state, FeatureState::Insert);

        f.state = FeatureState::Delete;
        f.mark_updated();
        assert_eq!(f.state, FeatureState::Delete);
    }
}
