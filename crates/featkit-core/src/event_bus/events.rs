//! Event type definitions for the edit event bus.
//!
//! Events are designed to be cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

use crate::geom::{PixelPoint, Point};

/// Root event enum for all editing notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EditEvent {
    /// Feature lifecycle notifications
    Feature(FeatureEvent),
    /// Per-vertex notifications emitted during drags
    Vertex(VertexEvent),
}

impl EditEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            EditEvent::Feature(_) => EventCategory::Feature,
            EditEvent::Vertex(_) => EventCategory::Vertex,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            EditEvent::Feature(e) => e.description(),
            EditEvent::Vertex(e) => e.description(),
        }
    }

    /// The feature the event refers to
    pub fn feature(&self) -> u64 {
        match self {
            EditEvent::Feature(FeatureEvent::BeforeModified { feature })
            | EditEvent::Feature(FeatureEvent::Modified { feature, .. })
            | EditEvent::Feature(FeatureEvent::AfterModified { feature, .. })
            | EditEvent::Vertex(VertexEvent::Modified { feature, .. }) => *feature,
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Feature lifecycle events.
    Feature,
    /// Per-vertex drag events.
    Vertex,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Feature => write!(f, "Feature"),
            EventCategory::Vertex => write!(f, "Vertex"),
        }
    }
}

/// Feature lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FeatureEvent {
    /// A feature is about to enter editing. Guard handlers may cancel.
    BeforeModified {
        /// Id of the feature entering editing.
        feature: u64,
    },
    /// A drag on the selected feature completed.
    Modified {
        /// Id of the edited feature.
        feature: u64,
        /// Whether any geometry edit happened since selection.
        modified: bool,
    },
    /// The feature left editing.
    AfterModified {
        /// Id of the feature that left editing.
        feature: u64,
        /// Whether any geometry edit happened while it was selected.
        modified: bool,
    },
}

impl FeatureEvent {
    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            FeatureEvent::BeforeModified { feature } => {
                format!("Feature {} entering editing", feature)
            }
            FeatureEvent::Modified { feature, .. } => {
                format!("Drag completed on feature {}", feature)
            }
            FeatureEvent::AfterModified { feature, modified } => {
                format!("Feature {} left editing (modified: {})", feature, modified)
            }
        }
    }
}

/// Vertex-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VertexEvent {
    /// A dragged handle moved one or more vertices.
    Modified {
        /// Id of the feature owning the vertex.
        feature: u64,
        /// Plane position of the dragged vertex after the step.
        vertex: Point,
        /// Pointer position in screen space, when the move came from a
        /// pointer event.
        pixel: Option<PixelPoint>,
    },
}

impl VertexEvent {
    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            VertexEvent::Modified {
                feature, vertex, ..
            } => {
                format!(
                    "Vertex of feature {} moved to ({:.3}, {:.3})",
                    feature, vertex.x, vertex.y
                )
            }
        }
    }
}
