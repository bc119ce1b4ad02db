//! Error handling for FeatKit
//!
//! Provides error types for both layers of the workspace:
//! - Edit errors (modify-control configuration and lifecycle)
//! - Geometry errors (ring and geometry validity)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Edit error type
///
/// Represents failures of the modify control: configuration problems at
/// construction time and lifecycle misuse.
#[derive(Error, Debug, Clone)]
pub enum EditError {
    /// Segment-local editing was requested without a way to seed the
    /// segment index
    #[error("Segment index unavailable: {reason}")]
    MissingSegmentIndex {
        /// Why the segment index could not be built.
        reason: String,
    },

    /// The referenced feature is not in the store
    #[error("Feature {id} not found")]
    FeatureNotFound {
        /// The feature id that was looked up.
        id: u64,
    },

    /// An operation that needs a selection ran without one
    #[error("No feature is selected")]
    NoSelection,
}

/// Geometry error type
///
/// Represents violations of ring and geometry validity.
#[derive(Error, Debug, Clone)]
pub enum GeometryError {
    /// A ring needs at least three distinct vertices
    #[error("Ring needs at least 3 distinct vertices, got {count}")]
    DegenerateRing {
        /// Number of distinct vertices supplied.
        count: usize,
    },

    /// Vertex index outside the ring
    #[error("Vertex index {index} out of range for ring of {count} vertices")]
    VertexOutOfRange {
        /// The requested vertex index.
        index: usize,
        /// Number of distinct vertices in the ring.
        count: usize,
    },

    /// Ring slot not present in the geometry
    #[error("Geometry has no ring {ring}")]
    NoSuchRing {
        /// The requested ring slot.
        ring: usize,
    },
}

/// Main error type for FeatKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Edit error
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an edit error
    pub fn is_edit_error(&self) -> bool {
        matches!(self, Error::Edit(_))
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
