//! # FeatKit Modify
//!
//! Interactive, constraint-preserving editing of vector features. One
//! feature at a time is put under edit; its geometry grows a set of
//! draggable handles, and a constraint step keeps the ring rectilinear
//! (axis-aligned edges, right angles) after every pointer move.
//!
//! ## Core Components
//!
//! ### Editing surface
//! - **FeatureStore**: owns the editable features in draw order
//! - **Viewport**: pixel/plane coordinate mapping for pointer events
//! - **EditLayer**: seam to the host's renderer and selection set
//!
//! ### Interaction
//! - **ModifyControl**: selection lifecycle and pointer dispatch
//! - **Interaction**: the press/move/release state machine
//! - **Constraint step**: corner and edge propagation rules
//!
//! ### Handles
//! - **VertexHandle**: corner, edge-midpoint, loose, and translate handles
//! - **HandleStrategy**: full vs segment-local handle materialization
//! - **SpatialIndex**: quadtree backing the segment-local strategy
//!
//! ## Architecture
//!
//! ```text
//! Pointer events (host)
//!   └── ModifyControl
//!         ├── Viewport (pixel -> plane)
//!         ├── Interaction (Idle | Selected | Dragging | PendingDeselect)
//!         ├── Constraint step (mutates FeatureStore geometry)
//!         └── Handle maintenance (rebuilds the HandleSet)
//!               └── HandleStrategy (FullEdit | SegmentEdit + SpatialIndex)
//!
//! ModifyControl --> EditLayer (redraws)
//!               --> EventBus + ModifyListener (notifications)
//! ```

pub mod constraint;
pub mod control;
pub mod drag;
pub mod feature_store;
pub mod handles;
pub mod layer;
pub mod options;
pub mod spatial_index;
pub mod vertex;
pub mod viewport;

pub use constraint::Propagated;
pub use control::{ModifyControl, KEY_DELETE};
pub use drag::Interaction;
pub use feature_store::FeatureStore;
pub use handles::{collect_handles, FullEdit, HandleIds, HandleStrategy, SegmentEdit};
pub use layer::{EditLayer, NullLayer};
pub use options::ModifyOptions;
pub use spatial_index::{IndexStats, SpatialIndex};
pub use vertex::{HandleKind, HandleSet, VertexHandle};
pub use viewport::Viewport;
