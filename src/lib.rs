//! # FeatKit
//!
//! An interactive editing toolkit for 2-D vector features. A selected
//! feature grows a set of draggable handles (its ring corners, the
//! midpoints of its edges, and a whole-shape translate handle), and a
//! constraint step keeps the ring rectilinear (axis-aligned edges, right
//! angles) after every pointer move.
//!
//! ## Architecture
//!
//! FeatKit is organized as a workspace with multiple crates:
//!
//! 1. **featkit-core** - Geometry model, features, errors, listeners, events
//! 2. **featkit-modify** - The modify control: handles, selection, drag
//!    dispatch, constraint step, spatial index, viewport
//! 3. **featkit** - This facade, re-exporting both crates
//!
//! Rendering and raw input capture stay with the host: pointer events come
//! in through [`ModifyControl`], and redraw requests go out through the
//! [`EditLayer`] seam. Notifications flow over the control's [`EventBus`]
//! and any registered [`ModifyListener`]s.
//!
//! ## Features
//!
//! - **Rectangle-preserving drags**: corner moves propagate one coordinate
//!   to each neighbor; edge-midpoint moves shift their whole segment
//! - **Handle lifecycle**: handle sets rebuilt from geometry after every
//!   structural change, never patched in place
//! - **Segment-local editing**: optional quadtree-backed strategy that
//!   materializes only the handles near the pointer
//! - **Cancellable notifications**: guard handlers can veto a selection
//!   before any state changes

pub use featkit_modify as modify;

pub use featkit_core::{
    Bounds, EditError, EditEvent, Error, EventBus, EventBusConfig, EventCategory, EventFilter,
    Feature, FeatureEvent, FeatureState, Geometry, GeometryError, GeometryKind, ModifyListener,
    ModifyListenerHandle, PixelPoint, Point, Polygon, RenderIntent, Result, Ring, RingId,
    SubscriptionId, VertexEvent,
};

pub use featkit_modify::{
    EditLayer, FeatureStore, FullEdit, HandleKind, HandleSet, HandleStrategy, Interaction,
    ModifyControl, ModifyOptions, SegmentEdit, SpatialIndex, VertexHandle, Viewport, KEY_DELETE,
};

/// Initializes tracing for hosts that have no subscriber of their own.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer().with_target(true).with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
