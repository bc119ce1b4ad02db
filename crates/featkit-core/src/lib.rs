//! # FeatKit Core
//!
//! Core types, traits, and utilities for FeatKit.
//! Provides the fundamental abstractions for plane geometry, editable
//! features, modification listeners, and event distribution.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod feature;
pub mod geom;
pub mod listener;
pub mod types;

pub use error::{EditError, Error, GeometryError, Result};

pub use feature::{Feature, FeatureState, RenderIntent};

pub use geom::{Bounds, Geometry, GeometryKind, PixelPoint, Point, Polygon, Ring, RingId};

pub use listener::{ModifyListener, ModifyListenerHandle};

// Re-export event bus for convenience
pub use event_bus::{
    EditEvent, EventBus, EventBusConfig, EventCategory, EventFilter, FeatureEvent, SubscriptionId,
    VertexEvent,
};

// Re-export type aliases for convenience
pub use types::{shared, shared_none, BoxedIterator, Callback, DataCallback, Shared, SharedOption};
