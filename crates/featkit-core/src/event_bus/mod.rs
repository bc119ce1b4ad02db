//! # Event Bus Module
//!
//! Publish/subscribe notifications for the editing lifecycle, decoupling
//! the modify control from whoever observes it.
//!
//! ## Overview
//!
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter and receive events of interest
//! - Guard handlers can veto the one cancellable notification
//! - Supports both sync and async event handling
//!
//! ## Usage
//!
//! ```rust,ignore
//! use featkit_core::event_bus::{EditEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//!
//! // Subscribe to vertex events
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Vertex]),
//!     |event| {
//!         if let EditEvent::Vertex(v) = event {
//!             println!("Vertex event: {:?}", v);
//!         }
//!     },
//! );
//!
//! // Unsubscribe when done
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
