//! Event Bus implementation.
//!
//! Provides the EventBus struct used by one editing surface for
//! notification distribution.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{EditEvent, EventCategory};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &EditEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

/// Type alias for event handler functions
type EventHandler = Box<dyn Fn(EditEvent) + Send + Sync>;

/// Type alias for guard handler functions; returning `false` cancels a
/// guarded publish
type GuardHandler = Box<dyn Fn(&EditEvent) -> bool + Send + Sync>;

/// Configuration for the event bus
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Channel capacity for broadcast.
    pub channel_capacity: usize,
    /// Whether to keep event history.
    pub enable_history: bool,
    /// Maximum number of events to retain in history.
    pub max_history_size: usize,
    /// How long to retain events in history.
    pub history_retention: Duration,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
            enable_history: false,
            max_history_size: 1000,
            history_retention: Duration::from_secs(300),
        }
    }
}

/// Event with timestamp for history
#[derive(Debug, Clone)]
struct TimestampedEvent {
    event: EditEvent,
    timestamp: Instant,
}

/// Error types for event bus operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    /// No subscribers are listening
    #[error("No active subscribers")]
    NoSubscribers,
    /// Channel is closed
    #[error("Event channel is closed")]
    ChannelClosed,
}

/// Event bus for one editing surface
///
/// Owned by the control whose lifecycle it narrates; hosts subscribe for
/// notifications and may register guards to veto cancellable ones.
pub struct EventBus {
    /// Broadcast channel sender
    sender: broadcast::Sender<EditEvent>,
    /// Registered synchronous handlers
    handlers: Arc<RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>>,
    /// Registered guard handlers consulted by guarded publishes
    guards: Arc<RwLock<HashMap<SubscriptionId, (EventFilter, GuardHandler)>>>,
    /// Event history (optional)
    history: Arc<RwLock<VecDeque<TimestampedEvent>>>,
    /// Configuration
    config: EventBusConfig,
}

impl EventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity);
        Self {
            sender,
            handlers: Arc::new(RwLock::new(HashMap::new())),
            guards: Arc::new(RwLock::new(HashMap::new())),
            history: Arc::new(RwLock::new(VecDeque::new())),
            config,
        }
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of receivers that will receive the event,
    /// or an error if there are no subscribers at all.
    pub fn publish(&self, event: EditEvent) -> Result<usize, EventBusError> {
        // Add to history if enabled
        if self.config.enable_history {
            self.add_to_history(&event);
        }

        // Call synchronous handlers
        let handlers = self.handlers.read();
        for (_, (filter, handler)) in handlers.iter() {
            if filter.matches(&event) {
                handler(event.clone());
            }
        }

        // Send via broadcast channel for async receivers
        match self.sender.send(event) {
            Ok(count) => Ok(count),
            Err(_) => {
                // No receivers, but handlers may have been called
                if handlers.is_empty() {
                    Err(EventBusError::NoSubscribers)
                } else {
                    Ok(0)
                }
            }
        }
    }

    /// Publish a cancellable event
    ///
    /// Guard handlers matching the event run first; if any returns
    /// `false` the event is dropped without reaching subscribers and this
    /// returns `false`. Otherwise the event is published normally.
    pub fn publish_guarded(&self, event: EditEvent) -> bool {
        {
            let guards = self.guards.read();
            for (_, (filter, guard)) in guards.iter() {
                if filter.matches(&event) && !guard(&event) {
                    tracing::debug!("Event cancelled by guard: {}", event.description());
                    return false;
                }
            }
        }
        self.publish(event).ok();
        true
    }

    /// Subscribe to events with a synchronous handler
    ///
    /// The handler will be called on the publishing thread, so it should
    /// return quickly to avoid blocking event dispatch.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(EditEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        let mut handlers = self.handlers.write();
        handlers.insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Register a guard consulted by guarded publishes
    ///
    /// Returning `false` from the guard cancels the event.
    pub fn guard<F>(&self, filter: EventFilter, guard: F) -> SubscriptionId
    where
        F: Fn(&EditEvent) -> bool + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        let mut guards = self.guards.write();
        guards.insert(id, (filter, Box::new(guard)));
        tracing::debug!("Guard {} added", id);
        id
    }

    /// Get a receiver for manual event polling
    ///
    /// This is useful for async contexts where you want to receive events
    /// in a task.
    pub fn receiver(&self) -> broadcast::Receiver<EditEvent> {
        self.sender.subscribe()
    }

    /// Unsubscribe a handler or guard
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some()
            || self.guards.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active subscriptions (guards included)
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len() + self.guards.read().len()
    }

    /// Get recent event history (if enabled)
    ///
    /// Returns events since the given instant, or all history if None.
    pub fn history(&self, since: Option<Instant>) -> Vec<EditEvent> {
        if !self.config.enable_history {
            return Vec::new();
        }

        let history = self.history.read();
        match since {
            Some(since) => history
                .iter()
                .filter(|e| e.timestamp >= since)
                .map(|e| e.event.clone())
                .collect(),
            None => history.iter().map(|e| e.event.clone()).collect(),
        }
    }

    /// Clear event history
    pub fn clear_history(&self) {
        let mut history = self.history.write();
        history.clear();
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    /// Add an event to history, maintaining size and age limits
    fn add_to_history(&self, event: &EditEvent) {
        let mut history = self.history.write();
        let now = Instant::now();

        history.push_back(TimestampedEvent {
            event: event.clone(),
            timestamp: now,
        });

        // Remove old events
        let retention = self.config.history_retention;
        while history
            .front()
            .is_some_and(|e| now.duration_since(e.timestamp) > retention)
        {
            history.pop_front();
        }

        // Enforce max size
        while history.len() > self.config.max_history_size {
            history.pop_front();
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::events::{FeatureEvent, VertexEvent};
    use crate::geom::Point;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn feature_event(feature: u64) -> EditEvent {
        EditEvent::Feature(FeatureEvent::Modified {
            feature,
            modified: true,
        })
    }

    fn vertex_event(feature: u64) -> EditEvent {
        EditEvent::Vertex(VertexEvent::Modified {
            feature,
            vertex: Point::new(1.0, 2.0),
            pixel: None,
        })
    }

    #[test]
    fn test_event_bus_creation() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let bus = EventBus::new();

        let id = bus.subscribe(EventFilter::All, |_| {});
        assert_eq!(bus.subscriber_count(), 1);

        assert!(bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 0);

        // Double unsubscribe should return false
        assert!(!bus.unsubscribe(id));
    }

    #[test]
    fn test_event_delivery() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let _id = bus.subscribe(EventFilter::All, move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(feature_event(1)).expect("Should publish");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_filtering() {
        let bus = EventBus::new();
        let feature_count = Arc::new(AtomicUsize::new(0));
        let vertex_count = Arc::new(AtomicUsize::new(0));

        let fc = feature_count.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Feature]),
            move |_| {
                fc.fetch_add(1, Ordering::SeqCst);
            },
        );

        let vc = vertex_count.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Vertex]),
            move |_| {
                vc.fetch_add(1, Ordering::SeqCst);
            },
        );

        bus.publish(feature_event(1)).ok();
        bus.publish(vertex_event(1)).ok();

        assert_eq!(feature_count.load(Ordering::SeqCst), 1);
        assert_eq!(vertex_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_cancels_guarded_publish() {
        let bus = EventBus::new();
        let delivered = Arc::new(AtomicUsize::new(0));

        let dc = delivered.clone();
        bus.subscribe(EventFilter::All, move |_| {
            dc.fetch_add(1, Ordering::SeqCst);
        });
        bus.guard(EventFilter::All, |_| false);

        let allowed = bus.publish_guarded(EditEvent::Feature(FeatureEvent::BeforeModified {
            feature: 1,
        }));
        assert!(!allowed);
        // cancelled events never reach subscribers
        assert_eq!(delivered.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_guard_allows_when_true() {
        let bus = EventBus::new();
        let delivered = Arc::new(AtomicUsize::new(0));

        let dc = delivered.clone();
        bus.subscribe(EventFilter::All, move |_| {
            dc.fetch_add(1, Ordering::SeqCst);
        });
        bus.guard(EventFilter::All, |_| true);

        let allowed = bus.publish_guarded(EditEvent::Feature(FeatureEvent::BeforeModified {
            feature: 1,
        }));
        assert!(allowed);
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_filter_scopes_cancellation() {
        let bus = EventBus::new();
        // Guard only vetoes vertex events; feature events pass
        bus.guard(
            EventFilter::Categories(vec![EventCategory::Vertex]),
            |_| false,
        );
        bus.subscribe(EventFilter::All, |_| {});

        assert!(bus.publish_guarded(feature_event(1)));
        assert!(!bus.publish_guarded(vertex_event(1)));
    }

    #[test]
    fn test_event_history() {
        let config = EventBusConfig {
            enable_history: true,
            max_history_size: 10,
            ..Default::default()
        };
        let bus = EventBus::with_config(config);

        for i in 0..5 {
            bus.publish(feature_event(i)).ok();
        }

        let history = bus.history(None);
        assert_eq!(history.len(), 5);

        bus.clear_history();
        assert_eq!(bus.history(None).len(), 0);
    }

    #[test]
    fn test_history_max_size() {
        let config = EventBusConfig {
            enable_history: true,
            max_history_size: 5,
            ..Default::default()
        };
        let bus = EventBus::with_config(config);

        for i in 0..10 {
            bus.publish(feature_event(i)).ok();
        }

        let history = bus.history(None);
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn test_filter_matches() {
        let event = feature_event(1);

        assert!(EventFilter::All.matches(&event));
        assert!(EventFilter::Categories(vec![EventCategory::Feature]).matches(&event));
        assert!(!EventFilter::Categories(vec![EventCategory::Vertex]).matches(&event));
        assert!(
            EventFilter::Categories(vec![EventCategory::Feature, EventCategory::Vertex])
                .matches(&event)
        );
    }

    #[tokio::test]
    async fn test_async_receiver() {
        let bus = EventBus::new();
        let mut receiver = bus.receiver();

        bus.publish(feature_event(9)).ok();

        let received = receiver.try_recv();
        assert!(received.is_ok());

        if let Ok(EditEvent::Feature(FeatureEvent::Modified { feature, .. })) = received {
            assert_eq!(feature, 9);
        } else {
            panic!("Wrong event received");
        }
    }
}
