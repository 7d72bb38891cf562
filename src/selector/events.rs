//! Typed observer registry for selector notifications.

use serde::Serialize;
use std::collections::HashMap;

/// Failure reasons announced through [`SelectorEvent::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    VideoTooShort,
}

/// Notification emitted by a selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SelectorEvent {
    Initialized,
    Error {
        #[serde(rename = "errorType")]
        kind: ErrorKind,
    },
    VideoTooShort,
}

impl SelectorEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SelectorEvent::Initialized => EventKind::Initialized,
            SelectorEvent::Error { .. } => EventKind::Error,
            SelectorEvent::VideoTooShort => EventKind::VideoTooShort,
        }
    }
}

/// Subscription key, one per [`SelectorEvent`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Initialized,
    Error,
    VideoTooShort,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::Initialized,
        EventKind::Error,
        EventKind::VideoTooShort,
    ];
}

pub type Subscriber = Box<dyn FnMut(&SelectorEvent)>;

/// Ordered subscriber lists keyed by event kind.
#[derive(Default)]
pub struct EventRegistry {
    subscribers: HashMap<EventKind, Vec<Subscriber>>,
}

impl EventRegistry {
    pub fn on(&mut self, kind: EventKind, callback: impl FnMut(&SelectorEvent) + 'static) {
        self.subscribers
            .entry(kind)
            .or_default()
            .push(Box::new(callback));
    }

    /// Invoke every subscriber of the event's kind, synchronously and in
    /// registration order.
    pub fn emit(&mut self, event: &SelectorEvent) {
        tracing::debug!(?event, "emitting selector event");
        if let Some(subscribers) = self.subscribers.get_mut(&event.kind()) {
            for subscriber in subscribers.iter_mut() {
                subscriber(event);
            }
        }
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.get(&kind).map(Vec::len).unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: Vec<(EventKind, usize)> = EventKind::ALL
            .iter()
            .map(|kind| (*kind, self.subscriber_count(*kind)))
            .collect();
        f.debug_struct("EventRegistry")
            .field("subscribers", &counts)
            .finish()
    }
}
