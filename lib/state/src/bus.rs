//! Typed fan-out channel for live events.
//!
//! The WebSocket reader publishes incoming device events here; any number
//! of listeners (page view-models, the CLI `watch` loop) subscribe.
//! Delivery is synchronous on the emitter's task, unbuffered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::value::SubscriptionId;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

pub struct EventBus<T> {
    listeners: RwLock<Vec<(SubscriptionId, Listener<T>)>>,
    next_id: AtomicU64,
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().unwrap().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.write().unwrap().retain(|(l, _)| *l != id);
    }

    /// Deliver `event` to every listener, in subscription order.
    pub fn emit(&self, event: &T) {
        let listeners: Vec<Listener<T>> = self
            .listeners
            .read()
            .unwrap()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().unwrap().len()
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct DeviceEvent {
        code: String,
    }

    #[test]
    fn emit_reaches_all_listeners() {
        let bus = EventBus::<DeviceEvent>::new();
        let seen_a = Arc::new(RwLock::new(Vec::new()));
        let seen_b = Arc::new(RwLock::new(Vec::new()));
        let a = seen_a.clone();
        let b = seen_b.clone();

        bus.subscribe(move |e: &DeviceEvent| a.write().unwrap().push(e.code.clone()));
        bus.subscribe(move |e: &DeviceEvent| b.write().unwrap().push(e.code.clone()));

        bus.emit(&DeviceEvent {
            code: "VideoMotion".to_string(),
        });

        assert_eq!(*seen_a.read().unwrap(), vec!["VideoMotion"]);
        assert_eq!(*seen_b.read().unwrap(), vec!["VideoMotion"]);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let bus = EventBus::<u32>::new();
        let hits = Arc::new(AtomicU64::new(0));
        let h1 = hits.clone();
        let h2 = hits.clone();

        let id = bus.subscribe(move |_| {
            h1.fetch_add(1, Ordering::Relaxed);
        });
        bus.subscribe(move |_| {
            h2.fetch_add(10, Ordering::Relaxed);
        });

        bus.unsubscribe(id);
        bus.emit(&0);
        assert_eq!(hits.load(Ordering::Relaxed), 10);
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn emit_without_listeners_is_fine() {
        let bus = EventBus::<u32>::new();
        bus.emit(&7);
    }
}
