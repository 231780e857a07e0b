use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::value::{StateValue, SubscriptionId};

/// Callback invoked with the path and new value on every change.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

// ── Patterns ──
//
// A subscription pattern is either an exact path ("session") or a
// prefix pattern ("pages/*") matching every path strictly below the
// prefix. "*" alone matches everything.

#[derive(Debug, Clone, PartialEq)]
enum Pattern {
    Exact(String),
    Prefix(String),
    All,
}

impl Pattern {
    fn parse(pattern: &str) -> Self {
        if pattern == "*" {
            Pattern::All
        } else if let Some(prefix) = pattern.strip_suffix("/*") {
            Pattern::Prefix(prefix.to_string())
        } else {
            Pattern::Exact(pattern.to_string())
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            Pattern::Exact(p) => p == path,
            Pattern::Prefix(prefix) => path
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with('/')),
            Pattern::All => true,
        }
    }
}

struct Subscription {
    id: SubscriptionId,
    pattern: Pattern,
    handler: ChangeHandler,
}

/// Path-keyed state store with explicit pub/sub change notification.
///
/// - `set(path, value)` stores a value and synchronously notifies every
///   matching subscriber (after the store already holds the new value).
/// - `get(path)` reads the current value (Arc clone, cheap).
/// - `mutate(path, f)` is read-clone-modify-write plus notification.
/// - `scan(prefix)` lists all children under a prefix, ordered by path.
///
/// Updates are serialized by the internal lock; readers are many.
/// Handlers run on the writer's thread and must not call back into
/// `set` on the same path.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    subs: RwLock<Vec<Subscription>>,
    next_id: AtomicU64,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            subs: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store a typed value at `path` and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    /// Store a pre-wrapped value at `path` and notify matching subscribers.
    pub fn set_value(&self, path: &str, value: StateValue) {
        {
            let mut values = self.values.write().unwrap();
            values.insert(path.to_string(), value.clone());
        }
        for handler in self.matching_handlers(path) {
            handler(path, &value);
        }
    }

    /// Current value at `path`, or `None`.
    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.values.read().unwrap().get(path).cloned()
    }

    /// Typed read: downcast the value at `path` and clone it out.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path)
            .and_then(|v| v.downcast_ref::<T>().cloned())
    }

    /// Read-clone-modify-write the value at `path`.
    ///
    /// Returns false when the path is unset or holds a different type;
    /// in that case nothing is written and nobody is notified.
    pub fn mutate<T, F>(&self, path: &str, f: F) -> bool
    where
        T: Any + Send + Sync + Clone,
        F: FnOnce(&mut T),
    {
        let Some(mut current) = self.get_as::<T>(path) else {
            return false;
        };
        f(&mut current);
        self.set(path, current);
        true
    }

    /// Remove the value at `path`, returning it. Subscribers are not
    /// notified of removals.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        self.values.write().unwrap().remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.read().unwrap().contains_key(path)
    }

    /// All entries strictly under `{prefix}/`, ordered by path.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        let values = self.values.read().unwrap();
        let scan_prefix = format!("{prefix}/");
        values
            .range(scan_prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&scan_prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to changes matching `pattern` (exact path, `prefix/*`,
    /// or `*`). The handler runs synchronously on every matching `set`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subs.write().unwrap().push(Subscription {
            id,
            pattern: Pattern::parse(pattern),
            handler: Arc::new(handler),
        });
        id
    }

    /// Remove a subscription. Unknown ids are a no-op.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subs.write().unwrap().retain(|s| s.id != id);
    }

    fn matching_handlers(&self, path: &str) -> Vec<ChangeHandler> {
        self.subs
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.pattern.matches(path))
            .map(|s| Arc::clone(&s.handler))
            .collect()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU64;

    #[derive(Debug, Clone, PartialEq)]
    struct PageState {
        loading: bool,
        items: Vec<i64>,
    }

    // ========================================================================
    // Get / set / mutate
    // ========================================================================

    #[test]
    fn set_then_get() {
        let store = StateStore::new();
        store.set("theme", "dark".to_string());
        let v = store.get("theme").unwrap();
        assert_eq!(v.downcast_ref::<String>(), Some(&"dark".to_string()));
    }

    #[test]
    fn get_as_clones_typed_value() {
        let store = StateStore::new();
        store.set(
            "pages/devices",
            PageState {
                loading: true,
                items: vec![],
            },
        );
        let got = store.get_as::<PageState>("pages/devices").unwrap();
        assert!(got.loading);
    }

    #[test]
    fn get_missing_is_none() {
        let store = StateStore::new();
        assert!(store.get("pages/devices").is_none());
        assert!(store.get_as::<PageState>("pages/devices").is_none());
    }

    #[test]
    fn set_overwrites() {
        let store = StateStore::new();
        store.set("menu-open", true);
        store.set("menu-open", false);
        assert_eq!(store.get_as::<bool>("menu-open"), Some(false));
    }

    #[test]
    fn mutate_updates_in_place() {
        let store = StateStore::new();
        store.set(
            "pages/devices",
            PageState {
                loading: true,
                items: vec![1],
            },
        );
        let ok = store.mutate::<PageState, _>("pages/devices", |s| {
            s.loading = false;
            s.items.push(2);
        });
        assert!(ok);
        let got = store.get_as::<PageState>("pages/devices").unwrap();
        assert!(!got.loading);
        assert_eq!(got.items, vec![1, 2]);
    }

    #[test]
    fn mutate_missing_or_mistyped_is_noop() {
        let store = StateStore::new();
        assert!(!store.mutate::<PageState, _>("pages/devices", |_| {}));

        store.set("pages/devices", 42u32);
        assert!(!store.mutate::<PageState, _>("pages/devices", |_| {}));
        assert_eq!(store.get_as::<u32>("pages/devices"), Some(42));
    }

    #[test]
    fn mutate_notifies_subscribers() {
        let store = StateStore::new();
        store.set("menu-open", true);

        let hits = Arc::new(AtomicU64::new(0));
        let hits_c = hits.clone();
        store.subscribe("menu-open", move |_, _| {
            hits_c.fetch_add(1, Ordering::Relaxed);
        });

        store.mutate::<bool, _>("menu-open", |v| *v = false);
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    // ========================================================================
    // Remove / scan
    // ========================================================================

    #[test]
    fn remove_returns_old_value() {
        let store = StateStore::new();
        store.set("session", "s".to_string());
        let old = store.remove("session").unwrap();
        assert!(old.is::<String>());
        assert!(!store.contains("session"));
    }

    #[test]
    fn scan_lists_children_in_order() {
        let store = StateStore::new();
        store.set("pages/users", 1u32);
        store.set("pages/devices", 2u32);
        store.set("pages/devices/detail", 3u32);
        store.set("session", 4u32);

        let paths: Vec<String> = store.scan("pages").into_iter().map(|(k, _)| k).collect();
        assert_eq!(paths, vec!["pages/devices", "pages/devices/detail", "pages/users"]);
    }

    #[test]
    fn scan_excludes_exact_prefix_and_similar_names() {
        let store = StateStore::new();
        store.set("pages", 0u32);
        store.set("pages-extra", 0u32);
        store.set("pages/devices", 0u32);

        let paths: Vec<String> = store.scan("pages").into_iter().map(|(k, _)| k).collect();
        assert_eq!(paths, vec!["pages/devices"]);
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    #[test]
    fn exact_subscription_fires_only_for_its_path() {
        let store = StateStore::new();
        let hits = Arc::new(AtomicU64::new(0));
        let hits_c = hits.clone();
        store.subscribe("session", move |path, _| {
            assert_eq!(path, "session");
            hits_c.fetch_add(1, Ordering::Relaxed);
        });

        store.set("session", 1u32);
        store.set("theme", 2u32);
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn prefix_subscription_matches_strictly_below() {
        let store = StateStore::new();
        let seen = Arc::new(RwLock::new(Vec::<String>::new()));
        let seen_c = seen.clone();
        store.subscribe("pages/*", move |path, _| {
            seen_c.write().unwrap().push(path.to_string());
        });

        store.set("pages", 0u32); // prefix itself: no match
        store.set("pages/devices", 0u32);
        store.set("pages/devices/detail", 0u32);
        store.set("pagesx", 0u32); // similar name: no match

        let seen = seen.read().unwrap();
        assert_eq!(*seen, vec!["pages/devices", "pages/devices/detail"]);
    }

    #[test]
    fn star_subscription_matches_everything() {
        let store = StateStore::new();
        let hits = Arc::new(AtomicU64::new(0));
        let hits_c = hits.clone();
        store.subscribe("*", move |_, _| {
            hits_c.fetch_add(1, Ordering::Relaxed);
        });

        store.set("session", 1u32);
        store.set("pages/devices", 2u32);
        assert_eq!(hits.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn subscriber_observes_value_already_stored() {
        let store = Arc::new(StateStore::new());
        let store_c = store.clone();
        store.subscribe("theme", move |path, _| {
            assert_eq!(store_c.get_as::<String>(path), Some("light".to_string()));
        });
        store.set("theme", "light".to_string());
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = StateStore::new();
        let hits = Arc::new(AtomicU64::new(0));
        let hits_c = hits.clone();
        let id = store.subscribe("session", move |_, _| {
            hits_c.fetch_add(1, Ordering::Relaxed);
        });

        store.set("session", 1u32);
        store.unsubscribe(id);
        store.set("session", 2u32);
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn unsubscribe_keeps_other_subscribers() {
        let store = StateStore::new();
        let a = Arc::new(AtomicU64::new(0));
        let b = Arc::new(AtomicU64::new(0));
        let a_c = a.clone();
        let b_c = b.clone();
        let id_a = store.subscribe("session", move |_, _| {
            a_c.fetch_add(1, Ordering::Relaxed);
        });
        store.subscribe("session", move |_, _| {
            b_c.fetch_add(1, Ordering::Relaxed);
        });

        store.unsubscribe(id_a);
        store.set("session", 1u32);
        assert_eq!(a.load(Ordering::Relaxed), 0);
        assert_eq!(b.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn unsubscribe_unknown_id_is_noop() {
        let store = StateStore::new();
        store.unsubscribe(SubscriptionId(999));
    }

    // ========================================================================
    // Concurrency
    // ========================================================================

    #[test]
    fn concurrent_writers_and_readers() {
        use std::thread;

        let store = Arc::new(StateStore::new());
        let mut handles = vec![];

        for t in 0..4 {
            let store_w = store.clone();
            handles.push(thread::spawn(move || {
                for i in 0..250 {
                    store_w.set(&format!("pages/p{t}/{i}"), i as u32);
                }
            }));
        }
        let store_r = store.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..500 {
                let _ = store_r.scan("pages");
            }
        }));

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 1000);
    }
}
