use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type-erased, reference-counted state value.
///
/// Page states of different concrete types all live in one [`crate::StateStore`],
/// so values are stored as `Arc<dyn Any + Send + Sync>`. Clone is an atomic
/// increment; readers downcast back to the concrete type.
#[derive(Clone)]
pub struct StateValue {
    inner: Arc<dyn Any + Send + Sync>,
}

impl StateValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Downcast to a concrete type, or `None` on a type mismatch.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Whether the stored value is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateValue")
            .field("type_id", &(*self.inner).type_id())
            .finish()
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct SessionState {
        username: String,
        valid: bool,
    }

    #[test]
    fn downcast_to_stored_type() {
        let v = StateValue::new(SessionState {
            username: "admin".to_string(),
            valid: true,
        });
        let got = v.downcast_ref::<SessionState>().unwrap();
        assert_eq!(got.username, "admin");
        assert!(got.valid);
    }

    #[test]
    fn downcast_wrong_type_is_none() {
        let v = StateValue::new(42u32);
        assert!(v.downcast_ref::<SessionState>().is_none());
        assert!(v.downcast_ref::<i32>().is_none());
    }

    #[test]
    fn is_checks_type() {
        let v = StateValue::new("dark".to_string());
        assert!(v.is::<String>());
        assert!(!v.is::<u32>());
    }

    #[test]
    fn clone_shares_underlying_data() {
        let v1 = StateValue::new(vec![1i64, 2, 3]);
        let v2 = v1.clone();
        let p1 = v1.downcast_ref::<Vec<i64>>().unwrap().as_ptr();
        let p2 = v2.downcast_ref::<Vec<i64>>().unwrap().as_ptr();
        assert_eq!(p1, p2);
    }

    #[test]
    fn subscription_ids_compare_and_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(SubscriptionId(1));
        set.insert(SubscriptionId(2));
        set.insert(SubscriptionId(1));
        assert_eq!(set.len(), 2);
        assert_ne!(SubscriptionId(1), SubscriptionId(2));
    }

    fn _assert_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<StateValue>();
        assert_sync::<StateValue>();
    }
}
