//! # Change Notification
//!
//! After a mutation has been committed, the API facade announces it with a
//! [`ChangeEvent`] so read-through caches (a rendered catalog page, a cached profile
//! card) know to refresh.
//!
//! Delivery is best-effort. A listener that fails or panics is logged and skipped;
//! the write it was told about stays committed and the caller still gets its result.
//!
//! Listeners are held weakly: [`Notifier::subscribe`] hands back a [`Subscription`]
//! and dropping it unsubscribes.

use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Products,
    Profile,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Products => f.write_str("products"),
            Collection::Profile => f.write_str("profile"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
    Saved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
    /// The product name after the change; `None` for the profile.
    pub key: Option<String>,
}

impl ChangeEvent {
    pub fn product(kind: ChangeKind, name: impl Into<String>) -> Self {
        Self {
            collection: Collection::Products,
            kind,
            key: Some(name.into()),
        }
    }

    pub fn profile() -> Self {
        Self {
            collection: Collection::Profile,
            kind: ChangeKind::Saved,
            key: None,
        }
    }
}

#[derive(Error, Debug)]
#[error("{0}")]
pub struct NotifyError(pub String);

pub trait ChangeListener: Send + Sync {
    fn on_change(&self, event: &ChangeEvent) -> Result<(), NotifyError>;
}

impl<F> ChangeListener for F
where
    F: Fn(&ChangeEvent) -> Result<(), NotifyError> + Send + Sync,
{
    fn on_change(&self, event: &ChangeEvent) -> Result<(), NotifyError> {
        self(event)
    }
}

/// Keeps a listener registered for as long as it is alive.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    _listener: Arc<dyn ChangeListener>,
}

#[derive(Default)]
pub struct Notifier {
    listeners: RwLock<Vec<Weak<dyn ChangeListener>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<L: ChangeListener + 'static>(&self, listener: L) -> Subscription {
        let listener: Arc<dyn ChangeListener> = Arc::new(listener);
        self.listeners.write().push(Arc::downgrade(&listener));
        Subscription {
            _listener: listener,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .iter()
            .filter(|l| l.strong_count() > 0)
            .count()
    }

    /// Deliver `event` to every live listener. Returns how many accepted it.
    pub fn notify(&self, event: &ChangeEvent) -> usize {
        // Listeners run without the registry lock held, so they may subscribe.
        let live: Vec<Arc<dyn ChangeListener>> = self
            .listeners
            .read()
            .iter()
            .filter_map(Weak::upgrade)
            .collect();

        let mut delivered = 0;
        for listener in &live {
            match catch_unwind(AssertUnwindSafe(|| listener.on_change(event))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    warn!(collection = %event.collection, kind = ?event.kind, error = %e, "change listener failed")
                }
                Err(_) => {
                    warn!(collection = %event.collection, kind = ?event.kind, "change listener panicked")
                }
            }
        }

        let mut listeners = self.listeners.write();
        if listeners.len() != live.len() {
            listeners.retain(|l| l.strong_count() > 0);
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn delivers_to_subscribers() {
        let notifier = Notifier::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = notifier.subscribe(move |e: &ChangeEvent| -> Result<(), NotifyError> {
            sink.lock().push(e.clone());
            Ok(())
        });

        let event = ChangeEvent::product(ChangeKind::Added, "Vase");
        assert_eq!(notifier.notify(&event), 1);
        assert_eq!(*seen.lock(), vec![event]);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let notifier = Notifier::new();
        let sub = notifier.subscribe(|_: &ChangeEvent| -> Result<(), NotifyError> { Ok(()) });
        assert_eq!(notifier.listener_count(), 1);
        drop(sub);
        assert_eq!(notifier.notify(&ChangeEvent::profile()), 0);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn failing_listener_does_not_stop_others() {
        let notifier = Notifier::new();
        let _bad = notifier.subscribe(|_: &ChangeEvent| -> Result<(), NotifyError> {
            Err(NotifyError("cache offline".into()))
        });
        let _panicky = notifier.subscribe(|_: &ChangeEvent| -> Result<(), NotifyError> {
            panic!("listener bug")
        });
        let hits = Arc::new(Mutex::new(0));
        let counter = hits.clone();
        let _good = notifier.subscribe(move |_: &ChangeEvent| -> Result<(), NotifyError> {
            *counter.lock() += 1;
            Ok(())
        });

        assert_eq!(notifier.notify(&ChangeEvent::profile()), 1);
        assert_eq!(*hits.lock(), 1);
    }

    #[test]
    fn events_serialize_lowercase() {
        let json = serde_json::to_value(ChangeEvent::product(ChangeKind::Removed, "Vase")).unwrap();
        assert_eq!(json["collection"], "products");
        assert_eq!(json["kind"], "removed");
        assert_eq!(json["key"], "Vase");
    }
}
