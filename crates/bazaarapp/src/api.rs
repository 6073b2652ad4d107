//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for every UI (CLI, HTTP handler, tests).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the [`StorageEngine`] for its lifetime (open at startup, [`BazaarApi::close`]
//!   at shutdown). Nothing here is global; callers that want to share it across
//!   threads wrap it in an `Arc`.
//! - **Dispatches** to the appropriate command function.
//! - **Notifies** subscribers after a mutation has been committed, outside the store
//!   lock. Notification failures never turn a committed write into an error.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O beyond the store**: No stdout, stderr, or formatting
//!
//! ## Generic Over StorageBackend
//!
//! `BazaarApi<B: StorageBackend>` works with any backend:
//! - Production: `BazaarApi<FsBackend>`
//! - Testing: `BazaarApi<MemBackend>`

use crate::commands::{self, list::ProductFilter};
use crate::error::Result;
use crate::model::{Product, ProductInput, Profile};
use crate::notify::{ChangeEvent, ChangeKind, ChangeListener, Notifier, Subscription};
use crate::store::{StorageBackend, StorageEngine};
use std::path::PathBuf;

pub struct BazaarApi<B: StorageBackend> {
    store: StorageEngine<B>,
    notifier: Notifier,
}

impl<B: StorageBackend> BazaarApi<B> {
    pub fn new(store: StorageEngine<B>) -> Self {
        Self {
            store,
            notifier: Notifier::new(),
        }
    }

    pub fn store(&self) -> &StorageEngine<B> {
        &self.store
    }

    pub fn location(&self) -> PathBuf {
        self.store.location()
    }

    /// Register a listener for committed changes. Keep the returned handle alive.
    pub fn subscribe<L: ChangeListener + 'static>(&self, listener: L) -> Subscription {
        self.notifier.subscribe(listener)
    }

    pub fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        commands::list::run(&self.store, filter)
    }

    pub fn get_product(&self, name: &str) -> Result<Product> {
        commands::get::run(&self.store, name)
    }

    pub fn add_product(&self, input: ProductInput) -> Result<Product> {
        let product = commands::add::run(&self.store, input)?;
        self.notifier
            .notify(&ChangeEvent::product(ChangeKind::Added, &product.name));
        Ok(product)
    }

    /// Notifies only when the document actually changed.
    pub fn update_product(&self, original_name: &str, input: ProductInput) -> Result<Product> {
        let updated = commands::update::run(&self.store, original_name, input)?;
        if updated.changed {
            self.notifier.notify(&ChangeEvent::product(
                ChangeKind::Updated,
                &updated.product.name,
            ));
        }
        Ok(updated.product)
    }

    pub fn save_product(
        &self,
        input: ProductInput,
        original_name: Option<&str>,
    ) -> Result<Product> {
        match original_name {
            Some(original) => self.update_product(original, input),
            None => self.add_product(input),
        }
    }

    pub fn remove_product(&self, name: &str) -> Result<bool> {
        let removed = commands::remove::run(&self.store, name)?;
        if removed {
            self.notifier
                .notify(&ChangeEvent::product(ChangeKind::Removed, name));
        }
        Ok(removed)
    }

    pub fn get_profile(&self) -> Result<Profile> {
        commands::profile::get(&self.store)
    }

    pub fn save_profile(&self, profile: Profile) -> Result<Profile> {
        let saved = commands::profile::save(&self.store, profile)?;
        self.notifier.notify(&ChangeEvent::profile());
        Ok(saved)
    }

    pub fn close(self) -> Result<()> {
        self.store.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BazaarError;
    use crate::notify::{Collection, NotifyError};
    use crate::store::mem_backend::MemBackend;
    use crate::store::memory::fixtures::product;
    use crate::store::memory::InMemoryStore;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn make_api() -> BazaarApi<MemBackend> {
        BazaarApi::new(InMemoryStore::empty().unwrap())
    }

    fn recorder(api: &BazaarApi<MemBackend>) -> (Subscription, Arc<Mutex<Vec<ChangeEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let sub = api.subscribe(move |e: &ChangeEvent| -> std::result::Result<(), NotifyError> {
            sink.lock().push(e.clone());
            Ok(())
        });
        (sub, events)
    }

    #[test]
    fn mutations_notify_after_commit() {
        let api = make_api();
        let (_sub, events) = recorder(&api);

        api.add_product(product("Vase")).unwrap();
        api.update_product("Vase", product("Ceramic Vase")).unwrap();
        assert!(api.remove_product("Ceramic Vase").unwrap());
        api.save_profile(api.get_profile().unwrap()).unwrap();

        let events = events.lock();
        assert_eq!(
            *events,
            vec![
                ChangeEvent::product(ChangeKind::Added, "Vase"),
                ChangeEvent::product(ChangeKind::Updated, "Ceramic Vase"),
                ChangeEvent::product(ChangeKind::Removed, "Ceramic Vase"),
                ChangeEvent::profile(),
            ]
        );
        assert_eq!(events[3].collection, Collection::Profile);
    }

    #[test]
    fn failed_or_empty_operations_do_not_notify() {
        let api = make_api();
        let (_sub, events) = recorder(&api);

        assert!(!api.remove_product("Missing").unwrap());
        assert!(api.update_product("Missing", product("Missing")).is_err());
        api.add_product(product("Vase")).unwrap();
        assert!(matches!(
            api.add_product(product("Vase")),
            Err(BazaarError::DuplicateKey(_))
        ));

        assert_eq!(events.lock().len(), 1);
    }

    #[test]
    fn identical_update_does_not_notify() {
        let api = make_api();
        api.add_product(product("Vase")).unwrap();
        let (_sub, events) = recorder(&api);

        api.update_product("Vase", product("Vase")).unwrap();
        assert!(events.lock().is_empty());

        let mut input = product("Vase");
        input.stock += 1;
        api.update_product("Vase", input).unwrap();
        assert_eq!(
            *events.lock(),
            vec![ChangeEvent::product(ChangeKind::Updated, "Vase")]
        );
    }

    #[test]
    fn failing_listener_does_not_undo_write() {
        let api = make_api();
        let _sub = api.subscribe(|_: &ChangeEvent| -> std::result::Result<(), NotifyError> {
            Err(NotifyError("cache unreachable".into()))
        });

        let added = api.add_product(product("Vase")).unwrap();
        assert_eq!(api.get_product("Vase").unwrap(), added);
    }

    #[test]
    fn save_product_dispatches_on_original_name() {
        let api = make_api();
        api.save_product(product("Vase"), None).unwrap();
        let mut input = product("Vase");
        input.stock = 2;
        api.save_product(input, Some("Vase")).unwrap();
        assert_eq!(api.get_product("Vase").unwrap().stock, 2);
    }

    #[test]
    fn close_consumes_api() {
        let api = make_api();
        assert!(api.location().to_string_lossy().starts_with("memory://"));
        api.close().unwrap();
    }
}
