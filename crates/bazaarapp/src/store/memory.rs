use super::engine::StorageEngine;
use super::mem_backend::MemBackend;
use crate::error::Result;
use crate::model::Document;

pub type InMemoryStore = StorageEngine<MemBackend>;

impl InMemoryStore {
    /// A fresh store seeded with the storefront catalog.
    pub fn seeded() -> Result<Self> {
        StorageEngine::open(MemBackend::new(), Document::seed()?)
    }

    /// A fresh store with no products.
    pub fn empty() -> Result<Self> {
        StorageEngine::open(MemBackend::new(), Document::empty()?)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::commands::add;
    use crate::model::{ProductInput, ProductStatus};

    pub fn product(name: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: format!("Handmade {}", name.to_lowercase()),
            status: ProductStatus::Active,
            price: "₹500".to_string(),
            stock: 10,
            image: format!("https://picsum.photos/seed/{}/800/800", name.len()),
            ai_hint: "handmade".to_string(),
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::empty().unwrap(),
            }
        }

        pub fn seeded() -> Self {
            Self {
                store: InMemoryStore::seeded().unwrap(),
            }
        }

        pub fn with_products(self, names: &[&str]) -> Self {
            for name in names {
                add::run(&self.store, product(name)).unwrap();
            }
            self
        }

        pub fn with_status(self, name: &str, status: ProductStatus) -> Self {
            let mut input = product(name);
            input.status = status;
            add::run(&self.store, input).unwrap();
            self
        }
    }
}
