use crate::error::{BazaarError, Result};
use crate::model::Product;
use crate::store::{StorageBackend, StorageEngine};

pub fn run<B: StorageBackend>(store: &StorageEngine<B>, name: &str) -> Result<Product> {
    store
        .read(|doc| doc.product(name).cloned())?
        .ok_or_else(|| BazaarError::NotFound(name.to_string()))
}
