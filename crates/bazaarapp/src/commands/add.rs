use crate::error::{BazaarError, Result};
use crate::model::{store_clock, Product, ProductInput};
use crate::store::{Mutation, StorageBackend, StorageEngine};
use tracing::info;

/// Insert a new product at the front of the collection. The creation date comes from
/// the store clock, read inside the critical section.
pub fn run<B: StorageBackend>(store: &StorageEngine<B>, input: ProductInput) -> Result<Product> {
    input.validate()?;

    let product = store.transact(|doc| {
        if doc.position(&input.name).is_some() {
            return Err(BazaarError::DuplicateKey(input.name));
        }
        let product = Product::from_input(input, store_clock());
        doc.products.insert(0, product.clone());
        Ok(Mutation::Changed(product))
    })?;

    info!(name = %product.name, "product added");
    Ok(product)
}
