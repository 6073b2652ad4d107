use crate::error::{BazaarError, Result};
use crate::model::{Product, ProductInput};
use crate::store::{Mutation, StorageBackend, StorageEngine};
use tracing::{debug, info};

/// The stored product after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Updated {
    pub product: Product,
    /// False when the input matched the stored record and nothing was written.
    pub changed: bool,
}

/// Replace the fields of the product keyed by `original_name` with `input`.
///
/// The record keeps its position, its creation date and any fields the store does
/// not model. If `input.name` differs, the product is renamed, which fails with
/// `DuplicateKey` when another product already uses the new name. Renaming to the
/// same name is a plain update.
pub fn run<B: StorageBackend>(
    store: &StorageEngine<B>,
    original_name: &str,
    input: ProductInput,
) -> Result<Updated> {
    input.validate()?;

    let updated = store.transact(|doc| {
        let index = doc
            .position(original_name)
            .ok_or_else(|| BazaarError::NotFound(original_name.to_string()))?;

        if input.name != original_name && doc.position(&input.name).is_some() {
            return Err(BazaarError::DuplicateKey(input.name));
        }

        let current = &doc.products[index];
        let mut product = Product::from_input(input, current.date);
        product.extra = current.extra.clone();
        if *current == product {
            return Ok(Mutation::Unchanged(Updated {
                product,
                changed: false,
            }));
        }
        doc.products[index] = product.clone();
        Ok(Mutation::Changed(Updated {
            product,
            changed: true,
        }))
    })?;

    if !updated.changed {
        debug!(name = %updated.product.name, "product unchanged");
    } else if updated.product.name != original_name {
        info!(from = original_name, to = %updated.product.name, "product renamed");
    } else {
        info!(name = %updated.product.name, "product updated");
    }
    Ok(updated)
}
