use super::{add, update};
use crate::error::Result;
use crate::model::{Product, ProductInput};
use crate::store::{StorageBackend, StorageEngine};

/// The product form's save: a new product when there is no original name, otherwise
/// an update of the product the form was opened for.
pub fn run<B: StorageBackend>(
    store: &StorageEngine<B>,
    input: ProductInput,
    original_name: Option<&str>,
) -> Result<Product> {
    match original_name {
        Some(original) => update::run(store, original, input).map(|u| u.product),
        None => add::run(store, input),
    }
}
