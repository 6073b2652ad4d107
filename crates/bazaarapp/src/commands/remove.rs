use crate::error::Result;
use crate::store::{Mutation, StorageBackend, StorageEngine};
use tracing::info;

/// Remove the product called `name`. Returns whether anything was removed; an absent
/// product is reported as `false`, not an error, and the document is not rewritten.
pub fn run<B: StorageBackend>(store: &StorageEngine<B>, name: &str) -> Result<bool> {
    let removed = store.transact(|doc| {
        let before = doc.products.len();
        doc.products.retain(|p| p.name != name);
        if doc.products.len() < before {
            Ok(Mutation::Changed(true))
        } else {
            Ok(Mutation::Unchanged(false))
        }
    })?;

    if removed {
        info!(name = %name, "product removed");
    }
    Ok(removed)
}
