use crate::error::Result;
use crate::model::Profile;
use crate::store::{Mutation, StorageBackend, StorageEngine};
use tracing::info;

/// The seller profile. A fresh store returns the seeded default.
pub fn get<B: StorageBackend>(store: &StorageEngine<B>) -> Result<Profile> {
    store.read(|doc| doc.profile.clone())
}

/// Replace the profile as a whole. Fields the caller leaves out are gone afterwards;
/// merging with the previous profile is the caller's job. Keys the store does not
/// model are kept unless `profile` sets them itself.
pub fn save<B: StorageBackend>(store: &StorageEngine<B>, mut profile: Profile) -> Result<Profile> {
    let saved = store.transact(|doc| {
        for (key, value) in std::mem::take(&mut doc.profile.extra) {
            profile.extra.entry(key).or_insert(value);
        }
        doc.profile = profile;
        Ok(Mutation::Changed(doc.profile.clone()))
    })?;
    info!(name = %saved.name, "profile saved");
    Ok(saved)
}
