use super::backend::StorageBackend;
use crate::error::{BazaarError, Result};
use crate::model::Document;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use tracing::{debug, info};

/// One lock per document location, shared by every engine in the process that
/// points at the same file.
static DOCUMENT_LOCKS: Lazy<Mutex<HashMap<PathBuf, Weak<Mutex<()>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn lock_key(location: &Path) -> PathBuf {
    let absolute = if location.is_absolute() {
        location.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(location))
            .unwrap_or_else(|_| location.to_path_buf())
    };
    let (Some(parent), Some(name)) = (absolute.parent(), absolute.file_name()) else {
        return absolute;
    };

    // Resolve the deepest directory that exists now and append the rest, so the key
    // does not change once the first save creates the missing directories.
    let mut missing = vec![name.to_os_string()];
    let mut dir = parent;
    loop {
        if let Ok(resolved) = dir.canonicalize() {
            return missing.iter().rev().fold(resolved, |key, part| key.join(part));
        }
        match (dir.parent(), dir.file_name()) {
            (Some(up), Some(part)) => {
                missing.push(part.to_os_string());
                dir = up;
            }
            _ => return absolute,
        }
    }
}

fn lock_for(location: &Path) -> Arc<Mutex<()>> {
    let key = lock_key(location);
    let mut locks = DOCUMENT_LOCKS.lock();
    if let Some(lock) = locks.get(&key).and_then(Weak::upgrade) {
        return lock;
    }
    locks.retain(|_, weak| weak.strong_count() > 0);
    let lock = Arc::new(Mutex::new(()));
    locks.insert(key, Arc::downgrade(&lock));
    lock
}

/// What a critical section did to the document.
pub enum Mutation<T> {
    /// The document was modified and must be persisted.
    Changed(T),
    /// Nothing to write back.
    Unchanged(T),
}

/// The storage engine: owns the document location and serializes every
/// load-mutate-save sequence against it.
pub struct StorageEngine<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    seed: Document,
    lock: Arc<Mutex<()>>,
}

impl<B: StorageBackend> StorageEngine<B> {
    /// Open the store. A missing document is initialized with `seed` right away and a
    /// corrupt one is reported here rather than on the first request.
    pub fn open(backend: B, seed: Document) -> Result<Self> {
        let lock = lock_for(&backend.location());
        let engine = Self {
            backend,
            seed,
            lock,
        };
        let doc = engine.load()?;
        info!(
            location = %engine.location().display(),
            products = doc.products.len(),
            "store opened"
        );
        Ok(engine)
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current persisted document, initializing the location on first use.
    pub fn load(&self) -> Result<Document> {
        let _guard = self.lock.lock();
        self.load_unlocked()
    }

    /// Replace the persisted document.
    pub fn save(&self, doc: &Document) -> Result<()> {
        let _guard = self.lock.lock();
        self.save_unlocked(doc)
    }

    /// Run a read-only projection over the current document.
    pub fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Document) -> T,
    {
        let _guard = self.lock.lock();
        let doc = self.load_unlocked()?;
        Ok(f(&doc))
    }

    /// The critical section: load, hand the document to `f`, persist if `f` changed it.
    /// The lock is held for the whole sequence and released on every exit path.
    /// If `f` fails nothing is written.
    pub fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<Mutation<T>>,
    {
        let _guard = self.lock.lock();
        let mut doc = self.load_unlocked()?;
        match f(&mut doc)? {
            Mutation::Changed(value) => {
                self.save_unlocked(&doc)?;
                Ok(value)
            }
            Mutation::Unchanged(value) => Ok(value),
        }
    }

    /// Shut the store down. Every operation is durable when it returns, so there is
    /// nothing left to flush; waiting on the lock lets an in-flight writer on a
    /// shared location finish first.
    pub fn close(self) -> Result<()> {
        let _guard = self.lock.lock();
        debug!(location = %self.location().display(), "store closed");
        Ok(())
    }

    fn load_unlocked(&self) -> Result<Document> {
        match self.backend.read()? {
            None => {
                debug!(location = %self.location().display(), "initializing document");
                self.save_unlocked(&self.seed)?;
                Ok(self.seed.clone())
            }
            Some(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| BazaarError::Corruption {
                    path: self.location(),
                    source,
                })
            }
        }
    }

    fn save_unlocked(&self, doc: &Document) -> Result<()> {
        let mut bytes =
            serde_json::to_vec_pretty(doc).map_err(|source| BazaarError::Corruption {
                path: self.location(),
                source,
            })?;
        bytes.push(b'\n');
        self.backend.write(&bytes)?;
        debug!(
            location = %self.location().display(),
            bytes = bytes.len(),
            "document saved"
        );
        Ok(())
    }
}
