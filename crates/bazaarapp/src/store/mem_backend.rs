use super::backend::StorageBackend;
use crate::error::{BazaarError, Result};
use parking_lot::Mutex;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

/// In-memory storage backend for testing.
///
/// Holds the encoded document exactly as the file backend would write it, so the
/// engine's parse/encode path is exercised the same way.
pub struct MemBackend {
    id: Uuid,
    content: Mutex<Option<Vec<u8>>>,
    writes: AtomicUsize,
    simulate_read_error: AtomicBool,
    simulate_write_error: AtomicBool,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            content: Mutex::new(None),
            writes: AtomicUsize::new(0),
            simulate_read_error: AtomicBool::new(false),
            simulate_write_error: AtomicBool::new(false),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with pre-existing raw content (e.g. a hand-edited or damaged document).
    pub fn with_content(content: impl Into<Vec<u8>>) -> Self {
        let backend = Self::default();
        *backend.content.lock() = Some(content.into());
        backend
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    /// Enable write error simulation. A failed write leaves the content untouched,
    /// like an interrupted atomic replace.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The raw stored bytes.
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.content.lock().clone()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(BazaarError::io(
                self.location(),
                io::Error::new(io::ErrorKind::PermissionDenied, "Simulated read error"),
            ));
        }
        Ok(self.content.lock().clone())
    }

    fn write(&self, content: &[u8]) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(BazaarError::io(
                self.location(),
                io::Error::new(io::ErrorKind::Other, "Simulated write error"),
            ));
        }
        *self.content.lock() = Some(content.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(format!("memory://db-{}.json", self.id))
    }
}
