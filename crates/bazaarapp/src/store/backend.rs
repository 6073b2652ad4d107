use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw document I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while StorageEngine handles the "what" (parsing, seeding, locking).
pub trait StorageBackend: Send + Sync {
    /// Read the raw document bytes.
    /// Returns Ok(None) if no document has been stored yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored document.
    /// MUST be atomic (e.g. write to tmp then rename): a concurrent reader sees the
    /// old bytes or the new bytes, never a mix, and a failed write leaves the old
    /// bytes in place.
    fn write(&self, content: &[u8]) -> Result<()>;

    /// Where the document lives.
    /// For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
