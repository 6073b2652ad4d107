//! # Storage Layer
//!
//! This module owns the single persisted [`Document`](crate::model::Document).
//! Everything that touches the document's location goes through a [`StorageEngine`].
//!
//! ## Engine and Backends
//!
//! The layer is split in two:
//! 1. **Backend** ([`StorageBackend`]): raw bytes in, raw bytes out. Knows *where* the
//!    document lives and how to replace it atomically.
//! 2. **Engine** ([`StorageEngine`]): parses and encodes the document, seeds a missing
//!    location, and runs every load-mutate-save sequence under one lock.
//!
//! ## Load Semantics
//!
//! - Nothing stored yet (missing or blank file) → write the seed document, return it.
//! - Stored but unreadable → `BazaarError::Io`. The engine never falls back to the
//!   seed once a document is known to exist.
//! - Readable but not a valid document → `BazaarError::Corruption`. The damaged
//!   content is left as-is for the operator to inspect.
//!
//! ## Save Semantics
//!
//! The whole document is rewritten on every save. [`fs_backend::FsBackend`] writes a
//! uniquely named temporary sibling, syncs it and renames it over the target, so a
//! reader sees the old document or the new one and an interrupted save leaves the
//! old one intact.
//!
//! ## Locking
//!
//! One `parking_lot::Mutex` per document location, shared by all engines in the
//! process that open the same path. Only in-process writers are serialized: two
//! processes writing the same file is not supported.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production store backed by one JSON file.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── db.json                 # The document
//! └── .db.json-{uuid}.tmp     # Transient, only while a save is in flight
//! ```

pub mod backend;
pub mod engine;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

pub use backend::StorageBackend;
pub use engine::{Mutation, StorageEngine};
