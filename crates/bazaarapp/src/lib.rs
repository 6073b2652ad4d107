//! # Bazaar Architecture
//!
//! Bazaar is the durable core of an artisan storefront: the product catalog and the
//! seller profile, kept in **one JSON document** on disk. It is a library first; the
//! `bazaar` binary is one thin client of it, and an HTTP layer would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store, dispatches to commands                   │
//! │  - Signals committed changes to subscribers (notify.rs)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Typed accessors: list, get, add, update, remove, profile │
//! │  - Key uniqueness, store-assigned dates, validation         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageEngine: lock → load → mutate → save → unlock      │
//! │  - FsBackend (atomic file replace), MemBackend (testing)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: The Document Is the Only State
//!
//! No layer caches the document. Every operation re-reads it inside the engine's
//! critical section and writes it back before releasing the lock, so writes are
//! totally ordered and a caller that awaited its write will see it on the next read.
//!
//! The lock is per document location and per process. Sharing one file between
//! processes is not supported.
//!
//! ## Errors
//!
//! Every operation returns [`error::Result`]. Storage failures (`Io`, `Corruption`)
//! are propagated as-is, with no retry and no silent reset to defaults. Domain failures
//! (`NotFound`, `DuplicateKey`, `Validation`) leave the document untouched.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: The typed collection accessors
//! - [`store`]: Storage engine and backends
//! - [`model`]: `Product`, `Profile`, `Document` and the seed catalog
//! - [`notify`]: Change events and listeners
//! - [`config`]: Configuration loading
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod store;

pub use api::BazaarApi;
pub use error::{BazaarError, Result};
