//! # Command Layer
//!
//! Each accessor operation lives in its own submodule as a plain function over a
//! [`StorageEngine`](crate::store::StorageEngine). Commands hold no state between calls:
//! every operation re-reads the document, works on it, and (if it changed anything)
//! writes it back, all inside one critical section.
//!
//! ## Role and Responsibilities
//!
//! Commands are where the catalog rules live:
//! - Product names are unique keys, checked inside the same critical section as the
//!   insert or rename, so two concurrent adds of one name cannot both succeed.
//! - Creation dates are assigned by the store clock, never taken from the caller.
//! - `update` keeps the original creation date and handles renames.
//! - Input validation runs before the store is touched.
//!
//! ## What Commands Do NOT Do
//!
//! - **Notification**: the API facade signals changes after a command succeeded.
//! - **Any terminal I/O**: results are Rust values, errors are [`BazaarError`](crate::error::BazaarError).
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` and `StoreFixture` and cover every rule and
//! failure kind. Filesystem behavior is covered by the integration tests.
//!
//! ## Command Modules
//!
//! - [`list`]: Products sorted newest first, optionally filtered
//! - [`get`]: One product by name
//! - [`add`]: Insert a new product
//! - [`update`]: Replace a product's fields, possibly renaming it
//! - [`remove`]: Delete a product (reports whether anything was removed)
//! - [`save`]: Add-or-update, as the seller dashboard's product form does
//! - [`profile`]: Read and replace the seller profile

pub mod add;
pub mod get;
pub mod list;
pub mod profile;
pub mod remove;
pub mod save;
pub mod update;
