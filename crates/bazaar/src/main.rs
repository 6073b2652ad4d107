//! # Bazaar CLI Architecture
//!
//! Bazaar ships with a command-line client for managing the storefront catalog, but
//! the binary is intentionally thin: the CLI lives in `src/cli/`, while this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/bazaarapp/`: core library with the storage engine, the collection
//!   accessors and change notification
//! - `crates/bazaar/`: this CLI, a client of `bazaarapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/bazaar/src/cli/)                         │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config, logging and store wiring (commands.rs)           │
//! │  - Per-command handlers (handlers.rs)                       │
//! │  - Terminal rendering with console styles (render.rs)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/bazaarapp/src/api.rs)                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI is responsible for
//! argument parsing, context initialization, dispatch, error reporting and
//! rendering, and for nothing else: a rule such as "product names are unique" is
//! never checked here.
//!
//! ## Testing Approach
//!
//! - **Handlers** are tested against an in-memory store, asserting on the rendered
//!   output.
//! - **End-to-end** tests (`tests/cli_e2e.rs`) run the real binary against a
//!   document in a temporary directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
