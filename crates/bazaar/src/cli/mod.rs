//! # CLI Behavior
//!
//! This is **one possible UI client** for bazaar, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ### Naked Execution (`bazaar`)
//!
//! Running `bazaar` with no arguments lists the catalog, like `bazaar products list`.
//!
//! ### Editing Products
//!
//! `bazaar products update <name>` takes the same field flags as `add`, all optional.
//! Fields left out keep their stored value: the handler loads the product, applies
//! the flags, and hands the complete record to the API.
//!
//! ### Machine-Readable Output
//!
//! `--json` switches every command to JSON on stdout using the same field names as
//! the document on disk.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Entry point; config, logging and store wiring, dispatch
//! - `handlers`: Per-command handlers that call the API and render output
//! - `render`: Output formatting (tables, detail views, messages)
//! - `styles`: Terminal styles

mod commands;
mod handlers;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
