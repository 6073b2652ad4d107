//! # Configuration
//!
//! Bazaar configuration is managed by [`confique`], which handles layered loading
//! from a TOML file and environment variables.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `BAZAAR_DATA_FILE`, `BAZAAR_SEED`.
//! 2. **Config file**: the path given with `--config`, otherwise `bazaar.toml` in the
//!    OS-appropriate config directory (via the `directories` crate) if it exists.
//! 3. **Compiled defaults**.
//!
//! Command-line flags (e.g. `--data`) are applied on top by the CLI.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_file` | `<data dir>/db.json` | Location of the JSON document |
//! | `seed` | `true` | Start a new document with the storefront catalog instead of no products |

use confique::Config;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{BazaarError, Result};
use crate::model::Document;

const APP_NAME: &str = "bazaar";

/// Configuration for bazaar, stored in `bazaar.toml`.
#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BazaarConfig {
    /// Location of the JSON document. Defaults to `db.json` in the user data dir.
    #[config(env = "BAZAAR_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Seed a newly created document with the storefront catalog.
    #[config(env = "BAZAAR_SEED", default = true)]
    pub seed: bool,
}

impl Default for BazaarConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            seed: true,
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| BazaarError::Config("Could not determine a home directory".to_string()))
}

impl BazaarConfig {
    /// Load from the environment and a config file. An explicitly named file must
    /// exist; the default one is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file = match config_file {
            Some(path) if !path.exists() => {
                return Err(BazaarError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )))
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_config_file().filter(|p| p.exists()),
        };

        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| BazaarError::Config(e.to_string()))
    }

    pub fn default_config_file() -> Option<PathBuf> {
        project_dirs()
            .ok()
            .map(|dirs| dirs.config_dir().join(format!("{}.toml", APP_NAME)))
    }

    /// The document location: configured, or `db.json` in the user data directory.
    pub fn data_file(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("db.json")),
        }
    }

    /// The document a brand-new store is initialized with.
    pub fn seed_document(&self) -> Result<Document> {
        if self.seed {
            Document::seed()
        } else {
            Document::empty()
        }
    }
}
