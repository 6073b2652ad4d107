use super::engine::StorageEngine;
use super::fs_backend::FsBackend;
use crate::error::Result;
use crate::model::Document;
use std::path::PathBuf;

pub type FileStore = StorageEngine<FsBackend>;

impl FileStore {
    /// Open (and if needed initialize) the document at `path`.
    pub fn open_path(path: impl Into<PathBuf>, seed: Document) -> Result<Self> {
        StorageEngine::open(FsBackend::new(path), seed)
    }
}
