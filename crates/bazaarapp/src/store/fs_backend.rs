use super::backend::StorageBackend;
use crate::error::{BazaarError, Result};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Stores the document as a single JSON file.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "db.json".to_string())
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| BazaarError::io(path, e))?;
        }
        Ok(())
    }

    fn write_tmp(tmp_path: &Path, content: &[u8]) -> std::io::Result<()> {
        let mut file = File::create(tmp_path)?;
        file.write_all(content)?;
        file.sync_all()
    }
}

impl StorageBackend for FsBackend {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            // A blank file is a document that was never written.
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BazaarError::io(&self.path, e)),
        }
    }

    fn write(&self, content: &[u8]) -> Result<()> {
        let dir = self.parent_dir();
        self.ensure_dir(&dir)?;

        // Atomic Write
        let tmp_path = dir.join(format!(".{}-{}.tmp", self.file_name(), Uuid::new_v4()));
        let written = Self::write_tmp(&tmp_path, content)
            .and_then(|_| fs::rename(&tmp_path, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(BazaarError::io(&self.path, e));
        }

        // Make the rename itself durable. Not every platform can open a directory.
        #[cfg(unix)]
        if let Err(e) = File::open(&dir).and_then(|d| d.sync_all()) {
            debug!(dir = %dir.display(), error = %e, "directory sync failed");
        }

        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
