//! File-backed storage backend.
//!
//! Persists the serialized tenant map as a single JSON file. Writes go to a
//! temporary sibling and are renamed into place, so readers and crash
//! recovery only ever see a complete map.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::StorageBackend;

/// Stores the tenant map in one file on local disk.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn load(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(bytes) => {
                debug!(path = ?self.path, size = bytes.len(), "tenant map read");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("failed to read tenant map file"),
        }
    }

    async fn store(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .context("failed to create data directory")?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, data)
            .await
            .context("failed to write tenant map temp file")?;
        fs::rename(&tmp, &self.path)
            .await
            .context("failed to replace tenant map file")?;

        debug!(path = ?self.path, size = data.len(), "tenant map written");
        Ok(())
    }
}
