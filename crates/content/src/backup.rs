//! Local file backup of saved settings.
//!
//! Recovery only: nothing here is read back into a live store.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::backend::BackupSink;
use crate::error::SyncError;

/// Writes each key to `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBackup {
    dir: PathBuf,
}

impl FileBackup {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read a backed-up value, `None` if nothing was written yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn read(&self, key: &str) -> Result<Option<Value>, SyncError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl BackupSink for FileBackup {
    /// Write through a temp file and rename, so readers never see a torn file.
    async fn write_backup(&self, key: &str, value: &Value) -> Result<(), SyncError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        let bytes = serde_json::to_vec_pretty(value)?;

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(path = %path.display(), "Backup written");
        Ok(())
    }
}
