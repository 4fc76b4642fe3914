use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use eyre::{Result, WrapErr, eyre};
use timetable_core::store::TimetableStorage;
use tokio::fs;

/// Stores each record as `<dir>/<key>.json`.
///
/// Writes go to a sibling temporary file first and are renamed into place,
/// so a crash mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(eyre!("Invalid storage key: {:?}", key));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl TimetableStorage for FileStorage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).wrap_err_with(|| format!("Failed to read {}", path.display())),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key)?;
        fs::create_dir_all(&self.dir)
            .await
            .wrap_err_with(|| format!("Failed to create {}", self.dir.display()))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .await
            .wrap_err_with(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .await
            .wrap_err_with(|| format!("Failed to replace {}", path.display()))?;

        tracing::debug!("Saved record: path={}, bytes={}", path.display(), value.len());
        Ok(())
    }
}
