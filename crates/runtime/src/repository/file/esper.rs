//! File-based EsperRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use psychics_core::ConfigSection;
use uuid::Uuid;

use crate::repository::{EsperRepository, RepositoryError, Result};

/// File-based implementation of EsperRepository.
///
/// Stores one pretty-printed JSON file per entity, named `{uuid}.json`.
/// Writes go to a temp file first and are renamed into place, so a crash
/// never leaves a half-written record behind.
pub struct FileEsperRepository {
    base_dir: PathBuf,
}

impl FileEsperRepository {
    /// Create a new file-based esper repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a record file.
    pub fn record_path(&self, id: Uuid) -> PathBuf {
        self.base_dir.join(format!("{}.json", id))
    }

    /// Reads a record file from an arbitrary path.
    pub fn read_record(path: &Path) -> Result<ConfigSection> {
        let bytes = fs::read(path).map_err(RepositoryError::Io)?;
        serde_json::from_slice(&bytes).map_err(|e| RepositoryError::CorruptedData {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl EsperRepository for FileEsperRepository {
    fn save(&self, id: Uuid, record: &ConfigSection) -> Result<()> {
        let path = self.record_path(id);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved esper[{}] to {}", id, path.display());

        Ok(())
    }

    fn load(&self, id: Uuid) -> Result<Option<ConfigSection>> {
        let path = self.record_path(id);

        if !path.exists() {
            return Ok(None);
        }

        let record = Self::read_record(&path)?;
        tracing::debug!("Loaded esper[{}] from {}", id, path.display());

        Ok(Some(record))
    }

    fn exists(&self, id: Uuid) -> bool {
        self.record_path(id).exists()
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let path = self.record_path(id);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted esper[{}]", id);
        }

        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<Uuid>> {
        let mut ids = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(stem) = filename.strip_suffix(".json")
                && let Ok(id) = Uuid::parse_str(stem)
            {
                ids.push(id);
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}
