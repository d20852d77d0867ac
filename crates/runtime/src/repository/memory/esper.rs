//! In-memory EsperRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use psychics_core::ConfigSection;
use uuid::Uuid;

use crate::repository::{EsperRepository, RepositoryError, Result};

/// In-memory implementation of EsperRepository.
#[derive(Default)]
pub struct InMemoryEsperRepository {
    records: RwLock<BTreeMap<Uuid, ConfigSection>>,
}

impl InMemoryEsperRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a set of pre-existing records.
    pub fn with_records(records: impl IntoIterator<Item = (Uuid, ConfigSection)>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }
}

impl EsperRepository for InMemoryEsperRepository {
    fn save(&self, id: Uuid, record: &ConfigSection) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(id, record.clone());
        Ok(())
    }

    fn load(&self, id: Uuid) -> Result<Option<ConfigSection>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(&id).cloned())
    }

    fn exists(&self, id: Uuid) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(&id))
            .unwrap_or(false)
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.remove(&id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<Uuid>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.keys().copied().collect())
    }
}
