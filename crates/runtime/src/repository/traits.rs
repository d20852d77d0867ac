//! Repository contract for saving and loading esper records.

use psychics_core::ConfigSection;
use uuid::Uuid;

use super::Result;

/// Storage for esper records, indexed by entity id.
///
/// One record per entity: saving replaces whatever was stored before.
pub trait EsperRepository: Send + Sync {
    /// Save the record for `id`
    fn save(&self, id: Uuid, record: &ConfigSection) -> Result<()>;

    /// Load the record for `id`, if one was saved
    fn load(&self, id: Uuid) -> Result<Option<ConfigSection>>;

    /// Check if a record exists
    fn exists(&self, id: Uuid) -> bool;

    /// Delete a record. Missing records are not an error.
    fn delete(&self, id: Uuid) -> Result<()>;

    /// List all stored ids in ascending order
    fn list_ids(&self) -> Result<Vec<Uuid>>;
}
