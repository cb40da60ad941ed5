//! 零件内存存储实现

use super::InMemoryInventory;
use crate::error::StorageError;
use crate::models::PartRecord;
use crate::traits::PartStore;
use crate::validation::ensure_non_empty;

#[async_trait::async_trait]
impl PartStore for InMemoryInventory {
    async fn create_part(&self, record: PartRecord) -> Result<PartRecord, StorageError> {
        ensure_non_empty("name", &record.name)?;
        let mut state = self.write()?;
        if state.parts.contains_key(&record.part_id) {
            return Err(StorageError::unique_violation("part exists"));
        }
        state.parts.insert(record.part_id.clone(), record.clone());
        Ok(record)
    }

    async fn find_part(&self, part_id: &str) -> Result<Option<PartRecord>, StorageError> {
        let state = self.read()?;
        Ok(state.parts.get(part_id).cloned())
    }
}
