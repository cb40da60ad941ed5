//! 分类标签内存存储实现

use super::InMemoryInventory;
use crate::error::StorageError;
use crate::models::CategoryRecord;
use crate::traits::CategoryStore;
use crate::validation::ensure_non_empty;
use std::collections::HashSet;

#[async_trait::async_trait]
impl CategoryStore for InMemoryInventory {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, StorageError> {
        let state = self.read()?;
        let mut items: Vec<CategoryRecord> = state.categories.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn ensure_category(
        &self,
        candidate_id: &str,
        name: &str,
    ) -> Result<CategoryRecord, StorageError> {
        ensure_non_empty("name", name)?;
        let mut state = self.write()?;
        if let Some(existing) = state.categories.values().find(|item| item.name == name) {
            return Ok(existing.clone());
        }
        let record = CategoryRecord {
            category_id: candidate_id.to_string(),
            name: name.to_string(),
        };
        state
            .categories
            .insert(record.category_id.clone(), record.clone());
        Ok(record)
    }

    async fn assign_category(&self, part_id: &str, category_id: &str) -> Result<(), StorageError> {
        let mut state = self.write()?;
        if !state.parts.contains_key(part_id) {
            return Err(StorageError::foreign_key_violation("part does not exist"));
        }
        if !state.categories.contains_key(category_id) {
            return Err(StorageError::foreign_key_violation("category does not exist"));
        }
        state
            .part_categories
            .insert((part_id.to_string(), category_id.to_string()));
        Ok(())
    }

    async fn remove_category(
        &self,
        part_id: &str,
        category_id: &str,
    ) -> Result<bool, StorageError> {
        let mut state = self.write()?;
        Ok(state
            .part_categories
            .remove(&(part_id.to_string(), category_id.to_string())))
    }

    async fn list_part_categories(
        &self,
        part_id: &str,
    ) -> Result<Vec<CategoryRecord>, StorageError> {
        let state = self.read()?;
        let mut items: Vec<CategoryRecord> = state
            .part_categories
            .iter()
            .filter(|(part, _)| part == part_id)
            .filter_map(|(_, category_id)| state.categories.get(category_id).cloned())
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn cleanup_orphaned_categories(&self) -> Result<u64, StorageError> {
        let mut state = self.write()?;
        let assigned: HashSet<String> = state
            .part_categories
            .iter()
            .map(|(_, category_id)| category_id.clone())
            .collect();
        let before = state.categories.len();
        state
            .categories
            .retain(|category_id, _| assigned.contains(category_id));
        Ok((before - state.categories.len()) as u64)
    }
}
