//! In-memory implementation of DataService

use crate::core::service::{RecordChange, UniqueViolation};
use crate::core::{DataService, FieldValue, Record};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// In-memory record store
///
/// Records are kept in insertion order, which is the order list endpoints
/// fall back to when no sort field applies. Uses RwLock for thread-safe
/// access; clones share the same collection. Unique fields are checked
/// under the same write lock that performs the write.
#[derive(Clone)]
pub struct InMemoryDataService<T: Record> {
    records: Arc<RwLock<IndexMap<String, T>>>,
}

impl<T: Record> InMemoryDataService<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl<T: Record> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fail if a record other than `candidate` holds one of its unique values
fn check_unique<T: Record>(records: &IndexMap<String, T>, candidate: &T) -> Result<()> {
    let schema = T::schema();
    for &field in schema.unique {
        let Some(value) = candidate
            .field_value(field)
            .filter(|v| *v != FieldValue::Null)
        else {
            continue;
        };

        let taken = records.values().any(|other| {
            other.id() != candidate.id() && other.field_value(field).as_ref() == Some(&value)
        });
        if taken {
            return Err(UniqueViolation {
                entity_type: schema.entity_type,
                field,
            }
            .into());
        }
    }
    Ok(())
}

#[async_trait]
impl<T: Record> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, record: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if records.contains_key(record.id()) {
            bail!("{} '{}' already exists", T::schema().entity_type, record.id());
        }
        check_unique(&records, &record)?;
        records.insert(record.id().to_string(), record.clone());

        Ok(record)
    }

    async fn get(&self, id: &str) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.get(id).cloned())
    }

    async fn all_records(&self) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.values().cloned().collect())
    }

    async fn update(&self, id: &str, record: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !records.contains_key(id) {
            bail!("{} '{}' not found", T::schema().entity_type, id);
        }
        if record.id() != id {
            bail!("cannot change id '{}' to '{}'", id, record.id());
        }
        check_unique(&records, &record)?;
        records.insert(id.to_string(), record.clone());

        Ok(record)
    }

    async fn modify(&self, id: &str, change: RecordChange<T>) -> Result<Option<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(mut record) = records.get(id).cloned() else {
            return Ok(None);
        };
        change(&mut record);
        if record.id() != id {
            bail!("cannot change id '{}' to '{}'", id, record.id());
        }
        check_unique(&records, &record)?;
        records.insert(id.to_string(), record.clone());

        Ok(Some(record))
    }

    async fn delete(&self, id: &str) -> Result<Option<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        // shift keeps the remaining records in insertion order
        Ok(records.shift_remove(id))
    }

    async fn count(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.len())
    }

    async fn first(&self) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.first().map(|(_, record)| record.clone()))
    }
}
