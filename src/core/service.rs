//! Record store trait

use crate::core::entity::Record;
use crate::core::filter::Criterion;
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

/// A write refused because it would repeat a unique field value
///
/// Stores return it inside their `anyhow::Error`; handlers see it as a
/// duplicate entity error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity_type} {field} already exists")]
pub struct UniqueViolation {
    pub entity_type: &'static str,
    pub field: &'static str,
}

/// In-place change applied by [`DataService::modify`]
pub type RecordChange<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Service trait for storing records of one entity type
///
/// Implementations provide CRUD operations and a full snapshot of the
/// collection; listing, filtering and paging happen on that snapshot.
/// The trait is agnostic to the underlying storage mechanism, but every
/// write must honour the schema's unique fields atomically with the write
/// itself, failing with [`UniqueViolation`].
#[async_trait]
pub trait DataService<T: Record>: Send + Sync {
    /// Insert a new record; fails if the id or a unique value is taken
    async fn create(&self, record: T) -> Result<T>;

    /// Get a record by id
    async fn get(&self, id: &str) -> Result<Option<T>>;

    /// Snapshot of every record, in insertion order
    async fn all_records(&self) -> Result<Vec<T>>;

    /// Replace an existing record; fails if the id is unknown
    async fn update(&self, id: &str, record: T) -> Result<T>;

    /// Apply `change` to the stored record as one atomic step
    ///
    /// Concurrent modifications of the same record never overwrite each
    /// other. Returns `None` when no record has this id.
    async fn modify(&self, id: &str, change: RecordChange<T>) -> Result<Option<T>>;

    /// Remove a record, returning it if it existed
    async fn delete(&self, id: &str) -> Result<Option<T>>;

    /// Number of stored records
    async fn count(&self) -> Result<usize> {
        Ok(self.all_records().await?.len())
    }

    /// The earliest inserted record
    async fn first(&self) -> Result<Option<T>> {
        Ok(self.all_records().await?.into_iter().next())
    }

    /// The first record whose field equals `value` exactly
    async fn find_first(&self, field: &str, value: &str) -> Result<Option<T>> {
        let criterion = Criterion::exact(field, value);
        Ok(self
            .all_records()
            .await?
            .into_iter()
            .find(|record| criterion.matches(record)))
    }

    /// Whether a record with this id exists
    async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }
}
