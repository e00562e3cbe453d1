//! Record trait and schema description shared by all entity types

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};

/// Static description of an entity type
///
/// The filter and order layers are generic over records; the schema tells
/// them which fields exist, which ones take part in free-text search and
/// which ones hold enumerated values.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    /// Singular type name (e.g. "user")
    pub entity_type: &'static str,

    /// Plural resource name (e.g. "users")
    pub plural: &'static str,

    /// Every field that can be read through `field_value`, in wire naming
    pub fields: &'static [&'static str],

    /// Fields matched by the free-text search term
    pub searchable: &'static [&'static str],

    /// Fields holding enumerated values
    pub enum_fields: &'static [&'static str],

    /// Fields whose non-null values may appear on at most one record
    ///
    /// Stores enforce this on every write, in the listed order.
    pub unique: &'static [&'static str],
}

impl EntitySchema {
    /// Resolve a field name against the schema
    ///
    /// Returns the schema's own `'static` name so callers can keep it.
    pub fn field(&self, name: &str) -> Option<&'static str> {
        self.fields.iter().copied().find(|f| *f == name)
    }

    /// Whether a field holds enumerated values
    pub fn is_enum(&self, name: &str) -> bool {
        self.enum_fields.contains(&name)
    }
}

/// Base trait for every stored entity
///
/// A record has a stable unique identifier, creation and update timestamps,
/// and dynamic field access by wire name.
pub trait Record: Clone + Send + Sync + 'static {
    /// Schema describing this entity type
    fn schema() -> &'static EntitySchema;

    /// Get the unique identifier for this record
    fn id(&self) -> &str;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the value of a specific field by name
    ///
    /// Returns `None` for names that are not part of the schema.
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Refresh the update timestamp
    fn touch(&mut self);
}
