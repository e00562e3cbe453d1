//! Field value types used by filtering and ordering

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// A polymorphic field value read from a record
///
/// Records expose their fields through [`Record::field_value`](crate::core::Record::field_value)
/// so that the filter and order layers can work on any entity type without
/// knowing its concrete struct.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    /// A categorical value; `ordinal` is its declaration position
    Enum {
        value: &'static str,
        ordinal: usize,
    },
    Null,
}

impl FieldValue {
    /// Get the textual form of the value, if it has one
    ///
    /// Both free text and enumerated values are textual.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            FieldValue::Enum { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Case-insensitive substring test
    ///
    /// `needle` must already be lowercased. Non-textual values never match.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.as_string()
            .is_some_and(|s| s.to_lowercase().contains(needle))
    }

    /// Natural ordering of two values
    ///
    /// Text is lexicographic, timestamps chronological, enums follow their
    /// declaration order. `Null` sorts before everything else, and values of
    /// different kinds are ordered by kind so the result is always total.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            (FieldValue::Enum { ordinal: a, .. }, FieldValue::Enum { ordinal: b, .. }) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Boolean(_) => 1,
            FieldValue::Integer(_) => 2,
            FieldValue::Enum { .. } => 3,
            FieldValue::DateTime(_) => 4,
            FieldValue::String(_) => 5,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}
