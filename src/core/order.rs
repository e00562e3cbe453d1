//! Order resolver
//!
//! Maps a requested sort field and direction onto a comparator over records.
//! Unknown fields resolve to "no ordering", which keeps whatever order the
//! collection already has.

use crate::core::entity::Record;
use crate::core::field::FieldValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a direction string
    ///
    /// Case-insensitive; anything other than `desc` is ascending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// A resolved ordering on one schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOrder {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl FieldOrder {
    /// Resolve a field name and direction against `T`'s schema
    ///
    /// Returns `None` when the field is empty or not part of the schema.
    pub fn resolve<T: Record>(field: &str, direction: &str) -> Option<Self> {
        let field = T::schema().field(field)?;
        Some(Self {
            field,
            direction: SortDirection::parse(direction),
        })
    }

    /// Compare two records on the resolved field
    pub fn compare<T: Record>(&self, a: &T, b: &T) -> Ordering {
        self.compare_values(&self.key(a), &self.key(b))
    }

    /// Stable sort of `records` on the resolved field
    pub fn sort<T: Record>(&self, records: Vec<T>) -> Vec<T> {
        // extract each key once instead of on every comparison
        let mut keyed: Vec<(FieldValue, T)> =
            records.into_iter().map(|r| (self.key(&r), r)).collect();
        keyed.sort_by(|(a, _), (b, _)| self.compare_values(a, b));
        keyed.into_iter().map(|(_, r)| r).collect()
    }

    fn key<T: Record>(&self, record: &T) -> FieldValue {
        record.field_value(self.field).unwrap_or(FieldValue::Null)
    }

    fn compare_values(&self, a: &FieldValue, b: &FieldValue) -> Ordering {
        let ordering = a.natural_cmp(b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Apply an optional ordering; `None` leaves the input untouched
pub fn apply_order<T: Record>(records: Vec<T>, order: Option<FieldOrder>) -> Vec<T> {
    match order {
        Some(order) => order.sort(records),
        None => records,
    }
}
