//! Filter predicate builder
//!
//! Translates optional request criteria into a predicate over records.
//! Absent or empty criteria are never applied; all active criteria are
//! combined with AND, and the free-text search term is matched against the
//! entity's searchable fields with OR.
//!
//! # Example
//!
//! ```rust,ignore
//! let criteria = Criteria::new()
//!     .exact("status", Some("done"))
//!     .exact("label", None)        // ignored
//!     .search(Some("bug"));        // title OR description OR id
//!
//! let matching: Vec<Task> = criteria.apply(all_tasks);
//! ```

use crate::core::entity::Record;

/// How a criterion compares its value against a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-sensitive equality
    Exact,
    /// Case-insensitive substring
    Contains,
}

/// A single (field, match mode, value) condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub field: String,
    pub mode: MatchMode,
    /// Stored lowercased for `Contains`
    pub value: String,
}

impl Criterion {
    /// Case-sensitive equality criterion
    pub fn exact(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            mode: MatchMode::Exact,
            value: value.into(),
        }
    }

    /// Case-insensitive substring criterion
    pub fn contains(field: impl Into<String>, value: impl AsRef<str>) -> Self {
        Self {
            field: field.into(),
            mode: MatchMode::Contains,
            value: value.as_ref().to_lowercase(),
        }
    }

    /// Check a record against this criterion
    ///
    /// Fields the record does not expose, and null fields, never match.
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        let Some(field_value) = record.field_value(&self.field) else {
            return false;
        };

        match self.mode {
            MatchMode::Exact => field_value.as_string() == Some(self.value.as_str()),
            MatchMode::Contains => field_value.contains_lowercase(&self.value),
        }
    }
}

/// A set of active criteria plus an optional free-text search term
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    criteria: Vec<Criterion>,
    search: Option<String>,
}

impl Criteria {
    /// Create an empty set (accepts every record)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact-match criterion when a non-empty value is present
    pub fn exact(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = non_empty(value) {
            self.criteria.push(Criterion::exact(field, value));
        }
        self
    }

    /// Add a single-field substring criterion when a non-empty value is present
    pub fn contains(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = non_empty(value) {
            self.criteria.push(Criterion::contains(field, value));
        }
        self
    }

    /// Set the free-text search term
    ///
    /// The term is matched against every searchable field of the record's
    /// schema; a record matches if any of those fields contains it.
    pub fn search(mut self, term: Option<&str>) -> Self {
        self.search = non_empty(term).map(str::to_lowercase);
        self
    }

    /// Whether no criterion is active
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty() && self.search.is_none()
    }

    /// The active field criteria (search excluded)
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Check a record against all active criteria
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        let search_ok = self.search.as_deref().is_none_or(|term| {
            T::schema().searchable.iter().any(|field| {
                record
                    .field_value(field)
                    .is_some_and(|v| v.contains_lowercase(term))
            })
        });

        search_ok && self.criteria.iter().all(|c| c.matches(record))
    }

    /// Build a reusable predicate borrowing these criteria
    pub fn predicate<T: Record>(&self) -> impl Fn(&T) -> bool + '_ {
        move |record| self.matches(record)
    }

    /// Keep the matching records, preserving their relative order
    pub fn apply<T: Record>(&self, mut records: Vec<T>) -> Vec<T> {
        if !self.is_empty() {
            records.retain(self.predicate());
        }
        records
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
