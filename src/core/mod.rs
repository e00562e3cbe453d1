//! Core module containing the generic record, query and response machinery

pub mod auth;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod field;
pub mod filter;
pub mod order;
pub mod pagination;
pub mod query;
pub mod response;
pub mod service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use auth::{Claims, PasswordHasher, TokenIssuer};
pub use entity::{EntitySchema, Record};
pub use error::{MockerError, MockerResult};
pub use extractors::{BearerToken, ValidatedJson};
pub use field::FieldValue;
pub use filter::{Criteria, Criterion, MatchMode};
pub use order::{FieldOrder, SortDirection, apply_order};
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageSpec, paginate};
pub use query::{ListQuery, ListResult, list, run_query};
pub use response::{ApiResponse, Envelope, PaginatedResponse, Report};
pub use service::{DataService, RecordChange, UniqueViolation};
