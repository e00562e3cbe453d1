//! # Mocker
//!
//! A mock admin API for users and tasks, built on a small generic list
//! engine.
//!
//! ## Features
//!
//! - **Generic querying**: any [`Record`](core::Record) can be searched,
//!   filtered by exact field values, ordered by field and paginated
//! - **Uniform envelopes**: every response carries `code`, `message` and
//!   `success`; list responses add `total`, `page` and `pageSize`
//! - **Typed requests**: bodies are decoded and validated before handlers run
//! - **In-memory storage**: records live behind the
//!   [`DataService`](core::DataService) trait
//! - **Sample data**: six users and ten tasks seeded at startup
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mocker::prelude::*;
//!
//! let state = AppState::new(AppConfig::default())?;
//! seed(&state).await?;
//!
//! ServerBuilder::mock_api(state).serve("0.0.0.0:8000").await?;
//! ```
//!
//! ## Listing records
//!
//! ```rust,ignore
//! let criteria = Criteria::new()
//!     .search(Some("bug"))
//!     .exact("status", Some("todo"));
//! let order = FieldOrder::resolve::<Task>("createdAt", "desc");
//! let page = list(tasks, &criteria, order, PageSpec::new(1, 10), MAX_PAGE_SIZE);
//! ```

pub mod agent;
pub mod config;
pub mod core;
pub mod entities;
pub mod seed;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiResponse, Criteria, Criterion, DataService, EntitySchema, FieldOrder, FieldValue,
        ListQuery, ListResult, MAX_PAGE_SIZE, MockerError, MockerResult, PageSpec,
        PaginatedResponse, Record, Report, SortDirection, ValidatedJson, list, run_query,
    };

    // === Entities ===
    pub use crate::entities::{
        Task, TaskLabel, TaskPriority, TaskStatus, User, UserRole, UserStatus,
    };

    // === Macros ===
    pub use crate::{impl_record, string_enum};

    // === Server ===
    pub use crate::config::AppConfig;
    pub use crate::seed::seed;
    pub use crate::server::{AppState, CurrentUser, ServerBuilder};
    pub use crate::storage::InMemoryDataService;

    // === Agent ===
    pub use crate::agent::CodingAgent;
}
