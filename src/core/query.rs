//! The list operation: filter, order, paginate
//!
//! Every list endpoint goes through [`list`]. Request structs describe their
//! criteria, ordering and page through [`ListQuery`]; the records come from
//! a snapshot of the store.

use crate::config::PaginationConfig;
use crate::core::entity::Record;
use crate::core::filter::Criteria;
use crate::core::order::{FieldOrder, apply_order};
use crate::core::pagination::{PageSpec, paginate};
use crate::core::response::PaginatedResponse;

/// A typed list request
pub trait ListQuery {
    /// Filter criteria derived from the request
    fn criteria(&self) -> Criteria;

    /// Requested sort field and direction
    fn sort(&self) -> (&str, &str);

    /// Requested page (unclamped); `default_page_size` fills a missing size
    fn page(&self, default_page_size: i64) -> PageSpec;
}

/// One page of matching records
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult<T> {
    pub items: Vec<T>,

    /// Number of matching records before pagination
    pub total: usize,

    /// Effective (clamped) page
    pub page: i64,

    /// Effective (clamped) page size
    pub page_size: i64,
}

impl<T> ListResult<T> {
    /// Convert the items and wrap them in a paginated envelope
    pub fn into_response<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse::new(
            self.items.into_iter().map(f).collect(),
            self.total,
            self.page,
            self.page_size,
        )
    }
}

/// Filter, order and paginate `records`
pub fn list<T: Record>(
    records: Vec<T>,
    criteria: &Criteria,
    order: Option<FieldOrder>,
    page: PageSpec,
    max_page_size: i64,
) -> ListResult<T> {
    let matching = apply_order(criteria.apply(records), order);
    let page = page.clamped(max_page_size);
    let (slice, total) = paginate(&matching, page, max_page_size);

    ListResult {
        items: slice.to_vec(),
        total,
        page: page.page,
        page_size: page.page_size,
    }
}

/// Run a typed list request over `records`
pub fn run_query<T: Record, Q: ListQuery>(
    records: Vec<T>,
    query: &Q,
    limits: &PaginationConfig,
) -> ListResult<T> {
    let (sort_by, sort_order) = query.sort();
    list(
        records,
        &query.criteria(),
        FieldOrder::resolve::<T>(sort_by, sort_order),
        query.page(limits.default_page_size),
        limits.max_page_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{Note, notes};
    use crate::core::pagination::MAX_PAGE_SIZE;

    struct NoteQuery {
        kind: Option<String>,
        search: Option<String>,
        sort_by: String,
        sort_order: String,
        page: i64,
        page_size: Option<i64>,
    }

    impl Default for NoteQuery {
        fn default() -> Self {
            Self {
                kind: None,
                search: None,
                sort_by: "createdAt".into(),
                sort_order: "desc".into(),
                page: 1,
                page_size: None,
            }
        }
    }

    impl ListQuery for NoteQuery {
        fn criteria(&self) -> Criteria {
            Criteria::new()
                .search(self.search.as_deref())
                .exact("kind", self.kind.as_deref())
        }

        fn sort(&self) -> (&str, &str) {
            (&self.sort_by, &self.sort_order)
        }

        fn page(&self, default_page_size: i64) -> PageSpec {
            PageSpec::new(self.page, self.page_size.unwrap_or(default_page_size))
        }
    }

    #[test]
    fn test_filtered_pages_report_filtered_total() {
        let records = notes();
        assert_eq!(records.len(), 12);

        let done = Criteria::new().exact("kind", Some("done"));

        let first = list(records.clone(), &done, None, PageSpec::new(1, 2), MAX_PAGE_SIZE);
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.total, 3);
        assert!(first.items.iter().all(|n| n.kind == "done"));

        let second = list(records, &done, None, PageSpec::new(2, 2), MAX_PAGE_SIZE);
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.total, 3);
    }

    #[test]
    fn test_search_bug_over_ten_records() {
        let mut records: Vec<Note> = (1..=10)
            .map(|i| Note::new(&format!("n{i}"), &format!("Task {i}"), Some("routine work"), "todo"))
            .collect();
        records[2].title = "Bug fix".into();
        records[7].body = Some("Reproduce the BUG reported by QA".into());

        let result = list(
            records,
            &Criteria::new().search(Some("bug")),
            None,
            PageSpec::default(),
            MAX_PAGE_SIZE,
        );

        let ids: Vec<&str> = result.items.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n3", "n8"]);
        assert_eq!(result.total, 2);
    }

    #[test]
    fn test_result_echoes_clamped_page() {
        let result = list(notes(), &Criteria::new(), None, PageSpec::new(0, 1000), MAX_PAGE_SIZE);
        assert_eq!(result.page, 1);
        assert_eq!(result.page_size, 100);
        assert_eq!(result.items.len(), 12);
    }

    #[test]
    fn test_run_query_orders_newest_first() {
        let result = run_query(notes(), &NoteQuery::default(), &PaginationConfig::default());
        assert_eq!(result.items.len(), 10);
        for pair in result.items.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn test_run_query_unknown_sort_keeps_store_order() {
        let query = NoteQuery {
            sort_by: "bogus".into(),
            page_size: Some(100),
            ..Default::default()
        };
        let result = run_query(notes(), &query, &PaginationConfig::default());
        assert_eq!(result.items, notes());
    }

    #[test]
    fn test_run_query_combines_search_and_kind() {
        let query = NoteQuery {
            kind: Some("done".into()),
            search: Some("BODY".into()),
            ..Default::default()
        };
        let result = run_query(notes(), &query, &PaginationConfig::default());
        // done notes are 4, 8, 12; all have even numbers and therefore a body
        assert_eq!(result.total, 3);
    }

    #[test]
    fn test_run_query_uses_configured_default_size() {
        let limits = PaginationConfig {
            default_page_size: 4,
            max_page_size: 6,
        };
        let result = run_query(notes(), &NoteQuery::default(), &limits);
        assert_eq!(result.items.len(), 4);

        let query = NoteQuery {
            page_size: Some(50),
            ..Default::default()
        };
        let result = run_query(notes(), &query, &limits);
        assert_eq!(result.items.len(), 6);
        assert_eq!(result.page_size, 6);
    }

    #[test]
    fn test_into_response_maps_items() {
        let result = list(notes(), &Criteria::new(), None, PageSpec::new(2, 5), MAX_PAGE_SIZE);
        let response = result.into_response(|n| n.id);
        assert_eq!(response.data, vec!["note-06", "note-07", "note-08", "note-09", "note-10"]);
        assert_eq!(response.total, 12);
        assert_eq!(response.page, 2);
        assert_eq!(response.page_size, 5);
    }
}
