//! Page bounds over a filtered, ordered collection

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on the page size unless configured otherwise
pub const MAX_PAGE_SIZE: i64 = 100;

/// A requested page, 1-based
///
/// Values are taken as received; [`PageSpec::clamped`] brings them into
/// range. Out of range input is never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageSpec {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Clamp page to at least 1 and page size to `[1, max_page_size]`
    pub fn clamped(self, max_page_size: i64) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, max_page_size.max(1)),
        }
    }

    /// Offset of the first item on this page (assumes a clamped spec)
    pub fn offset(&self) -> usize {
        let skipped = (self.page.max(1) - 1).saturating_mul(self.page_size.max(1));
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }
}

/// Slice one page out of `items`
///
/// Returns the page and the total number of items. The input is neither
/// mutated nor reordered; pages past the end are empty.
pub fn paginate<T>(items: &[T], spec: PageSpec, max_page_size: i64) -> (&[T], usize) {
    let spec = spec.clamped(max_page_size);
    let total = items.len();
    let start = spec.offset().min(total);
    let size = usize::try_from(spec.page_size).unwrap_or(1);
    let end = start.saturating_add(size).min(total);
    (&items[start..end], total)
}
