//! Client-side search, filtering and pagination for list views

use crate::api::Record;
use crate::cli::ListArgs;
use crate::error::{Result, ReliefError};

/// Filter value that disables a filter, as in the web client's dropdowns
const MATCH_ALL: &str = "all";

/// Search text, field filters and the current page of a list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    search: Option<String>,
    filters: Vec<(String, String)>,
    page: usize,
    page_size: usize,
}

impl ListQuery {
    /// Empty query on page 1
    pub fn new(page_size: usize) -> Self {
        Self {
            search: None,
            filters: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Build a query from command-line list flags
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::InvalidInput`] for a filter that is not
    /// `FIELD=VALUE`
    pub fn from_args(args: &ListArgs, page: usize, page_size: usize) -> Result<Self> {
        let mut query = Self::new(page_size);
        if let Some(search) = &args.search {
            query.set_search(search);
        }
        for filter in &args.filters {
            let (field, value) = parse_filter(filter)?;
            query.set_filter(field, value);
        }
        query.set_page(page);
        Ok(query)
    }

    /// Current search text
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Active field filters
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    /// Requested page (1-based, before clamping)
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the search text; blank text clears it. Resets to page 1.
    pub fn set_search(&mut self, text: &str) {
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
        self.page = 1;
    }

    /// Set or replace the filter on `field`; the value `all` removes it.
    /// Resets to page 1.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        self.filters.retain(|(existing, _)| *existing != field);
        if !value.eq_ignore_ascii_case(MATCH_ALL) {
            self.filters.push((field, value));
        }
        self.page = 1;
    }

    /// Drop search and filters and go back to page 1
    pub fn clear(&mut self) {
        self.search = None;
        self.filters.clear();
        self.page = 1;
    }

    /// Jump to a page; 0 is treated as 1
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Advance one page, stopping at `total_pages`
    pub fn next_page(&mut self, total_pages: usize) {
        self.page = self.page.saturating_add(1).min(total_pages.max(1));
    }

    /// Go back one page, stopping at 1
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Whether a record passes search and every filter
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        let search_ok = match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                record
                    .search_text()
                    .iter()
                    .any(|text| text.to_lowercase().contains(&term))
            }
        };
        search_ok
            && self
                .filters
                .iter()
                .all(|(field, value)| record.field(field).as_deref() == Some(value.as_str()))
    }

    /// Every matching record, in backend order
    pub fn apply<'a, T: Record>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    /// Slice the current page out of the matching records
    ///
    /// A page past the end is clamped to the last page.
    pub fn paginate<'a, T>(&self, matching: &[&'a T]) -> Page<'a, T> {
        let total = matching.len();
        let total_pages = total.div_ceil(self.page_size).max(1);
        let number = self.page.clamp(1, total_pages);
        let start = (number - 1) * self.page_size;
        let end = (start + self.page_size).min(total);
        Page {
            items: matching[start..end].to_vec(),
            number,
            total_pages,
            first: if total == 0 { 0 } else { start + 1 },
            last: end,
            total,
        }
    }
}

/// One page of matching records
#[derive(Debug, Clone)]
pub struct Page<'a, T> {
    /// Records on this page
    pub items: Vec<&'a T>,
    /// Page number after clamping (1-based)
    pub number: usize,
    /// Number of pages, at least 1
    pub total_pages: usize,
    /// 1-based position of the first item, 0 when empty
    pub first: usize,
    /// 1-based position of the last item
    pub last: usize,
    /// Number of matching records across all pages
    pub total: usize,
}

impl<T> Page<'_, T> {
    /// `Showing a-b of n`
    pub fn footer(&self) -> String {
        format!("Showing {}-{} of {}", self.first, self.last, self.total)
    }
}

/// Split a `FIELD=VALUE` filter
///
/// # Errors
///
/// Returns [`ReliefError::InvalidInput`] when `=` is missing or the field
/// name is empty
///
/// # Examples
///
/// ```
/// use reliefdesk::views::query::parse_filter;
///
/// let (field, value) = parse_filter("status=in-progress").unwrap();
/// assert_eq!(field, "status");
/// assert_eq!(value, "in-progress");
/// assert!(parse_filter("status").is_err());
/// ```
pub fn parse_filter(filter: &str) -> Result<(String, String)> {
    let (field, value) = filter.split_once('=').ok_or_else(|| {
        ReliefError::InvalidInput(format!("Filter must be FIELD=VALUE, got '{}'", filter))
    })?;
    let field = field.trim();
    if field.is_empty() {
        return Err(
            ReliefError::InvalidInput(format!("Filter has no field name: '{}'", filter)).into(),
        );
    }
    Ok((field.to_string(), value.trim().to_string()))
}
