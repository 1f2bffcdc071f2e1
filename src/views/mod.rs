//! Views rendered by the shell and the one-shot commands
//!
//! List views share one implementation, [`RecordList`], generic over the
//! record type and erased behind [`ListView`] so callers can pick a view
//! from a runtime [`Resource`].

use crate::api::{with_record, ApiClient, Record, Resource};
use crate::error::Result;
use crate::routes::Route;
use async_trait::async_trait;
use colored::Colorize;
use std::fmt::Write as _;

pub mod access;
pub mod csv;
pub mod home;
pub mod login;
pub mod query;
pub mod table;

pub use home::DashboardStats;
pub use login::LoginView;
pub use query::{ListQuery, Page};

/// A loaded list of one resource's records
#[async_trait]
pub trait ListView: Send + Sync {
    /// Resource shown by this view
    fn resource(&self) -> Resource;

    /// Reload every record from the backend
    async fn refresh(&mut self, api: &ApiClient) -> Result<()>;

    /// Number of loaded records, before search and filters
    fn len(&self) -> usize;

    /// Whether nothing is loaded
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Page count for `query`
    fn total_pages(&self, query: &ListQuery) -> usize;

    /// Heading, summary, table of the current page and footer
    fn render(&self, query: &ListQuery) -> String;

    /// CSV of every record matching `query`, across all pages
    fn to_csv(&self, query: &ListQuery) -> Result<String>;

    /// Detail table for one loaded record
    fn detail(&self, id: u64) -> Option<String>;
}

/// Records of type `T` as fetched from the backend
#[derive(Debug, Clone)]
pub struct RecordList<T> {
    records: Vec<T>,
}

impl<T: Record> RecordList<T> {
    /// Wrap already fetched records
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

#[async_trait]
impl<T: Record> ListView for RecordList<T> {
    fn resource(&self) -> Resource {
        T::RESOURCE
    }

    async fn refresh(&mut self, api: &ApiClient) -> Result<()> {
        self.records = api.list::<T>().await?;
        tracing::debug!("Loaded {} {}", self.records.len(), T::RESOURCE);
        Ok(())
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn total_pages(&self, query: &ListQuery) -> usize {
        query.paginate(&query.apply(&self.records)).total_pages
    }

    fn render(&self, query: &ListQuery) -> String {
        let matching = query.apply(&self.records);
        let page = query.paginate(&matching);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}  {}",
            Route::for_resource(T::RESOURCE).title().bold(),
            T::summary(&self.records).dimmed()
        );
        if let Some(line) = describe_query(query) {
            let _ = writeln!(out, "{}", line);
        }
        if page.items.is_empty() {
            let _ = writeln!(out, "{}", "No records found".yellow());
        } else {
            let _ = write!(out, "{}", table::records_table(&page.items));
        }
        let _ = write!(
            out,
            "{}  Page {} of {}",
            page.footer(),
            page.number,
            page.total_pages
        );
        out
    }

    fn to_csv(&self, query: &ListQuery) -> Result<String> {
        csv::to_csv(&query.apply(&self.records))
    }

    fn detail(&self, id: u64) -> Option<String> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .map(|r| table::detail_table(r).to_string())
    }
}

/// Empty list view for `resource`
pub fn list_view(resource: Resource) -> Box<dyn ListView> {
    with_record!(resource, R => Box::new(RecordList::<R>::default()) as Box<dyn ListView>)
}

fn describe_query(query: &ListQuery) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(search) = query.search() {
        parts.push(format!("search \"{}\"", search));
    }
    for (field, value) in query.filters() {
        parts.push(format!("{}={}", field, value));
    }
    (!parts.is_empty()).then(|| format!("Filtered by: {}", parts.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ReliefSupply;

    fn supplies() -> RecordList<ReliefSupply> {
        let records: Vec<ReliefSupply> = serde_json::from_str(
            r#"[
                {"id":1,"item_name":"Rice","category":"Food","quantity":50,"unit":"kg","location":"Gampaha","status":"available"},
                {"id":2,"item_name":"Tents","category":"Shelter","quantity":12,"unit":"pcs","location":"Kandy","status":"distributed"},
                {"id":3,"item_name":"Dhal","category":"Food","quantity":20,"unit":"kg","location":"Kandy","status":"available"}
            ]"#,
        )
        .unwrap();
        RecordList::new(records)
    }

    #[test]
    fn test_list_view_dispatches_by_resource() {
        for resource in Resource::ALL {
            let view = list_view(resource);
            assert_eq!(view.resource(), resource);
            assert!(view.is_empty());
        }
    }

    #[test]
    fn test_render_applies_query() {
        let view = supplies();
        let mut query = ListQuery::new(10);
        query.set_filter("category", "Food");
        let text = view.render(&query);
        assert!(text.contains("Relief Supplies"));
        assert!(text.contains("Rice"));
        assert!(text.contains("Dhal"));
        assert!(!text.contains("Tents"));
        assert!(text.contains("Filtered by: category=Food"));
        assert!(text.contains("Showing 1-2 of 2"));
    }

    #[test]
    fn test_render_empty_match() {
        let view = supplies();
        let mut query = ListQuery::new(10);
        query.set_search("blankets");
        let text = view.render(&query);
        assert!(text.contains("No records found"));
        assert!(text.contains("Showing 0-0 of 0"));
    }

    #[test]
    fn test_to_csv_uses_filtered_records_across_pages() {
        let view = supplies();
        let mut query = ListQuery::new(1);
        query.set_search("kandy");
        let csv = view.to_csv(&query).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert_eq!(view.total_pages(&query), 2);
    }

    #[test]
    fn test_detail_by_id() {
        let view = supplies();
        assert!(view.detail(2).unwrap().contains("Tents"));
        assert!(view.detail(99).is_none());
    }
}
