//! CSV export of list views
//!
//! The header row is plain; every data cell is wrapped in double quotes
//! with embedded quotes doubled. Rows are joined with `\n`.

use crate::api::{Record, Resource};
use crate::error::{Result, ReliefError};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Render records as CSV
///
/// # Errors
///
/// Returns [`ReliefError::Export`] with `No data to export` when
/// `records` is empty
///
/// # Examples
///
/// ```
/// use reliefdesk::api::HelpRequest;
/// use reliefdesk::views::csv::to_csv;
///
/// let records: Vec<&HelpRequest> = Vec::new();
/// assert!(to_csv(&records).is_err());
/// ```
pub fn to_csv<T: Record>(records: &[&T]) -> Result<String> {
    if records.is_empty() {
        return Err(ReliefError::Export("No data to export".to_string()).into());
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(T::COLUMNS.join(","));
    for record in records {
        let row: Vec<String> = record.cells().iter().map(|c| quote(c)).collect();
        lines.push(row.join(","));
    }
    Ok(lines.join("\n"))
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// `<resource>-<YYYY-MM-DD>.csv`
pub fn default_filename(resource: Resource, date: NaiveDate) -> PathBuf {
    PathBuf::from(format!("{}-{}.csv", resource.segment(), date.format("%Y-%m-%d")))
}

/// Write CSV content to `path`
pub async fn write_csv(path: &Path, content: &str) -> Result<()> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| ReliefError::Export(format!("Failed to write {}: {}", path.display(), e)))?;
    tracing::info!(
        "Exported {} rows to {}",
        content.lines().count().saturating_sub(1),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HelpRequest;

    fn request(id: u64, description: &str) -> HelpRequest {
        HelpRequest {
            id,
            name: "Nimal".to_string(),
            phone: "0771234567".to_string(),
            location: "Kelaniya".to_string(),
            description: description.to_string(),
            priority: "high".to_string(),
            status: "pending".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_to_csv_quotes_every_cell() {
        let a = request(1, "Roof, second floor");
        let b = request(2, "");
        let csv = to_csv(&[&a, &b]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "ID,Name,Phone,Location,Description,Priority,Status");
        assert_eq!(
            lines[1],
            r#""1","Nimal","0771234567","Kelaniya","Roof, second floor","high","pending""#
        );
        assert_eq!(
            lines[2],
            r#""2","Nimal","0771234567","Kelaniya","","high","pending""#
        );
    }

    #[test]
    fn test_to_csv_doubles_embedded_quotes() {
        let a = request(1, r#"Needs "urgent" insulin"#);
        let csv = to_csv(&[&a]).unwrap();
        assert!(csv.contains(r#""Needs ""urgent"" insulin""#));
    }

    #[test]
    fn test_to_csv_empty_is_error() {
        let records: Vec<&HelpRequest> = Vec::new();
        let err = to_csv(&records).unwrap_err();
        assert_eq!(err.to_string(), "Export error: No data to export");
    }

    #[test]
    fn test_default_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
        assert_eq!(
            default_filename(Resource::HelpRequests, date),
            PathBuf::from("help-requests-2025-11-30.csv")
        );
    }

    #[tokio::test]
    async fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, "ID\n\"1\"").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ID\n\"1\"");
    }
}
