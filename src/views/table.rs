//! Terminal tables for records

use crate::api::Record;
use prettytable::{format, Cell, Row, Table};

/// Table with one row per record and `T::COLUMNS` as the header
pub fn records_table<T: Record>(records: &[&T]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(
        T::COLUMNS.iter().map(|c| Cell::new(c).style_spec("b")).collect(),
    ));
    for record in records {
        table.add_row(Row::new(
            record.cells().iter().map(|c| Cell::new(c)).collect(),
        ));
    }
    table
}

/// Two-column field/value table for a single record
pub fn detail_table<T: Record>(record: &T) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    for (column, value) in T::COLUMNS.iter().zip(record.cells()) {
        table.add_row(Row::new(vec![
            Cell::new(column).style_spec("b"),
            Cell::new(&value),
        ]));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Volunteer;

    fn volunteer() -> Volunteer {
        serde_json::from_str(
            r#"{"id":5,"name":"Dilani","email":"d@example.org","phone":"0712","skills":"First aid","availability":"available"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_records_table_has_header_and_rows() {
        let v = volunteer();
        let table = records_table(&[&v]);
        assert_eq!(table.len(), 1);
        let rendered = table.to_string();
        assert!(rendered.contains("Availability"));
        assert!(rendered.contains("Dilani"));
    }

    #[test]
    fn test_detail_table_has_one_row_per_column() {
        let v = volunteer();
        let table = detail_table(&v);
        assert_eq!(table.len(), Volunteer::COLUMNS.len());
        assert!(table.to_string().contains("First aid"));
    }
}
