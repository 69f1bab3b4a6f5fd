//! Result table types.
//!
//! A result table holds the rows of the most recent search, in the order the
//! service returned them. It is rebuilt wholesale on every successful search.

use std::fmt::Write as _;

/// Column definition for a result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Field key the column is filled from.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
}

impl TableColumn {
    /// Create a new column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// The rendered result set of a search.
///
/// The default table has no columns, meaning nothing is displayed. A search
/// that returned no rows still displays its header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    columns: Vec<TableColumn>,
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Create an empty table with a header.
    #[must_use]
    pub const fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty, extra cells are dropped.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    /// Whether a table is displayed at all.
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        !self.columns.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `key` in row `index`.
    #[must_use]
    pub fn cell(&self, index: usize, key: &str) -> Option<&str> {
        let column = self.columns.iter().position(|c| c.key == key)?;
        self.rows.get(index)?.get(column).map(String::as_str)
    }

    /// Render as aligned plain text, one line per row after the header.
    #[must_use]
    pub fn render_text(&self) -> String {
        if !self.is_displayed() {
            return String::new();
        }

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.label.chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let mut out = String::new();
        let header = self.columns.iter().map(|c| c.label.as_str());
        write_line(&mut out, header, &widths);
        for row in &self.rows {
            write_line(&mut out, row.iter().map(String::as_str), &widths);
        }
        out
    }
}

fn write_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ResultTable {
        ResultTable::new(vec![
            TableColumn::new("id", "ID"),
            TableColumn::new("name", "Name"),
        ])
    }

    #[test]
    fn test_default_table_is_not_displayed() {
        let table = ResultTable::default();
        assert!(!table.is_displayed());
        assert_eq!(table.render_text(), "");
    }

    #[test]
    fn test_rows_keep_insertion_order() {
        let mut table = table();
        table.push_row(vec!["2".to_string(), "Second".to_string()]);
        table.push_row(vec!["1".to_string(), "First".to_string()]);

        assert_eq!(table.cell(0, "id"), Some("2"));
        assert_eq!(table.cell(1, "name"), Some("First"));
        assert_eq!(table.cell(2, "id"), None);
        assert_eq!(table.cell(0, "price"), None);
    }

    #[test]
    fn test_push_row_pads_to_column_count() {
        let mut table = table();
        table.push_row(vec!["7".to_string()]);
        assert_eq!(table.cell(0, "name"), Some(""));
    }

    #[test]
    fn test_render_text_aligns_columns() {
        let mut table = table();
        table.push_row(vec!["10".to_string(), "Birthday".to_string()]);
        table.push_row(vec!["7".to_string(), "Xmas".to_string()]);

        assert_eq!(table.render_text(), "ID  Name\n10  Birthday\n7   Xmas\n");
    }

    #[test]
    fn test_header_only_table_renders_header() {
        assert_eq!(table().render_text(), "ID  Name\n");
    }
}
