//! Table types.

use serde::{Deserialize, Serialize};

/// A structured table supplied alongside an answer.
///
/// Answers reference tables through `[TABLE:<title>]` placeholders; the
/// placeholder is resolved against `title` by exact string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    /// Table title, also the placeholder lookup key
    pub title: String,

    /// Column headers
    #[serde(default)]
    pub headers: Vec<String>,

    /// Body rows. Rows are not required to match the header length.
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Create a new empty table with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Set the column headers and return self.
    pub fn with_headers<S: Into<String>>(mut self, headers: impl IntoIterator<Item = S>) -> Self {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Add a row from text values.
    pub fn add_row<S: Into<String>>(&mut self, values: impl IntoIterator<Item = S>) {
        self.rows.push(values.into_iter().map(Into::into).collect());
    }

    /// Add a row and return self.
    pub fn with_row<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.add_row(values);
        self
    }

    /// Get the number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (widest of the header and every row).
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// Check if the table has neither headers nor rows.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        let mut lines = vec![self.title.clone()];
        if !self.headers.is_empty() {
            lines.push(self.headers.join("\t"));
        }
        lines.extend(self.rows.iter().map(|row| row.join("\t")));
        lines.join("\n")
    }
}

/// Parse a table dataset from JSON (an array of `{title, headers, rows}`).
pub fn tables_from_json(json: &str) -> crate::Result<Vec<TableData>> {
    Ok(serde_json::from_str(json)?)
}

/// A resolved table placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    /// The dataset entry the placeholder resolved to
    pub table: TableData,

    /// Whether the placeholder was preceded by a dash run
    pub rule_before: bool,

    /// Whether the placeholder was followed by a dash run
    pub rule_after: bool,
}

impl TableBlock {
    /// Create a table block without surrounding rules.
    pub fn new(table: TableData) -> Self {
        Self {
            table,
            rule_before: false,
            rule_after: false,
        }
    }

    /// Set the surrounding rule flags and return self.
    pub fn with_rules(mut self, before: bool, after: bool) -> Self {
        self.rule_before = before;
        self.rule_after = after;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = TableData::new("Empty");
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_table_with_data() {
        let table = TableData::new("People")
            .with_headers(["Name", "Age"])
            .with_row(["Alice", "30"])
            .with_row(["Bob", "25", "extra"]);

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_table_plain_text() {
        let table = TableData::new("T").with_headers(["A", "B"]).with_row(["1", "2"]);
        assert_eq!(table.plain_text(), "T\nA\tB\n1\t2");
    }

    #[test]
    fn test_tables_from_json() {
        let json = r#"[{"title": "Employee Information", "headers": ["Name"], "rows": [["Ann"]]}, {"title": "Bare"}]"#;
        let tables = tables_from_json(json).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows, vec![vec!["Ann".to_string()]]);
        assert!(tables[1].is_empty());
    }

    #[test]
    fn test_tables_from_invalid_json() {
        let result = tables_from_json("{\"title\": 1}");
        assert!(matches!(result, Err(crate::Error::InvalidTables(_))));
    }
}
