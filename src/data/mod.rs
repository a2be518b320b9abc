//! Tabular result data consumed by the grid widgets.
//!
//! The toolkit does not talk to a database; the host materializes query
//! results into a [`DataTable`] (named columns, rows of [`Value`]s) and hands
//! it to a [`GridView`](crate::widget::GridView). The distinguished
//! [`Value::Null`] marker is not the same as an empty string; the grid
//! decides how to render it.

/// A single cell value in a result set.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Real(f64),
    /// Text value.
    Text(String),
    /// Raw binary value.
    Blob(Vec<u8>),
}

impl Value {
    /// Check whether this is the null marker.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl std::fmt::Display for Value {
    /// The grid's string form of a value. Null displays as empty here;
    /// the grid substitutes its own null text depending on mode.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Blob(v) => write!(f, "<blob {} bytes>", v.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

/// A named result-set column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column caption shown in the grid header.
    pub name: String,
}

impl Column {
    /// Create a column with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An in-memory tabular result set: ordered columns, ordered rows.
///
/// Rows are arrays of [`Value`]s aligned to the columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl DataTable {
    /// Create an empty table with the given columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Convenience: create a table from column names.
    pub fn with_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Column::new).collect())
    }

    /// Append a row.
    ///
    /// # Panics
    /// Panics if the row length does not match the column count; mismatched
    /// rows are a host bug, caught at the boundary.
    pub fn push_row(&mut self, row: Vec<Value>) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row length must match column count"
        );
        self.rows.push(row);
    }

    /// Number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a column definition by index.
    #[inline]
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Get the value at `(row, col)`.
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Text("abc".into()).to_string(), "abc");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Blob(vec![1, 2, 3]).to_string(), "<blob 3 bytes>");
    }

    #[test]
    fn test_null_distinct_from_empty_text() {
        assert!(Value::Null.is_null());
        assert!(!Value::Text(String::new()).is_null());
        assert_ne!(Value::Null, Value::Text(String::new()));
    }

    #[test]
    fn test_table_push_and_read() {
        let mut table = DataTable::with_columns(["id", "name"]);
        table.push_row(vec![Value::Integer(1), Value::from("ada")]);
        table.push_row(vec![Value::Integer(2), Value::Null]);

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column(1).unwrap().name, "name");
        assert_eq!(table.value(0, 1), Some(&Value::from("ada")));
        assert!(table.value(1, 1).unwrap().is_null());
        assert_eq!(table.value(2, 0), None);
    }

    #[test]
    #[should_panic(expected = "row length")]
    fn test_table_rejects_misaligned_row() {
        let mut table = DataTable::with_columns(["a", "b"]);
        table.push_row(vec![Value::Integer(1)]);
    }
}
