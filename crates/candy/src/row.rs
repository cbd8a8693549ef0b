//! Result rows and pagination over fetched result sets.

use crate::value::Value;

/// One result row: an ordered column→value mapping.
///
/// Column order is whatever the driver returned; lookups by name scan the
/// (small) column list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from ordered column→value pairs.
    pub fn from_pairs<I, S, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        Self {
            columns: pairs
                .into_iter()
                .map(|(col, val)| (col.into(), val.into()))
                .collect(),
        }
    }

    /// Look up a column by name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(col, _)| col == column)
            .map(|(_, val)| val)
    }

    /// Iterate columns in driver order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(col, val)| (col.as_str(), val))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Chunk an already-fetched result set into pages of `per_page` rows.
///
/// The final page holds the remainder. `per_page == 0` yields no pages.
pub fn paginate(rows: &[Row], per_page: usize) -> Vec<Vec<Row>> {
    if per_page == 0 {
        return Vec::new();
    }
    rows.chunks(per_page).map(<[Row]>::to_vec).collect()
}
