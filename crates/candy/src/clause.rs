//! Field, where-clause, and limit declarations consumed by the builder.
//!
//! These are plain data: the builder stores them as given and only interprets
//! them during `build()`. Iteration order is always insertion order.

use crate::value::Value;

/// Column declarations for a statement.
///
/// SELECT takes an ordered column list, where [`FieldSpec::WILDCARD`] means
/// "all columns"; INSERT and UPDATE take column→value pairs. Neither form is
/// validated against the action at declaration time; a mismatch surfaces only
/// during `build()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// Ordered column names (SELECT).
    Columns(Vec<String>),
    /// Column→value pairs in insertion order (INSERT, UPDATE).
    Values(Vec<(String, Value)>),
}

impl FieldSpec {
    /// The "all columns" marker.
    pub const WILDCARD: &'static str = "*";

    /// Build a column-list spec.
    pub fn columns<I, S>(cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldSpec::Columns(cols.into_iter().map(Into::into).collect())
    }

    /// Build a column→value spec.
    pub fn values<I, S, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        FieldSpec::Values(
            pairs
                .into_iter()
                .map(|(col, val)| (col.into(), val.into()))
                .collect(),
        )
    }

    /// Whether the spec holds no entries.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldSpec::Columns(cols) => cols.is_empty(),
            FieldSpec::Values(pairs) => pairs.is_empty(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for FieldSpec {
    fn from(cols: [&str; N]) -> Self {
        FieldSpec::columns(cols)
    }
}

impl From<Vec<&str>> for FieldSpec {
    fn from(cols: Vec<&str>) -> Self {
        FieldSpec::columns(cols)
    }
}

impl From<Vec<String>> for FieldSpec {
    fn from(cols: Vec<String>) -> Self {
        FieldSpec::Columns(cols)
    }
}

impl<V: Into<Value>, const N: usize> From<[(&str, V); N]> for FieldSpec {
    fn from(pairs: [(&str, V); N]) -> Self {
        FieldSpec::values(pairs)
    }
}

impl<V: Into<Value>> From<Vec<(&str, V)>> for FieldSpec {
    fn from(pairs: Vec<(&str, V)>) -> Self {
        FieldSpec::values(pairs)
    }
}

/// Boolean joiner between consecutive where-clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    And,
    Or,
}

impl Joiner {
    /// The SQL keyword for this joiner.
    pub fn as_str(self) -> &'static str {
        match self {
            Joiner::And => "AND",
            Joiner::Or => "OR",
        }
    }
}

/// One condition on a column: a comparator, a value, and an optional joiner
/// to the next clause.
///
/// Entries missing either the value or the comparator are skipped during
/// compilation rather than rejected. A joiner on the last rendered entry is
/// emitted trailing; redundant, but not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    /// Right-hand value, bound as `:where<col>`.
    pub value: Option<Value>,
    /// Comparator rendered verbatim (`=`, `<`, `LIKE`, ...).
    pub comparator: Option<String>,
    /// Joiner to the next clause, if any.
    pub joiner: Option<Joiner>,
}

impl Condition {
    /// Create a complete condition from a comparator and value.
    pub fn new(comparator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            comparator: Some(comparator.into()),
            joiner: None,
        }
    }

    /// Shorthand for the `=` comparator.
    pub fn eq(value: impl Into<Value>) -> Self {
        Self::new("=", value)
    }

    /// Join to the next clause with `AND`.
    pub fn and(mut self) -> Self {
        self.joiner = Some(Joiner::And);
        self
    }

    /// Join to the next clause with `OR`.
    pub fn or(mut self) -> Self {
        self.joiner = Some(Joiner::Or);
        self
    }

    /// Whether both the value and the comparator are present.
    pub fn is_complete(&self) -> bool {
        self.value.is_some() && self.comparator.is_some()
    }
}

/// Insertion-ordered set of `(column, Condition)` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    entries: Vec<(String, Condition)>,
}

impl WhereClause {
    /// Create an empty clause set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a condition on `column`, returning the clause set for chaining.
    pub fn push(mut self, column: impl Into<String>, condition: Condition) -> Self {
        self.entries.push((column.into(), condition));
        self
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, Condition)> {
        self.entries.iter()
    }

    /// Whether no entries were declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of declared entries, complete or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<const N: usize> From<[(&str, Condition); N]> for WhereClause {
    fn from(entries: [(&str, Condition); N]) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(col, cond)| (col.to_string(), cond))
                .collect(),
        }
    }
}

impl From<Vec<(&str, Condition)>> for WhereClause {
    fn from(entries: Vec<(&str, Condition)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(col, cond)| (col.to_string(), cond))
                .collect(),
        }
    }
}

/// LIMIT with an optional offset.
///
/// The offset defaults to 0 and is rendered only when non-zero:
/// `LIMIT max` / `LIMIT max, offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub max: u64,
    pub offset: u64,
}

impl Limit {
    /// Limit to `max` rows with no offset.
    pub fn new(max: u64) -> Self {
        Self { max, offset: 0 }
    }

    /// Set the offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_spec_preserves_insertion_order() {
        let spec = FieldSpec::from([("name", "Yonas"), ("email", "y@x.com")]);
        let FieldSpec::Values(pairs) = spec else {
            panic!("expected value pairs");
        };
        assert_eq!(pairs[0].0, "name");
        assert_eq!(pairs[1].0, "email");
    }

    #[test]
    fn condition_completeness() {
        assert!(Condition::eq("x").is_complete());
        assert!(!Condition::default().is_complete());
        let no_comparator = Condition {
            value: Some(Value::from(1i64)),
            ..Default::default()
        };
        assert!(!no_comparator.is_complete());
    }

    #[test]
    fn where_clause_chains_in_order() {
        let clause = WhereClause::new()
            .push("a", Condition::eq(1i64).and())
            .push("b", Condition::eq(2i64));
        let cols: Vec<&str> = clause.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(cols, ["a", "b"]);
    }

    #[test]
    fn limit_defaults_to_zero_offset() {
        assert_eq!(Limit::new(5).offset, 0);
        assert_eq!(Limit::new(5).offset(10).offset, 10);
    }
}
