//! The statement builder: accumulates declarations, compiles them into a
//! parameterized query plus named bind parameters, and drives the prepared
//! statement through the connection.
//!
//! Configuration setters consume and return the builder, so a statement is
//! assembled as a value. `build()` is the single compile step: it renders the
//! where/limit fragments, composes the per-action template, prepares the SQL
//! on the connection, and binds every accumulated parameter.

use crate::action::Action;
use crate::clause::{FieldSpec, Limit, WhereClause};
use crate::client::{Connection, Statement};
use crate::error::{CandyError, CandyResult, ErrorInfo};
use crate::row::{Row, paginate};
use crate::value::Value;
use tracing::{debug, trace};

/// A named bind parameter accumulated during compilation.
///
/// The placeholder includes the leading `:` and matches the compiled SQL text
/// exactly (`:<col>` for field params, `:where<col>` for where params).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindParam {
    pub placeholder: String,
    pub value: Value,
}

/// Create a builder bound to `conn` for one `action`.
pub fn builder<C: Connection>(conn: &C, action: Action) -> StatementBuilder<'_, C> {
    StatementBuilder::new(conn, action)
}

/// Builds one SQL statement against one connection.
///
/// Lifecycle: configure via the chained setters, [`build`](Self::build) once,
/// [`execute`](Self::execute), then read results. The prepared-statement
/// handle is owned by the builder and released when the builder is dropped;
/// rebuilding replaces the previous handle.
///
/// # Example
/// ```ignore
/// let mut stmt = candy::builder(&conn, Action::Select)
///     .fields(["name"])
///     .table("users")
///     .filter([("name", Condition::eq("Yonas"))])
///     .limit(1);
/// let rows = stmt.build()?.execute()?.result_set()?;
/// ```
#[derive(Debug)]
pub struct StatementBuilder<'a, C: Connection> {
    conn: &'a C,
    action: Action,
    table: Option<String>,
    fields: Option<FieldSpec>,
    filter: Option<WhereClause>,
    limit: Option<Limit>,
    stmt: Option<C::Statement>,
    built: bool,
}

impl<'a, C: Connection> StatementBuilder<'a, C> {
    /// Create an unconfigured builder for `action`.
    pub fn new(conn: &'a C, action: Action) -> Self {
        Self {
            conn,
            action,
            table: None,
            fields: None,
            filter: None,
            limit: None,
            stmt: None,
            built: false,
        }
    }

    /// The action this builder compiles.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Set the field spec: a column list for SELECT, column→value pairs for
    /// INSERT/UPDATE. Not validated against the action until `build()`.
    pub fn fields(mut self, spec: impl Into<FieldSpec>) -> Self {
        self.fields = Some(spec.into());
        self
    }

    /// Set the target table. Required before `build()`.
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = Some(name.into());
        self
    }

    /// Set the where-clauses. Optional.
    pub fn filter(mut self, clause: impl Into<WhereClause>) -> Self {
        self.filter = Some(clause.into());
        self
    }

    /// Limit the statement to `max` rows. Optional.
    pub fn limit(mut self, max: u64) -> Self {
        self.limit = Some(match self.limit {
            Some(limit) => Limit { max, ..limit },
            None => Limit::new(max),
        });
        self
    }

    /// Set the limit offset. Ignored unless a limit is also set.
    pub fn offset(mut self, offset: u64) -> Self {
        if let Some(limit) = &mut self.limit {
            limit.offset = offset;
        }
        self
    }

    /// Whether `build()` has completed at least once.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Compile the statement to SQL without touching the connection.
    pub fn to_sql(&self) -> CandyResult<String> {
        Ok(self.compile()?.0)
    }

    /// Compile the bind parameters without touching the connection.
    ///
    /// Where-params come first, in clause iteration order, followed by the
    /// action's field params in field iteration order.
    pub fn to_params(&self) -> CandyResult<Vec<BindParam>> {
        Ok(self.compile()?.1)
    }

    /// Compile, prepare, and bind the statement.
    ///
    /// Fails fast with [`CandyError::MissingArgument`] before any connection
    /// call when the table is unset, or when the action needs fields that
    /// were not declared. A prepare failure propagates and leaves the builder
    /// unbuilt.
    pub fn build(&mut self) -> CandyResult<&mut Self> {
        let (sql, params) = self.compile()?;
        debug!(action = %self.action, sql = %sql, params = params.len(), "compiled statement");

        let mut stmt = self.conn.prepare(&sql)?;
        for param in &params {
            trace!(
                placeholder = %param.placeholder,
                bind_type = ?param.value.bind_type(),
                "binding parameter"
            );
            stmt.bind_value(&param.placeholder, param.value.clone(), param.value.bind_type())?;
        }

        // Replacing the handle releases any statement from a previous build.
        self.stmt = Some(stmt);
        self.built = true;
        Ok(self)
    }

    /// Run the prepared statement.
    ///
    /// Driver failures are returned as `Err` and additionally retained in
    /// [`error_info`](Self::error_info) by drivers that track them. Calling
    /// this before `build()` is a caller error ([`CandyError::NotBuilt`]).
    pub fn execute(&mut self) -> CandyResult<&mut Self> {
        let stmt = self.stmt.as_mut().ok_or(CandyError::NotBuilt)?;
        stmt.execute()?;
        debug!(action = %self.action, rows = stmt.row_count(), "statement executed");
        Ok(self)
    }

    /// Fetch all result rows.
    pub fn result_set(&mut self) -> CandyResult<Vec<Row>> {
        self.stmt_mut()?.fetch_all()
    }

    /// Fetch a single result row, if any.
    pub fn result_single(&mut self) -> CandyResult<Option<Row>> {
        self.stmt_mut()?.fetch_one()
    }

    /// Number of rows affected by the last execute.
    pub fn row_count(&self) -> CandyResult<u64> {
        Ok(self.stmt.as_ref().ok_or(CandyError::NotBuilt)?.row_count())
    }

    /// Descriptor for the last driver error.
    ///
    /// Returns [`ErrorInfo::ok`] while healthy or before the first build.
    pub fn error_info(&self) -> ErrorInfo {
        self.stmt
            .as_ref()
            .map(Statement::error_info)
            .unwrap_or_else(ErrorInfo::ok)
    }

    /// Fetch the result set chunked into pages of `per_page` rows.
    ///
    /// Returns an empty page list when the builder has not been built.
    pub fn as_pagination(&mut self, per_page: usize) -> CandyResult<Vec<Vec<Row>>> {
        if !self.built {
            return Ok(Vec::new());
        }
        let rows = self.result_set()?;
        Ok(paginate(&rows, per_page))
    }

    fn stmt_mut(&mut self) -> CandyResult<&mut C::Statement> {
        self.stmt.as_mut().ok_or(CandyError::NotBuilt)
    }

    /// Render the full statement and its ordered bind parameters.
    ///
    /// Empty where/limit fragments substitute as empty strings, preserving
    /// the templates' spacing (a DELETE without conditions renders as
    /// ``DELETE FROM `t`  LIMIT n``).
    fn compile(&self) -> CandyResult<(String, Vec<BindParam>)> {
        let table = self
            .table
            .as_deref()
            .ok_or(CandyError::MissingArgument("table"))?;

        let (where_sql, mut params) = self.render_where();
        let limit_sql = self.render_limit();

        let sql = match self.action {
            Action::Select => {
                let columns = self.select_columns()?;
                format!("SELECT {columns} FROM `{table}` {where_sql} {limit_sql}")
            }
            Action::Insert => {
                let mut columns = Vec::new();
                let mut placeholders = Vec::new();
                for (col, value) in self.value_fields()? {
                    let placeholder = format!(":{col}");
                    columns.push(format!("`{col}`"));
                    placeholders.push(placeholder.clone());
                    params.push(BindParam {
                        placeholder,
                        value: value.clone(),
                    });
                }
                format!(
                    "INSERT INTO `{table}` ({}) VALUES ({})",
                    columns.join(", "),
                    placeholders.join(", ")
                )
            }
            Action::Update => {
                let mut assignments = Vec::new();
                for (col, value) in self.value_fields()? {
                    // TODO: backtick-quote assignment columns like the
                    // INSERT/SELECT column lists once callers are audited.
                    assignments.push(format!("{col} = :{col}"));
                    params.push(BindParam {
                        placeholder: format!(":{col}"),
                        value: value.clone(),
                    });
                }
                format!(
                    "UPDATE `{table}` SET {} {where_sql} {limit_sql}",
                    assignments.join(", ")
                )
            }
            Action::Delete => {
                format!("DELETE FROM `{table}` {where_sql} {limit_sql}")
            }
        };

        Ok((sql, params))
    }

    /// Render the where-fragment and collect its bind parameters.
    ///
    /// Entries missing either value or comparator are skipped outright; when
    /// nothing renders the fragment is omitted.
    fn render_where(&self) -> (String, Vec<BindParam>) {
        let mut params = Vec::new();
        let Some(clause) = &self.filter else {
            return (String::new(), params);
        };

        let mut rendered = String::new();
        for (col, cond) in clause.iter() {
            let (Some(value), Some(comparator)) = (&cond.value, &cond.comparator) else {
                continue;
            };
            let placeholder = format!(":where{col}");
            rendered.push_str(&format!("`{col}` {comparator} {placeholder}"));
            params.push(BindParam {
                placeholder,
                value: value.clone(),
            });
            if let Some(joiner) = cond.joiner {
                rendered.push_str(&format!(" {} ", joiner.as_str()));
            }
        }

        if rendered.is_empty() {
            (String::new(), params)
        } else {
            (format!("WHERE {rendered}"), params)
        }
    }

    fn render_limit(&self) -> String {
        match self.limit {
            Some(Limit { max, offset: 0 }) => format!("LIMIT {max}"),
            Some(Limit { max, offset }) => format!("LIMIT {max}, {offset}"),
            None => String::new(),
        }
    }

    /// The SELECT column list: `*` as soon as any entry is the wildcard,
    /// otherwise each column backtick-quoted and comma-joined.
    fn select_columns(&self) -> CandyResult<String> {
        let Some(FieldSpec::Columns(cols)) = &self.fields else {
            return Err(CandyError::MissingArgument("fields"));
        };
        if cols.is_empty() {
            return Err(CandyError::MissingArgument("fields"));
        }
        let mut quoted = Vec::with_capacity(cols.len());
        for col in cols {
            if col == FieldSpec::WILDCARD {
                return Ok(FieldSpec::WILDCARD.to_string());
            }
            quoted.push(format!("`{col}`"));
        }
        Ok(quoted.join(", "))
    }

    fn value_fields(&self) -> CandyResult<&[(String, Value)]> {
        match &self.fields {
            Some(FieldSpec::Values(pairs)) if !pairs.is_empty() => Ok(pairs),
            _ => Err(CandyError::MissingArgument("fields")),
        }
    }
}
