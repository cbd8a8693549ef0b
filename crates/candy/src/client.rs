//! Capability traits for the external prepared-statement connection.
//!
//! The builder consumes these traits and never implements them; concrete
//! drivers live outside this crate. All calls are synchronous and blocking.
//! Concurrency, cancellation, and timeouts are the driver's concern, not the
//! builder's.

use crate::error::{CandyResult, ErrorInfo};
use crate::row::Row;
use crate::value::{BindType, Value};

/// A database connection capable of preparing statements.
pub trait Connection {
    /// The prepared-statement handle type produced by [`Connection::prepare`].
    type Statement: Statement;

    /// Prepare `sql`, returning a live statement handle.
    ///
    /// The handle is exclusively owned by the caller and released on drop.
    fn prepare(&self, sql: &str) -> CandyResult<Self::Statement>;
}

/// A live prepared statement.
pub trait Statement {
    /// Bind a value to a named placeholder with a wire type hint.
    fn bind_value(&mut self, name: &str, value: Value, ty: BindType) -> CandyResult<()>;

    /// Execute the statement.
    fn execute(&mut self) -> CandyResult<()>;

    /// Fetch all result rows.
    fn fetch_all(&mut self) -> CandyResult<Vec<Row>>;

    /// Fetch a single result row, if any.
    fn fetch_one(&mut self) -> CandyResult<Option<Row>>;

    /// Number of rows affected by the last execute.
    fn row_count(&self) -> u64;

    /// Descriptor for the last driver error; [`ErrorInfo::ok`] when healthy.
    fn error_info(&self) -> ErrorInfo;
}

impl<C: Connection> Connection for &C {
    type Statement = C::Statement;

    fn prepare(&self, sql: &str) -> CandyResult<Self::Statement> {
        (*self).prepare(sql)
    }
}
