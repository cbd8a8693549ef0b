//! Sequential execution of independently configured builders.

use crate::builder::StatementBuilder;
use crate::client::Connection;
use crate::error::ErrorInfo;
use crate::row::Row;
use tracing::debug;

/// An ordered collection of builders executed one at a time in list order.
///
/// Each executed entry's result rows and error descriptor are captured in
/// matching positions; a failing entry is recorded and does not halt the
/// remaining entries. There is no parallel execution and no retry.
pub struct Batch<'a, C: Connection> {
    list: Vec<StatementBuilder<'a, C>>,
    results: Vec<Vec<Row>>,
    errors: Vec<ErrorInfo>,
}

impl<'a, C: Connection> Batch<'a, C> {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self {
            list: Vec::new(),
            results: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Append a builder to the batch.
    pub fn add(&mut self, builder: StatementBuilder<'a, C>) {
        self.list.push(builder);
    }

    /// Number of builders in the batch.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether the batch holds no builders.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Result sets captured by the last [`execute`](Self::execute), one per
    /// executed entry, in list order.
    pub fn results(&self) -> &[Vec<Row>] {
        &self.results
    }

    /// Error descriptors captured by the last [`execute`](Self::execute),
    /// positionally matching [`results`](Self::results).
    pub fn errors(&self) -> &[ErrorInfo] {
        &self.errors
    }

    /// Execute every entry in list order.
    ///
    /// Entries already built are executed directly. Unbuilt entries are built
    /// first when `force_build` is set, and skipped entirely otherwise (they
    /// leave no result or error slot). Previous results and errors are
    /// discarded.
    pub fn execute(&mut self, force_build: bool) {
        self.results.clear();
        self.errors.clear();

        for entry in &mut self.list {
            if !entry.is_built() {
                if !force_build {
                    continue;
                }
                if let Err(err) = entry.build() {
                    debug!(action = %entry.action(), error = %err, "batch entry failed to build");
                    self.errors.push(err.to_error_info());
                    self.results.push(Vec::new());
                    continue;
                }
            }

            match entry.execute() {
                Ok(_) => {
                    self.errors.push(entry.error_info());
                    // A fetch failure leaves an empty result for this entry.
                    self.results.push(entry.result_set().unwrap_or_default());
                }
                Err(err) => {
                    debug!(action = %entry.action(), error = %err, "batch entry failed to execute");
                    self.errors.push(err.to_error_info());
                    self.results.push(Vec::new());
                }
            }
        }
    }
}

impl<'a, C: Connection> Default for Batch<'a, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C: Connection> StatementBuilder<'a, C> {
    /// Hand this builder over to `batch`, keeping call-site chaining intact.
    pub fn add_to(self, batch: &mut Batch<'a, C>) {
        batch.add(self);
    }
}
