//! # candy
//!
//! A fluent SQL statement builder layered over a generic prepared-statement
//! connection.
//!
//! ## Features
//!
//! - **Declarative statements**: chain `fields` / `table` / `filter` / `limit`
//!   calls instead of hand-writing INSERT, UPDATE, SELECT, and DELETE SQL
//! - **Named bind parameters**: values never land in the SQL text; each one
//!   binds as `:<col>` (or `:where<col>`) with an inferred wire type
//! - **Driver-agnostic**: the connection is a capability trait pair
//!   ([`Connection`] / [`Statement`]); any synchronous prepared-statement
//!   driver plugs in
//! - **Scoped resources**: the prepared-statement handle is owned by the
//!   builder and released on drop
//! - **Batching**: [`Batch`] executes independently configured builders in
//!   order, capturing per-entry results and errors
//!
//! ## Usage
//!
//! ```ignore
//! use candy::{builder, Action, Condition};
//!
//! // INSERT
//! candy::builder(&conn, Action::Insert)
//!     .fields([("name", "Yonas"), ("email", "y@x.com")])
//!     .table("users")
//!     .build()?
//!     .execute()?;
//!
//! // SELECT
//! let mut stmt = candy::builder(&conn, Action::Select)
//!     .fields(["name"])
//!     .table("users")
//!     .filter([("name", Condition::eq("Yonas"))])
//!     .limit(1);
//! let rows = stmt.build()?.execute()?.result_set()?;
//! ```

pub mod action;
pub mod batch;
pub mod builder;
pub mod clause;
pub mod client;
pub mod error;
pub mod row;
pub mod value;

pub use action::Action;
pub use batch::Batch;
pub use builder::{BindParam, StatementBuilder, builder};
pub use clause::{Condition, FieldSpec, Joiner, Limit, WhereClause};
pub use client::{Connection, Statement};
pub use error::{CandyError, CandyResult, ErrorInfo};
pub use row::{Row, paginate};
pub use value::{BindType, Value};
