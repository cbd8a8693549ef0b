//! End-to-end tests driving the builder and batch through an in-memory mock
//! driver that records prepared SQL and bound parameters.

use std::cell::RefCell;
use std::rc::Rc;

use candy::{
    Action, Batch, BindType, CandyError, CandyResult, Condition, Connection, ErrorInfo, Row,
    Statement, Value, builder,
};

/// Mock connection: records every prepared SQL text and every bound
/// parameter. Statements whose SQL contains `fail_on` fail at execute with a
/// driver error.
#[derive(Debug, Default)]
struct MockConnection {
    prepared: RefCell<Vec<String>>,
    binds: Rc<RefCell<Vec<(String, Value, BindType)>>>,
    canned_rows: Vec<Row>,
    fail_on: Option<String>,
}

impl MockConnection {
    fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            canned_rows: rows,
            ..Default::default()
        }
    }

    fn prepared_sql(&self) -> Vec<String> {
        self.prepared.borrow().clone()
    }

    fn bound(&self) -> Vec<(String, Value, BindType)> {
        self.binds.borrow().clone()
    }
}

#[derive(Debug)]
struct MockStatement {
    binds: Rc<RefCell<Vec<(String, Value, BindType)>>>,
    rows: Vec<Row>,
    executed: bool,
    fail: bool,
    error: ErrorInfo,
}

impl Connection for MockConnection {
    type Statement = MockStatement;

    fn prepare(&self, sql: &str) -> CandyResult<MockStatement> {
        self.prepared.borrow_mut().push(sql.to_string());
        let fail = self
            .fail_on
            .as_deref()
            .is_some_and(|needle| sql.contains(needle));
        Ok(MockStatement {
            binds: Rc::clone(&self.binds),
            rows: self.canned_rows.clone(),
            executed: false,
            fail,
            error: ErrorInfo::ok(),
        })
    }
}

impl Statement for MockStatement {
    fn bind_value(&mut self, name: &str, value: Value, ty: BindType) -> CandyResult<()> {
        self.binds.borrow_mut().push((name.to_string(), value, ty));
        Ok(())
    }

    fn execute(&mut self) -> CandyResult<()> {
        if self.fail {
            self.error = ErrorInfo::new(1064, "syntax error").with_detail("42000");
            return Err(CandyError::Driver(self.error.clone()));
        }
        self.executed = true;
        Ok(())
    }

    fn fetch_all(&mut self) -> CandyResult<Vec<Row>> {
        Ok(self.rows.clone())
    }

    fn fetch_one(&mut self) -> CandyResult<Option<Row>> {
        Ok(self.rows.first().cloned())
    }

    fn row_count(&self) -> u64 {
        if self.executed { self.rows.len() as u64 } else { 0 }
    }

    fn error_info(&self) -> ErrorInfo {
        self.error.clone()
    }
}

fn user_row(name: &str) -> Row {
    Row::from_pairs([("name", Value::from(name))])
}

#[test]
fn insert_prepares_binds_and_executes() {
    let conn = MockConnection::default();
    let mut stmt = builder(&conn, Action::Insert)
        .fields([
            ("name", Value::from("Yonas")),
            ("age", Value::from(30i64)),
            ("active", Value::from(true)),
            ("nickname", Value::Null),
        ])
        .table("users");

    stmt.build().unwrap().execute().unwrap();
    assert!(stmt.is_built());
    assert!(stmt.error_info().is_ok());

    assert_eq!(
        conn.prepared_sql(),
        ["INSERT INTO `users` (`name`, `age`, `active`, `nickname`) \
          VALUES (:name, :age, :active, :nickname)"]
    );
    assert_eq!(
        conn.bound(),
        [
            (":name".to_string(), Value::from("Yonas"), BindType::Text),
            (":age".to_string(), Value::from(30i64), BindType::Int),
            (":active".to_string(), Value::from(true), BindType::Bool),
            (":nickname".to_string(), Value::Null, BindType::Null),
        ]
    );
}

#[test]
fn bound_parameters_carry_inferred_types() {
    let conn = MockConnection::default();
    let stmt = builder(&conn, Action::Insert)
        .fields([
            ("age", Value::from(30i64)),
            ("active", Value::from(true)),
            ("nickname", Value::Null),
            ("name", Value::from("Yonas")),
        ])
        .table("users");

    let params = stmt.to_params().unwrap();
    let bound: Vec<(&str, BindType)> = params
        .iter()
        .map(|p| (p.placeholder.as_str(), p.value.bind_type()))
        .collect();
    assert_eq!(
        bound,
        [
            (":age", BindType::Int),
            (":active", BindType::Bool),
            (":nickname", BindType::Null),
            (":name", BindType::Text),
        ]
    );
}

#[test]
fn select_fetches_rows_and_paginates() {
    let rows: Vec<Row> = ["a", "b", "c", "d", "e"].map(|n| user_row(n)).to_vec();
    let conn = MockConnection::with_rows(rows);

    let mut stmt = builder(&conn, Action::Select)
        .fields(["*"])
        .table("users");
    stmt.build().unwrap().execute().unwrap();

    let all = stmt.result_set().unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[0].get("name"), Some(&Value::from("a")));

    let one = stmt.result_single().unwrap();
    assert_eq!(one.unwrap().get("name"), Some(&Value::from("a")));

    let pages = stmt.as_pagination(2).unwrap();
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[2].len(), 1);

    assert_eq!(stmt.row_count().unwrap(), 5);
}

#[test]
fn filtered_select_round_trips() {
    let conn = MockConnection::with_rows(vec![user_row("Yonas")]);
    let mut stmt = builder(&conn, Action::Select)
        .fields(["name"])
        .table("users")
        .filter([("name", Condition::eq("Yonas"))])
        .limit(1);
    stmt.build().unwrap().execute().unwrap();

    assert_eq!(
        conn.prepared_sql(),
        ["SELECT `name` FROM `users` WHERE `name` = :wherename LIMIT 1"]
    );
    let row = stmt.result_single().unwrap().unwrap();
    assert_eq!(row.get("name"), Some(&Value::from("Yonas")));
}

#[test]
fn pagination_before_build_is_empty() {
    let conn = MockConnection::with_rows(vec![user_row("a")]);
    let mut stmt = builder(&conn, Action::Select).fields(["*"]).table("users");
    assert!(stmt.as_pagination(2).unwrap().is_empty());
}

#[test]
fn missing_table_never_touches_the_connection() {
    let conn = MockConnection::default();
    let mut stmt = builder(&conn, Action::Select).fields(["*"]);
    assert!(matches!(
        stmt.build(),
        Err(CandyError::MissingArgument("table"))
    ));
    assert!(conn.prepared_sql().is_empty());
}

#[test]
fn execute_failure_propagates_and_is_inspectable() {
    let conn = MockConnection {
        fail_on: Some("DELETE".to_string()),
        ..Default::default()
    };
    let mut stmt = builder(&conn, Action::Delete).table("users").limit(1);
    stmt.build().unwrap();

    let err = stmt.execute().unwrap_err();
    assert!(matches!(err, CandyError::Driver(ref info) if info.code == 1064));
    // The descriptor stays retrievable after the fact.
    assert_eq!(stmt.error_info().code, 1064);
    assert_eq!(stmt.error_info().detail.as_deref(), Some("42000"));
}

#[test]
fn rebuild_replaces_the_statement_handle() {
    let conn = MockConnection::default();
    let mut stmt = builder(&conn, Action::Delete).table("users");
    stmt.build().unwrap();
    stmt.build().unwrap();
    assert_eq!(conn.prepared_sql().len(), 2);
    assert!(stmt.is_built());
}

#[test]
fn batch_executes_entries_in_order_and_isolates_failures() {
    let conn = MockConnection {
        canned_rows: vec![user_row("Yonas")],
        fail_on: Some("DELETE".to_string()),
        ..Default::default()
    };

    let mut batch = Batch::new();
    builder(&conn, Action::Insert)
        .fields([("name", "Yonas")])
        .table("users")
        .add_to(&mut batch);
    builder(&conn, Action::Delete).table("users").add_to(&mut batch);
    builder(&conn, Action::Select)
        .fields(["name"])
        .table("users")
        .add_to(&mut batch);
    assert_eq!(batch.len(), 3);

    batch.execute(true);

    assert_eq!(batch.results().len(), 3);
    assert_eq!(batch.errors().len(), 3);

    // Entry 0 and 2 succeed; entry 1 fails without halting entry 2.
    assert!(batch.errors()[0].is_ok());
    assert_eq!(batch.errors()[1].code, 1064);
    assert!(batch.errors()[2].is_ok());
    assert!(batch.results()[1].is_empty());
    assert_eq!(batch.results()[2][0].get("name"), Some(&Value::from("Yonas")));

    // All three entries were prepared, in list order.
    let sql = conn.prepared_sql();
    assert_eq!(sql.len(), 3);
    assert!(sql[0].starts_with("INSERT"));
    assert!(sql[1].starts_with("DELETE"));
    assert!(sql[2].starts_with("SELECT"));
}

#[test]
fn batch_skips_unbuilt_entries_without_force_build() {
    let conn = MockConnection::default();
    let mut batch = Batch::new();

    let mut prebuilt = builder(&conn, Action::Delete).table("users");
    prebuilt.build().unwrap();
    batch.add(prebuilt);

    // Never built; must be skipped entirely.
    builder(&conn, Action::Delete).table("sessions").add_to(&mut batch);

    batch.execute(false);
    assert_eq!(batch.results().len(), 1);
    assert_eq!(batch.errors().len(), 1);
    assert_eq!(conn.prepared_sql().len(), 1);
}

#[test]
fn batch_records_build_failures() {
    let conn = MockConnection::default();
    let mut batch = Batch::new();
    // Table never set: build fails, error is captured, batch continues.
    builder(&conn, Action::Insert)
        .fields([("name", "Yonas")])
        .add_to(&mut batch);
    builder(&conn, Action::Delete).table("users").add_to(&mut batch);

    batch.execute(true);
    assert_eq!(batch.errors().len(), 2);
    assert_eq!(batch.errors()[0].code, -1);
    assert!(batch.errors()[0].message.contains("table"));
    assert!(batch.errors()[1].is_ok());
}
