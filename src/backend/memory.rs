//! In-process backend
//!
//! Keeps each table as a list of JSON rows and evaluates [`Query`] with the
//! same filter and order semantics as the hosted service. Every call is
//! recorded, and failures can be injected per table, which makes it the
//! backend of choice for tests and the offline demo.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::error::{BackendError, BackendResult};
use super::query::{cell_text, Direction, Insert, Query, Table};
use super::Backend;
use crate::feed::parse_timestamp;

/// A recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Select(Query),
    Insert(Insert),
}

/// In-memory table store
#[derive(Default)]
pub struct MemoryBackend {
    tables: RefCell<HashMap<Table, Vec<Value>>>,
    failures: RefCell<HashMap<Table, String>>,
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u64>,
    clock: Cell<Option<DateTime<Utc>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: seed a table with rows
    pub fn with_rows(self, table: Table, rows: Vec<Value>) -> Self {
        self.tables.borrow_mut().entry(table).or_default().extend(rows);
        self
    }

    /// Make every call against `table` fail with `message` until cleared
    pub fn fail(&self, table: Table, message: impl Into<String>) {
        self.failures.borrow_mut().insert(table, message.into());
    }

    /// Stop failing calls against `table`
    pub fn recover(&self, table: Table) {
        self.failures.borrow_mut().remove(&table);
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Current rows of a table
    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.tables
            .borrow()
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }

    fn check_failure(&self, table: Table) -> BackendResult<()> {
        match self.failures.borrow().get(&table) {
            Some(message) => Err(BackendError::Rejected(message.clone())),
            None => Ok(()),
        }
    }

    /// Strictly increasing timestamps so inserted rows keep their order
    fn tick(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.clock.get() {
            Some(last) if last >= now => last + Duration::milliseconds(1),
            _ => now,
        };
        self.clock.set(Some(stamp));
        stamp
    }

    fn stamp_row(&self, row: &Value) -> Value {
        let mut object = match row {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };

        if !object.contains_key("id") {
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            object.insert("id".to_string(), Value::String(format!("mem-{}", id)));
        }
        if !object.contains_key("created_at") {
            object.insert(
                "created_at".to_string(),
                Value::String(self.tick().to_rfc3339()),
            );
        }

        Value::Object(object)
    }
}

#[async_trait(?Send)]
impl Backend for MemoryBackend {
    async fn select(&self, query: &Query) -> BackendResult<Vec<Value>> {
        self.calls.borrow_mut().push(Call::Select(query.clone()));
        self.check_failure(query.table)?;

        let tables = self.tables.borrow();
        let mut rows: Vec<Value> = tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        query.filters.iter().all(|filter| {
                            row.get(filter.column())
                                .and_then(cell_text)
                                .map(|cell| filter.accepts(&cell))
                                .unwrap_or(false)
                        })
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare_cells(a.get(&order.column), b.get(&order.column));
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        if !query.columns.is_empty() {
            rows = rows
                .into_iter()
                .map(|row| {
                    let projected: Map<String, Value> = query
                        .columns
                        .iter()
                        .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
                        .collect();
                    Value::Object(projected)
                })
                .collect();
        }

        Ok(rows)
    }

    async fn insert(&self, insert: &Insert) -> BackendResult<Vec<Value>> {
        self.calls.borrow_mut().push(Call::Insert(insert.clone()));
        self.check_failure(insert.table)?;

        let stored: Vec<Value> = insert.rows.iter().map(|row| self.stamp_row(row)).collect();
        self.tables
            .borrow_mut()
            .entry(insert.table)
            .or_default()
            .extend(stored.iter().cloned());

        Ok(if insert.returning { stored } else { Vec::new() })
    }
}

/// Order two cells: timestamps chronologically, numbers numerically,
/// everything else by string form; missing cells sort last
fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => {
            match (parse_timestamp(x), parse_timestamp(y)) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Null), Some(Value::Null)) | (None, None) => Ordering::Equal,
        (Some(Value::Null) | None, _) => Ordering::Greater,
        (_, Some(Value::Null) | None) => Ordering::Less,
        (Some(x), Some(y)) => cell_text(x).cmp(&cell_text(y)),
    }
}
