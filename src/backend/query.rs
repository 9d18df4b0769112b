//! Select and insert requests
//!
//! A deliberately small subset of what the hosted service understands:
//! one table, a column list, `eq`/`in` filters and a single order clause.
//! Requests render to PostgREST query parameters, and the in-memory backend
//! evaluates the same structures directly.

use serde::Serialize;
use serde_json::Value;

use super::error::BackendResult;

/// Tables the feed reads from and writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Entries,
    Comments,
    Reactions,
}

impl Table {
    /// Table name on the backend
    pub fn name(&self) -> &'static str {
        match self {
            Table::Entries => "entries",
            Table::Comments => "comments",
            Table::Reactions => "reactions",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Row filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`
    Eq { column: String, value: String },
    /// `column IN (values...)`
    In { column: String, values: Vec<String> },
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq { column, .. } | Filter::In { column, .. } => column,
        }
    }

    /// Whether a cell value (as its string form) passes this filter
    pub fn accepts(&self, cell: &str) -> bool {
        match self {
            Filter::Eq { value, .. } => value == cell,
            Filter::In { values, .. } => values.iter().any(|v| v == cell),
        }
    }

    fn to_param(&self) -> (String, String) {
        match self {
            Filter::Eq { column, value } => (column.clone(), format!("eq.{}", value)),
            Filter::In { column, values } => {
                let quoted: Vec<String> = values.iter().map(|v| quote_list_value(v)).collect();
                (column.clone(), format!("in.({})", quoted.join(",")))
            }
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Single-column order clause
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// A select request against one table
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: Table,
    /// Projected columns; empty means every column
    pub columns: Vec<String>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl Query {
    /// Start a select on `table` returning every column
    pub fn from(table: Table) -> Self {
        Self {
            table,
            columns: Vec::new(),
            filters: Vec::new(),
            order: None,
        }
    }

    /// Builder method: project columns (`"*"` or a comma-separated list)
    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "*")
            .map(String::from)
            .collect();
        self
    }

    /// Builder method: `column = value`
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    /// Builder method: `column IN (values...)`
    pub fn in_list<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Builder method: order by one column
    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.into(),
            direction,
        });
        self
    }

    /// Value of the `select` parameter
    pub fn select_param(&self) -> String {
        if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(",")
        }
    }

    /// Unencoded PostgREST query parameters
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select_param())];
        params.extend(self.filters.iter().map(Filter::to_param));
        if let Some(order) = &self.order {
            let dir = match order.direction {
                Direction::Ascending => "asc",
                Direction::Descending => "desc",
            };
            params.push(("order".to_string(), format!("{}.{}", order.column, dir)));
        }
        params
    }

    /// Percent-encoded query string (without the leading `?`)
    pub fn to_query_string(&self) -> String {
        self.to_params()
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// An append of one or more rows to a table
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: Table,
    pub rows: Vec<Value>,
    /// Ask the backend to send the stored rows back
    pub returning: bool,
}

impl Insert {
    /// Insert a single serializable row
    pub fn row<T: Serialize>(table: Table, row: &T) -> BackendResult<Self> {
        Ok(Self {
            table,
            rows: vec![serde_json::to_value(row)?],
            returning: false,
        })
    }

    /// Builder method: request the stored rows in the response
    pub fn returning(mut self) -> Self {
        self.returning = true;
        self
    }
}

/// Quote a value for a PostgREST `in.(...)` list
fn quote_list_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// String form of a JSON cell used for filter comparisons
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
