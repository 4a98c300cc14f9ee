//! Document model - the shape of records held by a document store
//!
//! A document is an id, server-assigned timestamps and a flat map of named
//! fields. Queries support equality filters, a single sort key and
//! offset/limit paging.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::lenient::coerce_count;

/// Named fields of a stored document
pub type Fields = Map<String, Value>;

/// Default page size for a list call without an explicit limit
pub const DEFAULT_LIST_LIMIT: usize = 25;

/// Named groups of documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Regrets,
    Comments,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Self::Regrets, Self::Comments];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regrets => "regrets",
            Self::Comments => "comments",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub fields: Fields,
}

impl Document {
    /// Create a document stamped with the current time
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            updated_at: now,
            fields,
        }
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field as text. Non-string scalars are not converted.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Field as a non-negative count, coerced leniently
    pub fn count_field(&self, name: &str) -> Option<u64> {
        match self.field(name) {
            None | Some(Value::Null) => None,
            Some(value) => Some(coerce_count(value)),
        }
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.field(name).and_then(Value::as_bool)
    }

    /// Overwrite the given fields. Fields not named in `patch` are untouched.
    pub fn apply(&mut self, patch: Fields) {
        for (name, value) in patch {
            self.fields.insert(name, value);
        }
        self.updated_at = Utc::now();
    }
}

/// Query filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals the given JSON value
    Equal(String, Value),
}

impl Filter {
    pub fn equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equal(field.into(), value.into())
    }

    /// Evaluate against a document in process
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Self::Equal(field, value) => document.field(field) == Some(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Field(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Compare two documents by this sort key.
    ///
    /// Missing or null values sort last regardless of direction. Numbers
    /// compare numerically, strings lexically, and mixed types by type rank.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let ordering = match &self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Field(name) => {
                match (non_null(a.field(name)), non_null(b.field(name))) {
                    (None, None) => Ordering::Equal,
                    (None, Some(_)) => return Ordering::Greater,
                    (Some(_), None) => return Ordering::Less,
                    (Some(x), Some(y)) => compare_values(x, y),
                }
            }
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Parameters of a list call
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filters: Vec<Filter>,
    pub sort: Option<Sort>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            sort: None,
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Whether a document passes every filter
    pub fn matches(&self, document: &Document) -> bool {
        self.filters.iter().all(|f| f.matches(document))
    }
}

/// Result of a list call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentList {
    /// Number of matching documents, ignoring limit and offset
    pub total: u64,
    pub documents: Vec<Document>,
}
