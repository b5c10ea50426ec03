//! Query descriptors, cursors and pages.

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

use super::document::Document;

/// A single filter clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals value.
    Eq {
        /// Field name.
        field: String,
        /// Expected value.
        value: Value,
    },
    /// String field starts with prefix.
    Prefix {
        /// Field name.
        field: String,
        /// Required prefix.
        prefix: String,
    },
}

impl Filter {
    /// Check a document against this clause.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::Eq { field, value } => doc.field_or_null(field) == value,
            Self::Prefix { field, prefix } => doc
                .field(field)
                .and_then(Value::as_str)
                .is_some_and(|s| s.starts_with(prefix.as_str())),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq { field, value } => write!(f, "{field}=={value}"),
            Self::Prefix { field, prefix } => write!(f, "{field}^={prefix:?}"),
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Field to sort on.
    pub field: String,
    /// Newest/largest first.
    pub descending: bool,
}

/// A query shape: collection plus filters plus ordering.
///
/// Page size is not part of the query; it joins the shape when a cursor is
/// issued (see [`Query::shape`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    collection: String,
    filters: Vec<Filter>,
    order_by: Option<OrderBy>,
}

impl Query {
    /// Query every document of a collection.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: None,
        }
    }

    /// Add an equality filter.
    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add a prefix filter.
    pub fn filter_prefix(mut self, field: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.filters.push(Filter::Prefix {
            field: field.into(),
            prefix: prefix.into(),
        });
        self
    }

    /// Sort ascending by field.
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            descending: false,
        });
        self
    }

    /// Sort descending by field.
    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            descending: true,
        });
        self
    }

    /// Collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Filter clauses.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Ordering, if any.
    pub fn ordering(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    /// Check whether a document satisfies every filter.
    pub fn matches(&self, doc: &Document) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }

    /// Compare two documents under this query's ordering.
    ///
    /// Ties (and unordered queries) fall back to document id so the order is
    /// total and stable.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let by_field = match &self.order_by {
            Some(order) => {
                let ord = compare_values(a.field_or_null(&order.field), b.field_or_null(&order.field));
                if order.descending { ord.reverse() } else { ord }
            }
            None => Ordering::Equal,
        };
        by_field.then_with(|| a.id.cmp(&b.id))
    }

    /// Canonical shape key for this query at a given page size.
    ///
    /// Cursors are bound to this key.
    pub fn shape(&self, page_size: usize) -> String {
        let filters: Vec<String> = self.filters.iter().map(ToString::to_string).collect();
        let order = match &self.order_by {
            Some(o) if o.descending => format!("{} desc", o.field),
            Some(o) => format!("{} asc", o.field),
            None => "id asc".to_string(),
        };
        format!(
            "{}[{}] order {} size {}",
            self.collection,
            filters.join(","),
            order,
            page_size
        )
    }
}

/// Total order over JSON scalars: null < bool < number < string < other.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) | Value::Object(_) => 4,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Opaque continuation token, valid only for the query shape that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    shape: String,
    token: String,
}

impl Cursor {
    /// Create a cursor. Only stores should call this.
    pub fn new(shape: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            shape: shape.into(),
            token: token.into(),
        }
    }

    /// Shape key this cursor is bound to.
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// Store-specific token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Check whether the cursor may be used with a shape key.
    pub fn belongs_to(&self, shape: &str) -> bool {
        self.shape == shape
    }
}

/// One page of documents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Documents in store order.
    pub records: Vec<Document>,
    /// Cursor for the next page, `None` when the store has nothing more.
    pub next_cursor: Option<Cursor>,
}

impl Page {
    /// Number of documents returned.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the page is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
