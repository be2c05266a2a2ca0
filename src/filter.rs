//! Filter expressions for Autotask query endpoints.
//!
//! Query endpoints take a `search` parameter holding a JSON object of the
//! form `{"filter": [{"op": "eq", "field": "...", "value": "..."}, ...]}`.
//! Clauses in the list combine as an implicit AND. Filters are built as
//! structured values and serialized through serde, so field or value text
//! containing quotes or braces cannot corrupt the query.

use serde::Serialize;
use serde_json::Value;

/// Comparison operators in the Autotask filter dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterOp {
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "noteq")]
    NotEq,
    #[serde(rename = "gt")]
    Gt,
    #[serde(rename = "gte")]
    Gte,
    #[serde(rename = "lt")]
    Lt,
    #[serde(rename = "lte")]
    Lte,
    #[serde(rename = "beginsWith")]
    BeginsWith,
    #[serde(rename = "endsWith")]
    EndsWith,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "exist")]
    Exist,
    #[serde(rename = "notExist")]
    NotExist,
}

/// One comparison clause.
///
/// `udf: true` marks the field as a user-defined field; existence checks
/// (`exist`/`notExist`) carry no value.
#[derive(Debug, Clone, Serialize)]
pub struct Filter {
    pub op: FilterOp,
    pub field: String,
    #[serde(skip_serializing_if = "is_false")]
    pub udf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Filter {
    /// Build a clause with an explicit operator.
    pub fn new(op: FilterOp, field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op,
            field: field.into(),
            udf: false,
            value: Some(value.into()),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(FilterOp::Eq, field, value)
    }

    pub fn not_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(FilterOp::NotEq, field, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(FilterOp::Gt, field, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(FilterOp::Gte, field, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(FilterOp::Lt, field, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(FilterOp::Lte, field, value)
    }

    pub fn begins_with(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(FilterOp::BeginsWith, field, value)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(FilterOp::Contains, field, value)
    }

    /// Match records where the field is present, regardless of value.
    pub fn exist(field: impl Into<String>) -> Self {
        Self {
            op: FilterOp::Exist,
            field: field.into(),
            udf: false,
            value: None,
        }
    }

    pub fn not_exist(field: impl Into<String>) -> Self {
        Self {
            op: FilterOp::NotExist,
            field: field.into(),
            udf: false,
            value: None,
        }
    }

    /// Mark the clause as targeting a user-defined field.
    #[must_use]
    pub fn udf(mut self) -> Self {
        self.udf = true;
        self
    }
}

/// The search object sent in the `search` query parameter.
///
/// The default search is the implicit soft-delete filter `isActive eq 1`,
/// so queries return only active records unless the caller asks otherwise.
///
/// # Example
///
/// ```
/// use autotask_api::{Filter, Search};
///
/// let search = Search::from(Filter::eq("companyID", 42))
///     .and(Filter::gt("dateWorked", "2024-01-01"));
/// assert_eq!(search.filter.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Search {
    pub filter: Vec<Filter>,
}

impl Search {
    pub fn new(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self {
            filter: filters.into_iter().collect(),
        }
    }

    /// Add another clause (implicit AND).
    #[must_use]
    pub fn and(mut self, filter: Filter) -> Self {
        self.filter.push(filter);
        self
    }

    /// Serialize to the JSON text carried by the `search` parameter.
    pub fn to_query(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new([Filter::eq("isActive", "1")])
    }
}

impl From<Filter> for Search {
    fn from(filter: Filter) -> Self {
        Self::new([filter])
    }
}
