//! Parameter binding and WHERE rendering shared by every statement kind.

use super::types::{Filter, Operator, QueryResult, Value};
use crate::dialect::{Dialect, escape_like};

/// Collects parameters for one statement and hands out their placeholders.
///
/// Numbering follows the order of [`Binder::bind`] calls, starting at 1.
pub(super) struct Binder<D> {
    dialect: D,
    params: Vec<Value>,
}

impl<D: Dialect> Binder<D> {
    pub(super) const fn new(dialect: D) -> Self {
        Self {
            dialect,
            params: Vec::new(),
        }
    }

    /// Record `value` and return its placeholder.
    pub(super) fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        self.dialect.param(self.params.len())
    }

    /// Render one condition, binding its parameters.
    pub(super) fn condition(&mut self, filter: &Filter) -> String {
        let field = filter.field.as_str();
        match (filter.op, &filter.value) {
            (Operator::Eq, Value::Null) => format!("{field} IS NULL"),
            (Operator::Eq, value) => format!("{field} = {}", self.bind(value.clone())),

            (Operator::NotIn, Value::Array(values)) if values.is_empty() => "1=1".to_string(),
            (Operator::NotIn, value) => {
                let list = match value {
                    Value::Array(_) => value.clone(),
                    single => Value::Array(vec![single.clone()]),
                };
                let placeholder = self.bind(list);
                self.dialect.not_in(field, &placeholder)
            },

            (Operator::Contains, Value::String(term)) => {
                let placeholder = self.bind(Value::String(escape_like(term)));
                self.dialect.contains(field, &placeholder)
            },
            (Operator::Contains, value) => {
                let placeholder = self.bind(value.clone());
                self.dialect.contains(field, &placeholder)
            },
        }
    }

    /// ` WHERE a AND b`, or nothing for no filters.
    pub(super) fn where_clause(&mut self, filters: &[Filter]) -> String {
        if filters.is_empty() {
            return String::new();
        }
        let conditions: Vec<String> = filters.iter().map(|f| self.condition(f)).collect();
        format!(" WHERE {}", conditions.join(" AND "))
    }

    pub(super) fn finish(self, sql: String) -> QueryResult {
        QueryResult {
            sql,
            params: self.params,
        }
    }
}
