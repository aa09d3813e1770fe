//! SELECT statements.

use crate::dialect::Dialect;
use crate::validate::assert_valid_sql_identifier;

use super::filter::Binder;
use super::types::{Filter, Operator, QueryResult, SortDir, Value};

/// SELECT builder.
///
/// Conditions are joined with `AND`; values always travel as parameters.
#[derive(Debug)]
pub struct QueryBuilder<D: Dialect> {
    dialect: D,
    table: String,
    columns: Vec<String>,
    filters: Vec<Filter>,
    order: Vec<(String, SortDir)>,
}

impl<D: Dialect> QueryBuilder<D> {
    /// Start a SELECT on `table`.
    ///
    /// # Panics
    ///
    /// Panics if `table` is not a valid SQL identifier.
    pub fn new(dialect: D, table: impl Into<String>) -> Self {
        let table = table.into();
        assert_valid_sql_identifier(&table, "table");
        Self {
            dialect,
            table,
            columns: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Columns to return, in order. Without them the statement selects `*`.
    ///
    /// # Panics
    ///
    /// Panics if any column is not a valid SQL identifier.
    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.columns = fields
            .iter()
            .map(|field| {
                assert_valid_sql_identifier(field, "field");
                (*field).to_string()
            })
            .collect();
        self
    }

    /// Add a condition.
    ///
    /// # Panics
    ///
    /// Panics if `field` is not a valid SQL identifier.
    pub fn filter(mut self, field: impl Into<String>, op: Operator, value: Value) -> Self {
        let field = field.into();
        assert_valid_sql_identifier(&field, "filter field");
        self.filters.push(Filter { field, op, value });
        self
    }

    /// Append an `ORDER BY` key.
    ///
    /// # Panics
    ///
    /// Panics if `field` is not a valid SQL identifier.
    pub fn sort(mut self, field: impl Into<String>, dir: SortDir) -> Self {
        let field = field.into();
        assert_valid_sql_identifier(&field, "sort field");
        self.order.push((field, dir));
        self
    }

    /// Render the statement.
    pub fn build(self) -> QueryResult {
        let projection = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };

        let mut binder = Binder::new(self.dialect);
        let mut sql = format!("SELECT {projection} FROM {}", self.table);
        sql.push_str(&binder.where_clause(&self.filters));

        if !self.order.is_empty() {
            let keys: Vec<String> = self
                .order
                .iter()
                .map(|(field, dir)| format!("{field} {}", dir.keyword()))
                .collect();
            sql.push_str(&format!(" ORDER BY {}", keys.join(", ")));
        }

        binder.finish(sql)
    }
}
