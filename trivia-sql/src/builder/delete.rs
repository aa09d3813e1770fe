//! DELETE statements.

use crate::dialect::Dialect;
use crate::validate::assert_valid_sql_identifier;

use super::filter::Binder;
use super::types::{Filter, Operator, QueryResult, Value};

/// DELETE builder. With no conditions the statement empties the table.
#[derive(Debug)]
pub struct DeleteBuilder<D: Dialect> {
    dialect: D,
    table: String,
    filters: Vec<Filter>,
}

impl<D: Dialect> DeleteBuilder<D> {
    /// Start a DELETE from `table`.
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
            filters: Vec::new(),
        }
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

    /// Render the statement.
    pub fn build(self) -> QueryResult {
        let mut binder = Binder::new(self.dialect);
        let sql = format!("DELETE FROM {}{}", self.table, binder.where_clause(&self.filters));
        binder.finish(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Postgres, Sqlite};

    #[test]
    fn test_delete_by_id() {
        let result = DeleteBuilder::new(Sqlite, "questions")
            .filter("id", Operator::Eq, Value::Int(7))
            .build();
        assert_eq!(result.sql, "DELETE FROM questions WHERE id = ?1");
        assert_eq!(result.params, vec![Value::Int(7)]);
    }

    #[test]
    fn test_delete_all_but() {
        let keep = Value::Array(vec![Value::Int(3), Value::Int(5)]);
        let result = DeleteBuilder::new(Postgres, "questions")
            .filter("id", Operator::NotIn, keep)
            .build();
        assert_eq!(result.sql, "DELETE FROM questions WHERE id != ALL($1)");
    }

    #[test]
    fn test_delete_all() {
        assert_eq!(DeleteBuilder::new(Sqlite, "questions").build().sql, "DELETE FROM questions");
    }
}
