//! INSERT statements.

use crate::dialect::Dialect;
use crate::validate::assert_valid_sql_identifier;

use super::filter::Binder;
use super::types::{QueryResult, Value};

/// INSERT builder; one `VALUES` group per [`row`](Self::row).
#[derive(Debug)]
pub struct InsertBuilder<D: Dialect> {
    dialect: D,
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    returning: Option<String>,
}

impl<D: Dialect> InsertBuilder<D> {
    /// Start an INSERT into `table`.
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
            rows: Vec::new(),
            returning: None,
        }
    }

    /// Target columns; every row lists its values in this order.
    ///
    /// # Panics
    ///
    /// Panics if any column is not a valid SQL identifier.
    pub fn columns(mut self, columns: &[&str]) -> Self {
        for column in columns {
            assert_valid_sql_identifier(column, "column");
        }
        self.columns = columns.iter().map(|c| (*c).to_string()).collect();
        self
    }

    /// Append one row.
    pub fn row(mut self, values: Vec<Value>) -> Self {
        self.rows.push(values);
        self
    }

    /// Append several rows.
    pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<Value>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Return `column` of each inserted row (Postgres, `SQLite` 3.35+).
    ///
    /// # Panics
    ///
    /// Panics if `column` is not a valid SQL identifier.
    pub fn returning(mut self, column: &str) -> Self {
        assert_valid_sql_identifier(column, "returning column");
        self.returning = Some(column.to_string());
        self
    }

    /// Render the statement.
    pub fn build(self) -> QueryResult {
        let mut binder = Binder::new(self.dialect);
        let groups: Vec<String> = self
            .rows
            .into_iter()
            .map(|row| {
                let placeholders: Vec<String> = row.into_iter().map(|v| binder.bind(v)).collect();
                format!("({})", placeholders.join(", "))
            })
            .collect();

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            self.table,
            self.columns.join(", "),
            groups.join(", ")
        );
        if let Some(column) = &self.returning {
            sql.push_str(&format!(" RETURNING {column}"));
        }
        binder.finish(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Postgres, Sqlite};

    #[test]
    fn test_single_row_returning() {
        let result = InsertBuilder::new(Postgres, "questions")
            .columns(&["question", "answer"])
            .row(vec![Value::from("Q"), Value::from("A")])
            .returning("id")
            .build();
        assert_eq!(
            result.sql,
            "INSERT INTO questions (question, answer) VALUES ($1, $2) RETURNING id"
        );
        assert_eq!(result.params, vec![Value::from("Q"), Value::from("A")]);
    }

    #[test]
    fn test_numbering_continues_across_rows() {
        let result = InsertBuilder::new(Sqlite, "categories")
            .columns(&["id", "type"])
            .rows([
                vec![Value::Int(1), Value::from("Science")],
                vec![Value::Int(2), Value::from("Art")],
            ])
            .build();
        assert_eq!(
            result.sql,
            "INSERT INTO categories (id, type) VALUES (?1, ?2), (?3, ?4)"
        );
        assert_eq!(result.params[2], Value::Int(2));
        assert_eq!(result.params.len(), 4);
    }

    #[test]
    #[should_panic(expected = "Invalid SQL column name")]
    fn test_rejects_bad_column() {
        let _ = InsertBuilder::new(Sqlite, "questions").columns(&["answer)"]);
    }
}
