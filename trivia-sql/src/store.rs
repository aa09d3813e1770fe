//! [`RecordStore`] over a single SQLite connection.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::functions::FunctionFlags;
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OptionalExtension, Row, params_from_iter};
use trivia_core::{
    Category, CategoryId, Difficulty, NewQuestion, Question, QuestionFilter, QuestionId,
    RecordStore, StoreError,
};

use crate::builder::{QueryResult, Value};
use crate::dialect::{FOLD_FUNCTION, Sqlite};
use crate::{queries, schema};

/// SQLite-backed record store.
///
/// The connection sits behind a `Mutex`; every call holds the lock for one
/// statement. Opening a store registers the [`FOLD_FUNCTION`] used by text
/// search, so matching folds case beyond ASCII.
///
/// ```
/// use trivia_core::{QuestionFilter, RecordStore};
/// use trivia_sql::SqliteStore;
///
/// let store = SqliteStore::open_in_memory().unwrap();
/// store.init(true).unwrap();
/// assert_eq!(store.categories().unwrap().len(), 6);
/// assert!(store.questions(&QuestionFilter::all()).unwrap().is_empty());
/// ```
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Connection::open(path)
            .map_err(store_error)
            .and_then(Self::from_connection)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Connection::open_in_memory()
            .map_err(store_error)
            .and_then(Self::from_connection)
    }

    /// Wrap an existing connection, registering the search function on it.
    pub fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.create_scalar_function(
            FOLD_FUNCTION,
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|text| text.to_lowercase())),
        )
        .map_err(store_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create missing tables and, when `seed` is set and no category exists
    /// yet, insert the default categories.
    ///
    /// Running it again on an initialized database changes nothing.
    pub fn init(&self, seed: bool) -> Result<(), StoreError> {
        let conn = self.lock()?;
        for ddl in schema::create_tables(Sqlite) {
            conn.execute(&ddl, []).map_err(store_error)?;
        }
        if seed {
            let existing: i64 = conn
                .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
                .map_err(store_error)?;
            if existing == 0 {
                execute(&conn, &schema::seed_categories(Sqlite))?;
            }
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::poisoned())
    }

    fn query_questions(&self, query: &QueryResult) -> Result<Vec<Question>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&query.sql).map_err(store_error)?;
        let rows = stmt
            .query_map(bind(&query.params)?, question_row)
            .map_err(store_error)?;
        let mut questions = Vec::new();
        for row in rows {
            questions.push(question_from(row.map_err(store_error)?)?);
        }
        Ok(questions)
    }

    fn query_categories(&self, query: &QueryResult) -> Result<Vec<Category>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&query.sql).map_err(store_error)?;
        let rows = stmt
            .query_map(bind(&query.params)?, |row| {
                Ok(Category {
                    id: CategoryId(row.get(0)?),
                    kind: row.get(1)?,
                })
            })
            .map_err(store_error)?;
        rows.collect::<Result<_, _>>().map_err(store_error)
    }
}

impl RecordStore for SqliteStore {
    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        self.query_categories(&queries::select_categories(Sqlite))
    }

    fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        self.query_categories(&queries::select_category(Sqlite, id))
            .map(|found| found.into_iter().next())
    }

    fn questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError> {
        self.query_questions(&queries::select_questions(Sqlite, filter))
    }

    fn question(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        let query = queries::select_question(Sqlite, id);
        let conn = self.lock()?;
        let row = conn
            .query_row(&query.sql, bind(&query.params)?, question_row)
            .optional()
            .map_err(store_error)?;
        row.map(question_from).transpose()
    }

    fn insert_question(&self, question: NewQuestion) -> Result<QuestionId, StoreError> {
        let query = queries::insert_question(Sqlite, &question);
        let conn = self.lock()?;
        conn.query_row(&query.sql, bind(&query.params)?, |row| row.get(0))
            .map(QuestionId)
            .map_err(store_error)
    }

    fn delete_question(&self, id: QuestionId) -> Result<bool, StoreError> {
        let query = queries::delete_question(Sqlite, id);
        let conn = self.lock()?;
        execute(&conn, &query).map(|changed| changed > 0)
    }
}

type QuestionRow = (i64, String, String, i64, i64);

fn question_row(row: &Row<'_>) -> rusqlite::Result<QuestionRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn question_from((id, question, answer, category, difficulty): QuestionRow) -> Result<Question, StoreError> {
    let difficulty = Difficulty::new(difficulty)
        .map_err(|e| StoreError::new(format!("question {id}: {}", e.message())))?;
    Ok(Question {
        id: QuestionId(id),
        question,
        answer,
        category: CategoryId(category),
        difficulty,
    })
}

fn execute(conn: &Connection, query: &QueryResult) -> Result<usize, StoreError> {
    conn.execute(&query.sql, bind(&query.params)?)
        .map_err(store_error)
}

/// Convert builder parameters into SQLite values.
///
/// Lists become JSON array text, read back by `json_each`.
fn bind(params: &[Value]) -> Result<rusqlite::ParamsFromIter<Vec<SqlValue>>, StoreError> {
    let values = params
        .iter()
        .map(|value| match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Int(n) => Ok(SqlValue::Integer(*n)),
            Value::String(s) => Ok(SqlValue::Text(s.clone())),
            Value::Array(_) => serde_json::to_string(&json_value(value))
                .map(SqlValue::Text)
                .map_err(|e| StoreError::new(format!("list parameter: {e}"))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(params_from_iter(values))
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Int(n) => serde_json::Value::from(*n),
        Value::String(s) => serde_json::Value::from(s.as_str()),
        Value::Array(items) => items.iter().map(json_value).collect(),
        Value::Null => serde_json::Value::Null,
    }
}

fn store_error(err: rusqlite::Error) -> StoreError {
    StoreError::new(err.to_string())
}
