//! Table layout and seed data.

use crate::builder::{InsertBuilder, QueryResult, Value};
use crate::dialect::Dialect;

/// Category table name.
pub const CATEGORIES: &str = "categories";
/// Question table name.
pub const QUESTIONS: &str = "questions";

/// Columns read for every category row, in row order.
pub const CATEGORY_COLUMNS: [&str; 2] = ["id", "type"];
/// Columns read for every question row, in row order.
pub const QUESTION_COLUMNS: [&str; 5] = ["id", "question", "answer", "category", "difficulty"];

/// Category names seeded by `trivia init`, numbered from 1.
pub const SEED_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// `CREATE TABLE IF NOT EXISTS` statements for both tables.
///
/// Question ids come from an auto-increment column so deleted ids are never
/// handed out again.
pub fn create_tables<D: Dialect>(dialect: D) -> [String; 2] {
    [
        format!("CREATE TABLE IF NOT EXISTS {CATEGORIES} (id INTEGER PRIMARY KEY, type TEXT NOT NULL)"),
        format!(
            "CREATE TABLE IF NOT EXISTS {QUESTIONS} (id {}, question TEXT NOT NULL, answer TEXT NOT NULL, category INTEGER NOT NULL, difficulty INTEGER NOT NULL)",
            dialect.auto_id_column()
        ),
    ]
}

/// Multi-row insert of [`SEED_CATEGORIES`] with explicit ids.
pub fn seed_categories<D: Dialect>(dialect: D) -> QueryResult {
    let rows = (1_i64..)
        .zip(SEED_CATEGORIES)
        .map(|(id, name)| vec![Value::Int(id), Value::from(name)]);
    InsertBuilder::new(dialect, CATEGORIES)
        .columns(&CATEGORY_COLUMNS)
        .rows(rows)
        .build()
}
