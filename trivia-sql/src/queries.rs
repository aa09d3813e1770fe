//! Statements behind each [`RecordStore`](trivia_core::RecordStore) operation.
//!
//! Every function is generic over the dialect, so the same statement can be
//! executed against SQLite and rendered for Postgres.

use trivia_core::{CategoryId, NewQuestion, QuestionFilter, QuestionId};

use crate::builder::{DeleteBuilder, InsertBuilder, Operator, QueryBuilder, QueryResult, SortDir, Value};
use crate::dialect::Dialect;
use crate::schema::{CATEGORIES, CATEGORY_COLUMNS, QUESTION_COLUMNS, QUESTIONS};

/// All categories by id.
pub fn select_categories<D: Dialect>(dialect: D) -> QueryResult {
    QueryBuilder::new(dialect, CATEGORIES)
        .fields(&CATEGORY_COLUMNS)
        .sort("id", SortDir::Asc)
        .build()
}

/// One category by id.
pub fn select_category<D: Dialect>(dialect: D, id: CategoryId) -> QueryResult {
    QueryBuilder::new(dialect, CATEGORIES)
        .fields(&CATEGORY_COLUMNS)
        .filter("id", Operator::Eq, Value::Int(id.get()))
        .build()
}

/// Questions matching `filter`, by id.
pub fn select_questions<D: Dialect>(dialect: D, filter: &QuestionFilter) -> QueryResult {
    apply_filter(
        QueryBuilder::new(dialect, QUESTIONS).fields(&QUESTION_COLUMNS),
        filter,
    )
    .sort("id", SortDir::Asc)
    .build()
}

/// One question by id.
pub fn select_question<D: Dialect>(dialect: D, id: QuestionId) -> QueryResult {
    QueryBuilder::new(dialect, QUESTIONS)
        .fields(&QUESTION_COLUMNS)
        .filter("id", Operator::Eq, Value::Int(id.get()))
        .build()
}

/// Insert a question and return its assigned id.
pub fn insert_question<D: Dialect>(dialect: D, question: &NewQuestion) -> QueryResult {
    InsertBuilder::new(dialect, QUESTIONS)
        .columns(&["question", "answer", "category", "difficulty"])
        .row(vec![
            Value::from(question.question.as_str()),
            Value::from(question.answer.as_str()),
            Value::Int(question.category.get()),
            Value::Int(i64::from(question.difficulty.get())),
        ])
        .returning("id")
        .build()
}

/// Delete a question by id.
pub fn delete_question<D: Dialect>(dialect: D, id: QuestionId) -> QueryResult {
    DeleteBuilder::new(dialect, QUESTIONS)
        .filter("id", Operator::Eq, Value::Int(id.get()))
        .build()
}

fn apply_filter<D: Dialect>(mut query: QueryBuilder<D>, filter: &QuestionFilter) -> QueryBuilder<D> {
    if let Some(category) = filter.category {
        query = query.filter("category", Operator::Eq, Value::Int(category.get()));
    }
    if let Some(term) = &filter.text_contains {
        query = query.filter("question", Operator::Contains, Value::from(term.as_str()));
    }
    if !filter.exclude.is_empty() {
        let ids = filter.exclude.iter().map(|id| Value::Int(id.get())).collect();
        query = query.filter("id", Operator::NotIn, Value::Array(ids));
    }
    query
}
