// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // SQLite/Postgres names in docs
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::missing_panics_doc)] // # Panics sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self
#![allow(clippy::must_use_candidate)] // Builder methods - fluent API doesn't need must_use
#![allow(clippy::format_push_string)] // String building style preference

//! # trivia-sql - SQL storage for the trivia service
//!
//! A small parameterized SQL builder with Postgres and `SQLite` dialects, the
//! trivia schema, and [`SqliteStore`], a
//! [`RecordStore`](trivia_core::RecordStore) that executes the generated
//! statements through `rusqlite`.
//!
//! ## Building statements
//!
//! ```
//! # use trivia_sql::prelude::*;
//! let result = sqlite("questions")
//!     .fields(&["id", "question"])
//!     .filter("category", Operator::Eq, Value::Int(3))
//!     .filter("question", Operator::Contains, Value::from("what"))
//!     .sort("id", SortDir::Asc)
//!     .build();
//!
//! assert_eq!(
//!     result.sql,
//!     "SELECT id, question FROM questions WHERE category = ?1 \
//!      AND fold(question) LIKE '%' || fold(?2) || '%' ESCAPE '\\' ORDER BY id ASC"
//! );
//! assert_eq!(result.params.len(), 2);
//! ```
//!
//! ## Supported operators
//!
//! | Operator | Postgres | SQLite |
//! |----------|----------|--------|
//! | `Eq` | `= $1` (`IS NULL` for `Null`) | `= ?1` |
//! | `NotIn` | `!= ALL($1)` | `NOT IN (SELECT value FROM json_each(?1))` |
//! | `Contains` | `ILIKE '%' \|\| $1 \|\| '%'` | `fold(f) LIKE '%' \|\| fold(?1) \|\| '%'` |
//!
//! `Contains` escapes `%`, `_` and `\` in the term so they match literally.
//! `NotIn` binds its whole list as one parameter, however long.
//! SQLite's built-in `LIKE` folds ASCII letters only, so the `SQLite` dialect
//! lower-cases both sides with [`FOLD_FUNCTION`], which [`SqliteStore`]
//! registers on its connection.
//!
//! ## Security
//!
//! Values are always bound as parameters. Table and column names are checked
//! with [`assert_valid_sql_identifier`] when handed to a builder.

pub mod builder;
mod dialect;
pub mod queries;
pub mod schema;
mod store;
mod validate;

pub use builder::{DeleteBuilder, InsertBuilder, Operator, QueryBuilder, QueryResult, SortDir, Value};
pub use dialect::{Dialect, FOLD_FUNCTION, LIKE_ESCAPE, Postgres, Sqlite, escape_like};
pub use store::SqliteStore;
pub use validate::{assert_valid_sql_identifier, is_valid_sql_identifier};

/// Start a Postgres SELECT.
pub fn postgres(table: impl Into<String>) -> QueryBuilder<Postgres> {
    QueryBuilder::new(Postgres, table)
}

/// Start a `SQLite` SELECT.
pub fn sqlite(table: impl Into<String>) -> QueryBuilder<Sqlite> {
    QueryBuilder::new(Sqlite, table)
}

/// Common imports.
pub mod prelude {
    pub use crate::{
        Dialect, Operator, Postgres, QueryBuilder, QueryResult, SortDir, Sqlite, SqliteStore,
        Value, postgres, sqlite,
    };
}

// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================

#[cfg(test)]
mod api_contracts {
    use static_assertions::assert_impl_all;

    // The store is shared across request threads
    assert_impl_all!(crate::SqliteStore: Send, Sync, trivia_core::RecordStore, std::fmt::Debug);

    // Dialects are zero-sized markers
    assert_impl_all!(crate::Postgres: Copy, Default, std::fmt::Debug);
    assert_impl_all!(crate::Sqlite: Copy, Default, std::fmt::Debug);

    // Generated statements can be compared in tests
    assert_impl_all!(crate::QueryResult: Clone, PartialEq, std::fmt::Debug);
    assert_impl_all!(crate::Value: Clone, Eq, std::fmt::Debug);
}
