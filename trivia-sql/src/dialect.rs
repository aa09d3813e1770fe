//! Postgres and `SQLite` syntax.
//!
//! | | Postgres | SQLite |
//! |-|----------|--------|
//! | placeholder | `$n` | `?n` |
//! | non-membership | `!= ALL($n)` over an array parameter | `NOT IN (SELECT value FROM json_each(?n))` over a JSON array parameter |
//! | substring | `ILIKE` | `LIKE` over [`FOLD_FUNCTION`] on both sides |
//! | auto id | `BIGSERIAL` | `INTEGER PRIMARY KEY AUTOINCREMENT` |
//!
//! Either way a list operand is one parameter, so its length never runs
//! into a bound-variable limit.

/// Escape character used in every generated `LIKE`/`ILIKE` pattern.
pub const LIKE_ESCAPE: char = '\\';

/// Name of the Unicode lower-casing SQL function the `SQLite` dialect
/// emits. [`SqliteStore`](crate::SqliteStore) registers it on its connection.
pub const FOLD_FUNCTION: &str = "fold";

/// Database-specific pieces of statement text.
pub trait Dialect: Copy {
    /// Placeholder for the `idx`-th parameter (1-based).
    fn param(&self, idx: usize) -> String;

    /// `field` is none of the values in the list bound at `placeholder`.
    fn not_in(&self, field: &str, placeholder: &str) -> String;

    /// Case-insensitive substring test of `field` against an escaped term.
    fn contains(&self, field: &str, placeholder: &str) -> String;

    /// Column type of an integer primary key whose values are never reused.
    fn auto_id_column(&self) -> &'static str;
}

/// Postgres dialect.
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::exhaustive_structs)] // zero-sized marker
pub struct Postgres;

impl Dialect for Postgres {
    fn param(&self, idx: usize) -> String {
        format!("${idx}")
    }

    fn not_in(&self, field: &str, placeholder: &str) -> String {
        format!("{field} != ALL({placeholder})")
    }

    fn contains(&self, field: &str, placeholder: &str) -> String {
        format!("{field} ILIKE '%' || {placeholder} || '%' ESCAPE '{LIKE_ESCAPE}'")
    }

    fn auto_id_column(&self) -> &'static str {
        "BIGSERIAL PRIMARY KEY"
    }
}

/// `SQLite` dialect.
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::exhaustive_structs)] // zero-sized marker
pub struct Sqlite;

impl Dialect for Sqlite {
    fn param(&self, idx: usize) -> String {
        format!("?{idx}")
    }

    fn not_in(&self, field: &str, placeholder: &str) -> String {
        format!("{field} NOT IN (SELECT value FROM json_each({placeholder}))")
    }

    // Built-in LIKE folds ASCII only
    fn contains(&self, field: &str, placeholder: &str) -> String {
        format!(
            "{FOLD_FUNCTION}({field}) LIKE '%' || {FOLD_FUNCTION}({placeholder}) || '%' ESCAPE '{LIKE_ESCAPE}'"
        )
    }

    fn auto_id_column(&self) -> &'static str {
        "INTEGER PRIMARY KEY AUTOINCREMENT"
    }
}

/// Escape `LIKE` wildcards so `term` matches literally.
///
/// ```
/// use trivia_sql::escape_like;
///
/// assert_eq!(escape_like("100%"), "100\\%");
/// assert_eq!(escape_like("snake_case"), "snake\\_case");
/// ```
#[must_use]
pub fn escape_like(term: &str) -> String {
    term.chars().fold(String::with_capacity(term.len()), |mut out, c| {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
        out
    })
}
