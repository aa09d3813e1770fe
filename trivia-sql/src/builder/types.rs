//! Values, operators and the finished statement.

/// Condition operators the record store needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Operator {
    /// `field = value`, or `field IS NULL` for [`Value::Null`]
    Eq,
    /// Not any element of a [`Value::Array`]; the whole list is one parameter
    NotIn,
    /// Case-insensitive substring match; `%`, `_` and `\` in the term are literal
    Contains,
}

/// A bound parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Value {
    /// SQL `NULL`
    Null,
    /// 64-bit integer
    Int(i64),
    /// Text
    String(String),
    /// List operand of `NotIn`: a Postgres array, a JSON array text for SQLite
    Array(Vec<Value>),
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// `ORDER BY` direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SortDir {
    /// Smallest first
    Asc,
    /// Largest first
    Desc,
}

impl SortDir {
    pub(crate) const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A condition waiting to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Filter {
    pub(crate) field: String,
    pub(crate) op: Operator,
    pub(crate) value: Value,
}

/// Statement text plus the parameters for its numbered placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
#[must_use = "a built statement does nothing until executed"]
pub struct QueryResult {
    /// Statement text.
    pub sql: String,
    /// Parameter `n` binds placeholder `n + 1`.
    pub params: Vec<Value>,
}
