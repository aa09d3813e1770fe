//! Statement builders. Values become numbered parameters; identifiers are
//! validated when they are handed over.

mod delete;
mod filter;
mod insert;
mod select;
mod types;

pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::QueryBuilder;
pub use types::{Operator, QueryResult, SortDir, Value};
