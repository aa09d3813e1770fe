//! The record store seam.
//!
//! The service never touches a database directly; it reads and writes through
//! [`RecordStore`]. Implementations serialize concurrent calls themselves and
//! return records ordered by id ascending.

mod memory;

pub use memory::MemoryStore;

use crate::StoreError;
use crate::model::{Category, CategoryId, NewQuestion, Question, QuestionId};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Which questions a read should return.
///
/// An empty filter (the `Default`) matches every question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct QuestionFilter {
    /// Only questions referencing this category.
    pub category: Option<CategoryId>,
    /// Only questions whose text contains this term, ignoring case.
    pub text_contains: Option<String>,
    /// Questions to leave out.
    pub exclude: BTreeSet<QuestionId>,
}

impl QuestionFilter {
    /// Match every question.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one category.
    #[must_use]
    pub fn in_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Restrict to question texts containing `term` (case-insensitive).
    #[must_use]
    pub fn containing(mut self, term: impl Into<String>) -> Self {
        self.text_contains = Some(term.into());
        self
    }

    /// Leave out the given ids.
    #[must_use]
    pub fn excluding(mut self, ids: impl IntoIterator<Item = QuestionId>) -> Self {
        self.exclude.extend(ids);
        self
    }

    /// Evaluate the filter against one record.
    ///
    /// Stores that cannot push the filter down can use this directly.
    #[must_use]
    pub fn matches(&self, question: &Question) -> bool {
        if self.category.is_some_and(|c| c != question.category) {
            return false;
        }
        if self.exclude.contains(&question.id) {
            return false;
        }
        match &self.text_contains {
            Some(term) => contains_ignore_case(&question.question, term),
            None => true,
        }
    }
}

/// Case-insensitive substring check. An empty needle always matches.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Persistence collaborator holding questions and categories.
pub trait RecordStore: Send + Sync {
    /// All categories ordered by id.
    fn categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Look up one category. `Ok(None)` when the id is unknown.
    fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    /// Questions matching `filter`, ordered by id.
    fn questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError>;

    /// Look up one question. `Ok(None)` when the id is unknown.
    fn question(&self, id: QuestionId) -> Result<Option<Question>, StoreError>;

    /// Insert a question and return its newly assigned id.
    fn insert_question(&self, question: NewQuestion) -> Result<QuestionId, StoreError>;

    /// Delete a question. Returns `false` if it did not exist.
    fn delete_question(&self, id: QuestionId) -> Result<bool, StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        (**self).categories()
    }

    fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        (**self).category(id)
    }

    fn questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError> {
        (**self).questions(filter)
    }

    fn question(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        (**self).question(id)
    }

    fn insert_question(&self, question: NewQuestion) -> Result<QuestionId, StoreError> {
        (**self).insert_question(question)
    }

    fn delete_question(&self, id: QuestionId) -> Result<bool, StoreError> {
        (**self).delete_question(id)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        (**self).categories()
    }

    fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        (**self).category(id)
    }

    fn questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError> {
        (**self).questions(filter)
    }

    fn question(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        (**self).question(id)
    }

    fn insert_question(&self, question: NewQuestion) -> Result<QuestionId, StoreError> {
        (**self).insert_question(question)
    }

    fn delete_question(&self, id: QuestionId) -> Result<bool, StoreError> {
        (**self).delete_question(id)
    }
}
