//! In-process record store.

use super::{QuestionFilter, RecordStore};
use crate::StoreError;
use crate::model::{Category, CategoryId, NewQuestion, Question, QuestionId};
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<CategoryId, Category>,
    questions: BTreeMap<QuestionId, Question>,
    /// Highest id ever handed out. Never decreases, so deleted ids stay retired.
    last_id: i64,
}

/// [`RecordStore`] held entirely in memory behind a `RwLock`.
///
/// Used by tests and by `trivia serve --memory`.
///
/// ```
/// use trivia_core::{MemoryStore, RecordStore, QuestionFilter};
///
/// let store = MemoryStore::with_categories(["Science", "Art"]);
/// assert_eq!(store.categories().unwrap().len(), 2);
/// assert!(store.questions(&QuestionFilter::all()).unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with categories numbered from 1 in order.
    #[must_use]
    pub fn with_categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tables = Tables::default();
        for (id, name) in (1_i64..).zip(names) {
            let id = CategoryId(id);
            tables.categories.insert(
                id,
                Category {
                    id,
                    kind: name.into(),
                },
            );
        }
        Self {
            tables: RwLock::new(tables),
        }
    }
}

impl RecordStore for MemoryStore {
    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::poisoned())?;
        Ok(tables.categories.values().cloned().collect())
    }

    fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::poisoned())?;
        Ok(tables.categories.get(&id).cloned())
    }

    fn questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::poisoned())?;
        Ok(tables
            .questions
            .values()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect())
    }

    fn question(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::poisoned())?;
        Ok(tables.questions.get(&id).cloned())
    }

    fn insert_question(&self, question: NewQuestion) -> Result<QuestionId, StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::poisoned())?;
        let next = tables
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::new("question id space exhausted"))?;
        tables.last_id = next;
        let id = QuestionId(next);
        tables.questions.insert(id, question.with_id(id));
        Ok(id)
    }

    fn delete_question(&self, id: QuestionId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::poisoned())?;
        Ok(tables.questions.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "answer".to_string(),
            category: CategoryId(category),
            difficulty: Difficulty::new(2).unwrap(),
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = MemoryStore::new();
        let a = store.insert_question(new_question("a", 1)).unwrap();
        let b = store.insert_question(new_question("b", 1)).unwrap();
        assert_eq!(a, QuestionId(1));
        assert_eq!(b, QuestionId(2));
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let store = MemoryStore::new();
        let a = store.insert_question(new_question("a", 1)).unwrap();
        let b = store.insert_question(new_question("b", 1)).unwrap();
        assert!(store.delete_question(b).unwrap());
        let c = store.insert_question(new_question("c", 1)).unwrap();
        assert!(c > b);
        assert!(store.question(a).unwrap().is_some());
        assert!(store.question(b).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let store = MemoryStore::new();
        assert!(!store.delete_question(QuestionId(42)).unwrap());
    }

    #[test]
    fn test_filtered_reads_are_ordered() {
        let store = MemoryStore::with_categories(["Science", "Art"]);
        for (text, cat) in [("c", 2), ("a", 1), ("b", 2)] {
            store.insert_question(new_question(text, cat)).unwrap();
        }
        let art = store
            .questions(&QuestionFilter::all().in_category(CategoryId(2)))
            .unwrap();
        let ids: Vec<_> = art.iter().map(|q| q.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_category_lookup() {
        let store = MemoryStore::with_categories(["Science", "Art"]);
        assert_eq!(
            store.category(CategoryId(2)).unwrap().map(|c| c.kind),
            Some("Art".to_string())
        );
        assert!(store.category(CategoryId(7)).unwrap().is_none());
    }
}
