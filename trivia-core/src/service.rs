//! Question query service.
//!
//! Every operation reads through the [`RecordStore`] on each call. Nothing is
//! cached between calls, so a mutation is visible to the very next read.

use crate::Error;
use crate::model::{Category, CategoryId, Question, QuestionDraft, QuestionId};
use crate::pagination::{Page, QUESTIONS_PER_PAGE};
use crate::store::{QuestionFilter, RecordStore};

/// Result of listing every question.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct QuestionListing {
    /// The requested page of questions.
    pub page: Page<Question>,
    /// Display names of every category, ordered by category id.
    pub categories: Vec<String>,
}

/// Result of listing one category's questions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CategoryListing {
    /// The requested page of questions in the category.
    pub page: Page<Question>,
    /// The resolved category.
    pub category: Category,
}

/// Result of a create or delete: the affected id and a fresh page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Mutation {
    /// Id of the created or deleted question.
    pub id: QuestionId,
    /// Re-read page of all questions after the change.
    pub page: Page<Question>,
}

/// Read and write operations over questions and categories.
///
/// # Example
///
/// ```
/// use trivia_core::{MemoryStore, QuestionDraft, QuestionService};
///
/// let service = QuestionService::new(MemoryStore::with_categories(["Science"]));
/// let created = service
///     .create_question(QuestionDraft {
///         question: Some("What is H2O?".into()),
///         answer: Some("Water".into()),
///         category: Some(1),
///         difficulty: Some(1),
///     })
///     .unwrap();
/// assert_eq!(created.page.total, 1);
///
/// let found = service.search_questions(Some("h2o"), 1).unwrap();
/// assert_eq!(found.items[0].id, created.id);
/// ```
#[derive(Debug, Clone)]
pub struct QuestionService<S> {
    store: S,
    page_size: usize,
}

impl<S: RecordStore> QuestionService<S> {
    /// Create a service with the default page size.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            page_size: QUESTIONS_PER_PAGE,
        }
    }

    /// Override the page size. Zero is raised to one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Configured page size.
    #[inline]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// The underlying store.
    #[inline]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Display names of all categories, ordered by id.
    ///
    /// `NotFound` when no category exists.
    pub fn list_categories(&self) -> Result<Vec<String>, Error> {
        let categories = self.store.categories()?;
        if categories.is_empty() {
            return Err(Error::not_found("no categories"));
        }
        Ok(categories.into_iter().map(|c| c.kind).collect())
    }

    /// Resolve one category. `NotFound` when it does not exist.
    pub fn category(&self, id: CategoryId) -> Result<Category, Error> {
        self.store
            .category(id)?
            .ok_or_else(|| Error::not_found(format!("category {id} does not exist")))
    }

    /// One page of all questions plus every category name.
    ///
    /// `NotFound` when the page is empty, which includes an empty store.
    pub fn list_questions(&self, page: u32) -> Result<QuestionListing, Error> {
        let page = self.page_of(&QuestionFilter::all(), page)?;
        if page.is_empty() {
            return Err(Error::not_found(format!("no questions on page {}", page.page)));
        }
        let categories = self
            .store
            .categories()?
            .into_iter()
            .map(|c| c.kind)
            .collect();
        Ok(QuestionListing { page, categories })
    }

    /// Questions whose text contains `term`, ignoring case.
    ///
    /// `BadRequest` when no term was supplied; `NotFound` when the page is empty.
    pub fn search_questions(&self, term: Option<&str>, page: u32) -> Result<Page<Question>, Error> {
        let term = term.ok_or_else(|| Error::missing("searchTerm"))?;
        let page = self.page_of(&QuestionFilter::all().containing(term), page)?;
        if page.is_empty() {
            return Err(Error::not_found(format!(
                "no questions matching \"{term}\" on page {}",
                page.page
            )));
        }
        Ok(page)
    }

    /// One page of the questions in a category.
    ///
    /// `NotFound` when the category does not resolve or the page is empty.
    pub fn questions_in_category(
        &self,
        category: CategoryId,
        page: u32,
    ) -> Result<CategoryListing, Error> {
        let category = self.category(category)?;
        let page = self.page_of(&QuestionFilter::all().in_category(category.id), page)?;
        if page.is_empty() {
            return Err(Error::not_found(format!(
                "no questions in category {} on page {}",
                category.id, page.page
            )));
        }
        Ok(CategoryListing { page, category })
    }

    /// Validate and insert a question, then return the first page.
    pub fn create_question(&self, draft: QuestionDraft) -> Result<Mutation, Error> {
        let question = draft.validate()?;
        let id = self.store.insert_question(question)?;
        let page = self.page_of(&QuestionFilter::all(), 1)?;
        Ok(Mutation { id, page })
    }

    /// Delete a question, then return the requested page re-read from the store.
    ///
    /// `NotFound` when the question does not exist. An empty page after the
    /// delete is not an error.
    pub fn delete_question(&self, id: QuestionId, page: u32) -> Result<Mutation, Error> {
        if !self.store.delete_question(id)? {
            return Err(Error::not_found(format!("question {id} does not exist")));
        }
        let page = self.page_of(&QuestionFilter::all(), page)?;
        Ok(Mutation { id, page })
    }

    fn page_of(&self, filter: &QuestionFilter, page: u32) -> Result<Page<Question>, Error> {
        let all = self.store.questions(filter)?;
        Ok(Page::from_all(&all, page, self.page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, NewQuestion};
    use crate::store::MemoryStore;

    fn seeded(count: i64) -> QuestionService<MemoryStore> {
        let store = MemoryStore::with_categories(["Science", "Art", "Geography"]);
        for n in 1..=count {
            store
                .insert_question(NewQuestion {
                    question: format!("Question number {n}?"),
                    answer: format!("Answer {n}"),
                    category: CategoryId(n % 3 + 1),
                    difficulty: Difficulty::new(n % 5 + 1).unwrap(),
                })
                .unwrap();
        }
        QuestionService::new(store)
    }

    fn draft(text: &str) -> QuestionDraft {
        QuestionDraft {
            question: Some(text.to_string()),
            answer: Some("yes".to_string()),
            category: Some(1),
            difficulty: Some(3),
        }
    }

    #[test]
    fn test_list_categories() {
        let service = seeded(0);
        assert_eq!(
            service.list_categories().unwrap(),
            vec!["Science", "Art", "Geography"]
        );
    }

    #[test]
    fn test_list_categories_empty_is_not_found() {
        let service = QuestionService::new(MemoryStore::new());
        assert!(matches!(
            service.list_categories(),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_list_questions_pages() {
        let service = seeded(25);
        let first = service.list_questions(1).unwrap();
        assert_eq!(first.page.items.len(), 10);
        assert_eq!(first.page.total, 25);
        assert_eq!(first.categories.len(), 3);
        assert_eq!(first.page.items[0].id, QuestionId(1));

        let third = service.list_questions(3).unwrap();
        assert_eq!(third.page.items.len(), 5);
        assert_eq!(third.page.items[0].id, QuestionId(21));
    }

    #[test]
    fn test_empty_store_is_not_found() {
        let service = seeded(0);
        assert!(matches!(
            service.list_questions(1),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_page_past_end_is_not_found() {
        let service = seeded(10);
        assert!(service.list_questions(1).is_ok());
        assert!(matches!(
            service.list_questions(2),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_custom_page_size() {
        let service = seeded(7).with_page_size(3);
        assert_eq!(service.page_size(), 3);
        assert_eq!(service.list_questions(3).unwrap().page.items.len(), 1);
        assert_eq!(seeded(1).with_page_size(0).page_size(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let service = seeded(0);
        let id = service
            .create_question(draft("What is the capital of France?"))
            .unwrap()
            .id;
        service.create_question(draft("Who wrote Hamlet?")).unwrap();

        let found = service.search_questions(Some("what is"), 1).unwrap();
        assert_eq!(found.total, 1);
        assert_eq!(found.items[0].id, id);
    }

    #[test]
    fn test_search_requires_term() {
        let service = seeded(3);
        assert_eq!(
            service.search_questions(None, 1).unwrap_err(),
            Error::missing("searchTerm")
        );
    }

    #[test]
    fn test_search_without_matches_is_not_found() {
        let service = seeded(3);
        assert!(matches!(
            service.search_questions(Some("zebra"), 1),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_questions_in_category() {
        let service = seeded(9);
        let listing = service.questions_in_category(CategoryId(2), 1).unwrap();
        assert_eq!(listing.category.kind, "Art");
        assert_eq!(listing.page.total, 3);
        assert!(
            listing
                .page
                .items
                .iter()
                .all(|q| q.category == CategoryId(2))
        );
        let ids: Vec<_> = listing.page.items.iter().map(|q| q.id.get()).collect();
        assert_eq!(ids, vec![1, 4, 7]);
    }

    #[test]
    fn test_unknown_category_is_not_found() {
        let service = seeded(9);
        assert!(matches!(
            service.questions_in_category(CategoryId(99), 1),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_category_without_questions_is_not_found() {
        let store = MemoryStore::with_categories(["Science", "Art"]);
        let service = QuestionService::new(store);
        service.create_question(draft("Only science?")).unwrap();
        assert!(matches!(
            service.questions_in_category(CategoryId(2), 1),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_create_then_list_includes_once() {
        let service = seeded(4);
        let before = service.list_questions(1).unwrap().page.total;
        let created = service.create_question(draft("New one?")).unwrap();
        assert_eq!(created.page.total, before + 1);

        let listing = service.list_questions(1).unwrap();
        let hits = listing
            .page
            .items
            .iter()
            .filter(|q| q.id == created.id)
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_create_validates() {
        let service = seeded(0);
        let err = service
            .create_question(QuestionDraft {
                difficulty: None,
                ..draft("x")
            })
            .unwrap_err();
        assert_eq!(err, Error::missing("difficulty"));
        assert!(matches!(service.list_questions(1), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_delete_then_list_excludes() {
        let service = seeded(5);
        let deleted = service.delete_question(QuestionId(3), 1).unwrap();
        assert_eq!(deleted.id, QuestionId(3));
        assert_eq!(deleted.page.total, 4);
        assert!(deleted.page.items.iter().all(|q| q.id != QuestionId(3)));

        let listing = service.list_questions(1).unwrap();
        assert!(listing.page.items.iter().all(|q| q.id != QuestionId(3)));
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let service = seeded(2);
        assert!(matches!(
            service.delete_question(QuestionId(77), 1),
            Err(Error::NotFound { .. })
        ));
        assert_eq!(service.list_questions(1).unwrap().page.total, 2);
    }

    #[test]
    fn test_delete_last_question_returns_empty_page() {
        let service = seeded(1);
        let deleted = service.delete_question(QuestionId(1), 1).unwrap();
        assert!(deleted.page.is_empty());
        assert_eq!(deleted.page.total, 0);
    }
}
