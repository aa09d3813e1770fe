//! No-repeat random quiz selection.
//!
//! A quiz session is owned by the caller: it keeps a [`PreviousQuestions`]
//! set, asks the [`QuizSelector`] for the next question, and records the
//! returned id before asking again. When every eligible question has been
//! served the selector reports [`Error::Exhausted`].
//!
//! ```
//! use trivia_core::quiz::{CategoryConstraint, PreviousQuestions, QuizSelector};
//! use trivia_core::random::SplitMix64;
//! use trivia_core::{MemoryStore, QuestionDraft, QuestionService};
//!
//! let service = QuestionService::new(MemoryStore::with_categories(["Art"]));
//! for text in ["Who painted Guernica?", "Who sculpted David?"] {
//!     service
//!         .create_question(QuestionDraft {
//!             question: Some(text.into()),
//!             answer: Some("Someone".into()),
//!             category: Some(1),
//!             difficulty: Some(2),
//!         })
//!         .unwrap();
//! }
//!
//! let selector = QuizSelector::new(service.store());
//! let mut rng = SplitMix64::new(7);
//! let mut previous = PreviousQuestions::new();
//! while let Ok(question) = selector.next_question(&previous, CategoryConstraint::AllCategories, &mut rng) {
//!     previous.insert(question.id);
//! }
//! assert_eq!(previous.len(), 2);
//! ```

use crate::Error;
use crate::model::{CategoryId, Question, QuestionId};
use crate::random::RandomSource;
use crate::store::{QuestionFilter, RecordStore};
use std::collections::BTreeSet;

/// Which categories a quiz draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_enums)] // all categories or exactly one
pub enum CategoryConstraint {
    /// Any category.
    AllCategories,
    /// Only the given category.
    Specific(CategoryId),
}

impl CategoryConstraint {
    /// Map a wire-level category id, where `0` means every category.
    #[must_use]
    pub const fn from_wire(id: i64) -> Self {
        if id == 0 {
            Self::AllCategories
        } else {
            Self::Specific(CategoryId(id))
        }
    }

    /// The constrained category, if any.
    #[must_use]
    pub const fn category(self) -> Option<CategoryId> {
        match self {
            Self::AllCategories => None,
            Self::Specific(id) => Some(id),
        }
    }
}

/// Ids already served in a quiz session.
///
/// The set only grows: there is no way to remove an id once inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviousQuestions {
    ids: BTreeSet<QuestionId>,
}

impl PreviousQuestions {
    /// Start an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a served question. Returns `false` if it was already recorded.
    pub fn insert(&mut self, id: QuestionId) -> bool {
        self.ids.insert(id)
    }

    /// Whether `id` was already served.
    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of served questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing has been served yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Served ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<QuestionId> for PreviousQuestions {
    fn from_iter<I: IntoIterator<Item = QuestionId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<QuestionId> for PreviousQuestions {
    fn extend<I: IntoIterator<Item = QuestionId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}

/// Picks the next quiz question uniformly among those not yet served.
#[derive(Debug, Clone, Copy)]
pub struct QuizSelector<S> {
    store: S,
}

impl<S: RecordStore> QuizSelector<S> {
    /// Create a selector reading from `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Choose one question matching `constraint` that is not in `previous`.
    ///
    /// Every eligible question is equally likely. Returns
    /// [`Error::Exhausted`] when none is left. `previous` is not modified.
    pub fn next_question<R: RandomSource>(
        &self,
        previous: &PreviousQuestions,
        constraint: CategoryConstraint,
        rng: &mut R,
    ) -> Result<Question, Error> {
        let mut filter = QuestionFilter::all().excluding(previous.iter());
        filter.category = constraint.category();

        let mut eligible = self.store.questions(&filter)?;
        let Some(index) = rng.below(eligible.len())? else {
            return Err(Error::Exhausted);
        };
        if index >= eligible.len() {
            return Err(Error::unprocessable("random index out of range"));
        }
        Ok(eligible.swap_remove(index))
    }
}
