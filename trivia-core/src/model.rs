//! Question and category records.

use crate::Error;

/// Identifier of a [`Question`], assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(clippy::exhaustive_structs)] // transparent newtype
pub struct QuestionId(pub i64);

/// Identifier of a [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(clippy::exhaustive_structs)] // transparent newtype
pub struct CategoryId(pub i64);

impl QuestionId {
    /// The raw integer value.
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl CategoryId {
    /// The raw integer value.
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Difficulty score, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Difficulty {
    /// Easiest score.
    pub const MIN: u8 = 1;
    /// Hardest score.
    pub const MAX: u8 = 5;

    /// Build a difficulty, rejecting values outside `MIN..=MAX`.
    pub fn new(value: i64) -> Result<Self, Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or_else(|| {
                Error::bad_request(format!(
                    "difficulty must be between {} and {}, got {value}",
                    Self::MIN,
                    Self::MAX
                ))
            })
    }

    /// The score as an integer.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// A trivia question.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)] // rebuilt from rows by every store
pub struct Question {
    /// Store-assigned identifier.
    pub id: QuestionId,
    /// Question text.
    pub question: String,
    /// Answer text.
    pub answer: String,
    /// May reference a category that no longer exists.
    pub category: CategoryId,
    /// Difficulty score.
    pub difficulty: Difficulty,
}

/// A question category. `kind` is the display name ("Science", "Art", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Category {
    /// Category identifier.
    pub id: CategoryId,
    /// Display name.
    pub kind: String,
}

/// A validated question waiting for the store to assign an id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)] // built by stores and tests
pub struct NewQuestion {
    /// Question text, non-blank.
    pub question: String,
    /// Answer text, non-blank.
    pub answer: String,
    /// Positive category id; not checked against the category table.
    pub category: CategoryId,
    /// Difficulty score.
    pub difficulty: Difficulty,
}

impl NewQuestion {
    /// Attach a store-assigned id.
    #[must_use]
    pub fn with_id(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Unvalidated create input, as decoded from a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)] // filled field by field by the HTTP layer
pub struct QuestionDraft {
    /// `question` member, if present.
    pub question: Option<String>,
    /// `answer` member, if present.
    pub answer: Option<String>,
    /// `category` member as an integer, if present.
    pub category: Option<i64>,
    /// `difficulty` member, if present; range is checked by `validate`.
    pub difficulty: Option<i64>,
}

impl QuestionDraft {
    /// Check that every field is present and in range.
    ///
    /// The category reference is not resolved here; dangling references are
    /// accepted.
    pub fn validate(self) -> Result<NewQuestion, Error> {
        let question = required_text(self.question, "question")?;
        let answer = required_text(self.answer, "answer")?;
        let category = self.category.ok_or_else(|| Error::missing("category"))?;
        if category <= 0 {
            return Err(Error::bad_request(format!(
                "category must be a positive id, got {category}"
            )));
        }
        let difficulty = self
            .difficulty
            .ok_or_else(|| Error::missing("difficulty"))
            .and_then(Difficulty::new)?;

        Ok(NewQuestion {
            question,
            answer,
            category: CategoryId(category),
            difficulty,
        })
    }
}

fn required_text(value: Option<String>, field: &str) -> Result<String, Error> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(Error::bad_request(format!("`{field}` must not be empty"))),
        None => Err(Error::missing(field)),
    }
}
