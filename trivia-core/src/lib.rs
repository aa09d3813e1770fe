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
#![allow(clippy::doc_markdown)] // Field names in docs
#![allow(clippy::must_use_candidate)] // Not all returned values need must_use
#![allow(clippy::return_self_not_must_use)] // Builder pattern returns Self
#![allow(clippy::cast_possible_truncation)] // u64 -> usize after a bounded modulo
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy

//! trivia-core - questions, categories and quizzes
//!
//! # Overview
//!
//! The domain half of the trivia service, with no transport attached:
//!
//! - [`pagination`] slices ordered results into fixed-size pages
//! - [`QuestionService`] lists, searches, creates and deletes questions
//! - [`quiz`] draws random questions without repeats
//! - [`RecordStore`] is the persistence seam; [`MemoryStore`] implements it
//!   in process, `trivia-sql` implements it over SQLite
//!
//! Every operation returns `Result<_, Error>`, where [`Error`] names exactly
//! one failure kind.
//!
//! ```text
//! ┌──────────────────┐     ┌─────────────────┐
//! │ QuestionService  │     │  QuizSelector   │
//! │  (pagination)    │     │ (RandomSource)  │
//! └────────┬─────────┘     └────────┬────────┘
//!          └──────────┬─────────────┘
//!                     ↓
//!            ┌─────────────────┐
//!            │   RecordStore   │  MemoryStore | SqliteStore
//!            └─────────────────┘
//! ```

mod error;
pub mod model;
pub mod pagination;
pub mod quiz;
pub mod random;
pub mod service;
pub mod store;

pub use error::{Error, StoreError};
pub use model::{Category, CategoryId, Difficulty, NewQuestion, Question, QuestionDraft, QuestionId};
pub use pagination::{Page, QUESTIONS_PER_PAGE, paginate, parse_page};
pub use quiz::{CategoryConstraint, PreviousQuestions, QuizSelector};
pub use random::{OsRandom, RandomSource, SplitMix64};
pub use service::{CategoryListing, Mutation, QuestionListing, QuestionService};
pub use store::{MemoryStore, QuestionFilter, RecordStore};

// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
