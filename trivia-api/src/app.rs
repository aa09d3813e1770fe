//! The trivia application: service, random source and route table.

use std::sync::Mutex;

use trivia_core::{
    CategoryConstraint, Error, OsRandom, PreviousQuestions, Question, QuestionService,
    QuizSelector, RandomSource, RecordStore,
};

use crate::handlers;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Everything a request needs, shared by all requests.
///
/// ```
/// use trivia_api::{App, Method, Request};
/// use trivia_core::MemoryStore;
///
/// let app = App::new(MemoryStore::with_categories(["Science", "Art"]));
/// let resp = app.handle(Request::new(Method::Get, "/categories".into(), vec![], None));
/// assert_eq!(resp.status(), 200);
/// assert_eq!(resp.text(), Some(r#"{"categories":["Science","Art"],"success":true}"#));
/// ```
pub struct App<S> {
    service: QuestionService<S>,
    rng: Mutex<Box<dyn RandomSource + Send>>,
    router: Router<Self>,
}

impl<S: std::fmt::Debug> std::fmt::Debug for App<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("service", &self.service)
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

impl<S: RecordStore> App<S> {
    /// App over `store` with the default page size and OS entropy.
    pub fn new(store: S) -> Self {
        Self {
            service: QuestionService::new(store),
            rng: Mutex::new(Box::new(OsRandom)),
            router: handlers::routes(),
        }
    }

    /// Override the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.service = self.service.with_page_size(page_size);
        self
    }

    /// Replace the random source, e.g. with a seeded
    /// [`SplitMix64`](trivia_core::SplitMix64) for reproducible quizzes.
    #[must_use]
    pub fn with_rng(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    /// The question service.
    #[inline]
    pub const fn service(&self) -> &QuestionService<S> {
        &self.service
    }

    /// The route table.
    #[inline]
    pub const fn router(&self) -> &Router<Self> {
        &self.router
    }

    /// Route and answer one request.
    pub fn handle(&self, req: Request) -> Response {
        self.router.dispatch(self, req)
    }

    /// Pick the next quiz question with the app's random source.
    pub fn next_question(
        &self,
        previous: &PreviousQuestions,
        constraint: CategoryConstraint,
    ) -> Result<Question, Error> {
        let mut guard = self
            .rng
            .lock()
            .map_err(|_| Error::unprocessable("random source lock poisoned"))?;
        let mut rng: &mut (dyn RandomSource + Send) = &mut **guard;
        QuizSelector::new(self.service.store()).next_question(previous, constraint, &mut rng)
    }
}
