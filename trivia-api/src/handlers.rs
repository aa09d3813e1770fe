//! The trivia endpoints.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET    | `/categories` | [`list_categories`] |
//! | GET    | `/questions?page=` | [`list_questions`] |
//! | POST   | `/questions` | [`create_question`] |
//! | DELETE | `/questions/{id}?page=` | [`delete_question`] |
//! | POST   | `/search_questions?page=` | [`search_questions`] |
//! | GET    | `/categories/{id}/questions?page=` | [`questions_in_category`] |
//! | POST   | `/quizzes` | [`next_quiz_question`] |
//!
//! Handlers only translate between JSON and the service; every rule about
//! what succeeds lives in `trivia_core`.

use trivia_core::{
    CategoryConstraint, CategoryId, Error, Page, PreviousQuestions, Question, QuestionDraft,
    QuestionId, RecordStore, parse_page,
};

use crate::app::App;
use crate::json::{self, JsonValue, ToJson};
use crate::request::{Method, Request};
use crate::response::Response;
use crate::router::Router;

/// The route table for [`App`].
pub fn routes<S: RecordStore>() -> Router<App<S>> {
    Router::new()
        .route(Method::Get, "/categories", list_categories)
        .route(Method::Get, "/questions", list_questions)
        .route(Method::Post, "/questions", create_question)
        .route(Method::Delete, "/questions/{id}", delete_question)
        .route(Method::Post, "/search_questions", search_questions)
        .route(Method::Get, "/categories/{id}/questions", questions_in_category)
        .route(Method::Post, "/quizzes", next_quiz_question)
}

/// `{"categories": [name, ...]}`
pub fn list_categories<S: RecordStore>(app: &App<S>, _req: &Request) -> Result<Response, Error> {
    let categories = app.service().list_categories()?;
    Ok(Response::ok(json::obj().set("categories", categories.to_json())))
}

/// One page of all questions with every category name.
pub fn list_questions<S: RecordStore>(app: &App<S>, req: &Request) -> Result<Response, Error> {
    let listing = app.service().list_questions(page_param(req))?;
    Ok(Response::ok(
        page_body(&listing.page)
            .set("categories", listing.categories.to_json())
            .set("current_category", json::null()),
    ))
}

/// Create a question from `{question, answer, category, difficulty}`.
///
/// `category` and `difficulty` may be integers or numeric strings.
pub fn create_question<S: RecordStore>(app: &App<S>, req: &Request) -> Result<Response, Error> {
    let body = object_body(req)?;
    let draft = QuestionDraft {
        question: body.get("question").str(),
        answer: body.get("answer").str(),
        category: lenient_int(&body.get("category"), "category")?,
        difficulty: lenient_int(&body.get("difficulty"), "difficulty")?,
    };
    let created = app.service().create_question(draft)?;
    crate::log!(info, "question created", id: created.id, total: created.page.total);
    Ok(Response::created(
        page_body(&created.page).set("created", created.id.to_json()),
    ))
}

/// Delete `/questions/{id}` and return the `?page=` view afterwards.
pub fn delete_question<S: RecordStore>(app: &App<S>, req: &Request) -> Result<Response, Error> {
    let id = QuestionId(id_param(req)?);
    let deleted = app.service().delete_question(id, page_param(req))?;
    crate::log!(info, "question deleted", id: id, total: deleted.page.total);
    Ok(Response::ok(
        page_body(&deleted.page).set("deleted", deleted.id.to_json()),
    ))
}

/// Case-insensitive search on question text from `{"searchTerm": ...}`.
pub fn search_questions<S: RecordStore>(app: &App<S>, req: &Request) -> Result<Response, Error> {
    let body = object_body(req)?;
    let term = body.get("searchTerm").str();
    let page = app.service().search_questions(term.as_deref(), page_param(req))?;
    Ok(Response::ok(page_body(&page).set("current_category", json::null())))
}

/// One page of the questions in `/categories/{id}`.
pub fn questions_in_category<S: RecordStore>(
    app: &App<S>,
    req: &Request,
) -> Result<Response, Error> {
    let id = CategoryId(id_param(req)?);
    let listing = app.service().questions_in_category(id, page_param(req))?;
    Ok(Response::ok(
        page_body(&listing.page).set("current_category", listing.category.to_json()),
    ))
}

/// Next quiz question from `{"previous_questions": [...], "quiz_category": {"id": n}}`.
///
/// An exhausted quiz answers 200 with `"question": null`.
pub fn next_quiz_question<S: RecordStore>(app: &App<S>, req: &Request) -> Result<Response, Error> {
    let body = object_body(req)?;
    let previous = previous_questions(&body.get("previous_questions"))?;
    let constraint = quiz_constraint(&body.get("quiz_category"))?;

    let current_category = match constraint.category() {
        None => json::null(),
        Some(id) => match app.service().category(id) {
            Ok(category) => category.to_json(),
            Err(Error::NotFound { .. }) => json::obj()
                .set("id", id.to_json())
                .set("type", json::null()),
            Err(err) => return Err(err),
        },
    };

    let question: Option<Question> = match app.next_question(&previous, constraint) {
        Ok(question) => Some(question),
        Err(Error::Exhausted) => None,
        Err(err) => return Err(err),
    };

    Ok(Response::ok(
        json::obj()
            .set("question", question.to_json())
            .set("current_category", current_category),
    ))
}

// --- Helpers ---

/// `questions` and `total_questions` for a page.
fn page_body(page: &Page<Question>) -> JsonValue {
    json::obj()
        .set("questions", page.items.to_json())
        .set("total_questions", page.total.to_json())
}

fn page_param(req: &Request) -> u32 {
    parse_page(req.query("page"))
}

/// Integer `{id}` path segment. Anything else names no resource.
fn id_param(req: &Request) -> Result<i64, Error> {
    let raw = req.param("id").unwrap_or_default();
    raw.parse()
        .map_err(|_| Error::not_found(format!("no resource with id \"{raw}\"")))
}

fn object_body(req: &Request) -> Result<JsonValue, Error> {
    req.json_with(json::try_parse)
        .filter(JsonValue::is_object)
        .ok_or_else(|| Error::bad_request("request body must be a JSON object"))
}

/// Integer field that may arrive as a numeric string. Null or absent is `None`.
fn lenient_int(value: &JsonValue, field: &str) -> Result<Option<i64>, Error> {
    if value.is_null() {
        return Ok(None);
    }
    value
        .int()
        .or_else(|| value.str().and_then(|s| s.trim().parse().ok()))
        .map(Some)
        .ok_or_else(|| Error::bad_request(format!("`{field}` must be an integer")))
}

fn previous_questions(value: &JsonValue) -> Result<PreviousQuestions, Error> {
    if value.is_null() {
        return Ok(PreviousQuestions::new());
    }
    let items = value
        .items()
        .ok_or_else(|| Error::bad_request("`previous_questions` must be an array"))?;
    items
        .iter()
        .map(|item| {
            item.int().map(QuestionId).ok_or_else(|| {
                Error::bad_request(format!("`previous_questions` holds a non-integer: {item}"))
            })
        })
        .collect()
}

/// `quiz_category` is `{"id": n, ...}`; null, a missing id or id 0 means
/// every category.
fn quiz_constraint(value: &JsonValue) -> Result<CategoryConstraint, Error> {
    if value.is_null() {
        return Ok(CategoryConstraint::AllCategories);
    }
    if !value.is_object() {
        return Err(Error::bad_request("`quiz_category` must be an object"));
    }
    let id = lenient_int(&value.get("id"), "quiz_category.id")?.unwrap_or(0);
    Ok(CategoryConstraint::from_wire(id))
}
