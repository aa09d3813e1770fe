//! End-to-end tests of every endpoint, run against both stores.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{Value, json};
use trivia_api::{App, Method, Request, Response};
use trivia_core::{MemoryStore, RecordStore, SplitMix64};
use trivia_sql::SqliteStore;
use trivia_sql::schema::SEED_CATEGORIES;

type Store = Arc<dyn RecordStore>;

const QUESTIONS: &[(&str, &str, i64, i64)] = &[
    ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
    ("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
    ("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    ("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
    ("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
    ("How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
    ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
    ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
    ("Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
    ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
    ("Which is the only team to play in every soccer World Cup?", "Brazil", 6, 3),
    ("What movie earned Tom Hanks his third straight Oscar nomination?", "Apollo 13", 5, 4),
];

fn memory() -> Store {
    Arc::new(MemoryStore::with_categories(SEED_CATEGORIES))
}

fn sqlite() -> Store {
    let store = SqliteStore::open_in_memory().unwrap();
    store.init(true).unwrap();
    Arc::new(store)
}

fn app(store: Store) -> App<Store> {
    App::new(store).with_rng(SplitMix64::new(42))
}

fn populated(store: Store) -> App<Store> {
    let app = app(store);
    for &(question, answer, category, difficulty) in QUESTIONS {
        let (status, _) = call(
            &app,
            Method::Post,
            "/questions",
            Some(json!({
                "question": question,
                "answer": answer,
                "category": category,
                "difficulty": difficulty,
            })),
        );
        assert_eq!(status, 201);
    }
    app
}

fn send(app: &App<Store>, method: Method, path: &str, body: Option<Value>) -> Response {
    let headers = if body.is_some() {
        vec![("Content-Type".to_string(), "application/json".to_string())]
    } else {
        Vec::new()
    };
    let body = body.map(|b| b.to_string().into_bytes());
    app.handle(Request::new(method, path.to_string(), headers, body))
}

fn call(app: &App<Store>, method: Method, path: &str, body: Option<Value>) -> (u16, Value) {
    let resp = send(app, method, path, body);
    let value = if resp.body().is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(resp.body()).unwrap()
    };
    (resp.status(), value)
}

fn both(test: impl Fn(fn() -> Store)) {
    test(memory);
    test(sqlite);
}

fn question_ids(body: &Value) -> Vec<i64> {
    body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}

fn assert_problem(status: u16, body: &Value, expected: u16) {
    assert_eq!(status, expected, "{body}");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], expected);
    assert_eq!(body["status"], expected);
    assert!(body["message"].is_string());
    assert!(body["detail"].is_string());
}

#[test]
fn categories_are_listed_in_id_order() {
    both(|store| {
        let app = app(store());
        let (status, body) = call(&app, Method::Get, "/categories", None);
        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({
                "categories": ["Science", "Art", "Geography", "History", "Entertainment", "Sports"],
                "success": true,
            })
        );
    });
}

#[test]
fn no_categories_is_404() {
    let app = app(Arc::new(MemoryStore::new()));
    let resp = send(&app, Method::Get, "/categories", None);
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.header("Content-Type"), Some("application/problem+json"));
}

#[test]
fn questions_are_paginated() {
    both(|store| {
        let app = populated(store());

        let (status, body) = call(&app, Method::Get, "/questions", None);
        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["total_questions"], 12);
        assert_eq!(question_ids(&body), (1..=10).collect::<Vec<_>>());
        assert_eq!(body["categories"].as_array().unwrap().len(), 6);
        assert_eq!(body["current_category"], Value::Null);

        let first = &body["questions"][0];
        assert_eq!(first["answer"], "Maya Angelou");
        assert_eq!(first["category"], 4);
        assert_eq!(first["difficulty"], 2);

        let (_, body) = call(&app, Method::Get, "/questions?page=2", None);
        assert_eq!(question_ids(&body), vec![11, 12]);
        assert_eq!(body["total_questions"], 12);

        let (status, body) = call(&app, Method::Get, "/questions?page=3", None);
        assert_problem(status, &body, 404);

        // Unparseable pages fall back to the first
        let (_, body) = call(&app, Method::Get, "/questions?page=abc", None);
        assert_eq!(question_ids(&body).first(), Some(&1));
    });
}

#[test]
fn empty_question_list_is_404() {
    both(|store| {
        let (status, body) = call(&app(store()), Method::Get, "/questions", None);
        assert_problem(status, &body, 404);
    });
}

#[test]
fn create_returns_first_page() {
    both(|store| {
        let app = populated(store());
        let (status, body) = call(
            &app,
            Method::Post,
            "/questions",
            Some(json!({
                "question": "What is the chemical symbol for gold?",
                "answer": "Au",
                "category": "1",
                "difficulty": 2,
            })),
        );
        assert_eq!(status, 201);
        assert_eq!(body["success"], true);
        assert_eq!(body["created"], 13);
        assert_eq!(body["total_questions"], 13);
        assert_eq!(question_ids(&body).len(), 10);
    });
}

#[test]
fn create_rejects_bad_input() {
    both(|store| {
        let app = app(store());
        let cases = [
            json!({"answer": "Au", "category": 1, "difficulty": 2}),
            json!({"question": "  ", "answer": "Au", "category": 1, "difficulty": 2}),
            json!({"question": "Gold?", "answer": "Au", "category": 1, "difficulty": 9}),
            json!({"question": "Gold?", "answer": "Au", "category": 0, "difficulty": 2}),
            json!({"question": "Gold?", "answer": "Au", "category": "Science", "difficulty": 2}),
            json!(["not", "an", "object"]),
        ];
        for case in cases {
            let (status, body) = call(&app, Method::Post, "/questions", Some(case));
            assert_problem(status, &body, 400);
        }

        let resp = app.handle(Request::new(
            Method::Post,
            "/questions".to_string(),
            vec![],
            Some(b"{not json".to_vec()),
        ));
        assert_eq!(resp.status(), 400);
    });
}

#[test]
fn delete_removes_question() {
    both(|store| {
        let app = populated(store());

        let (status, body) = call(&app, Method::Delete, "/questions/3", None);
        assert_eq!(status, 200);
        assert_eq!(body["deleted"], 3);
        assert_eq!(body["total_questions"], 11);
        assert!(!question_ids(&body).contains(&3));

        let (status, body) = call(&app, Method::Delete, "/questions/3", None);
        assert_problem(status, &body, 404);

        let (status, body) = call(&app, Method::Delete, "/questions/three", None);
        assert_problem(status, &body, 404);

        // Ids are never reused
        let (_, body) = call(
            &app,
            Method::Post,
            "/questions",
            Some(json!({"question": "Q?", "answer": "A", "category": 1, "difficulty": 1})),
        );
        assert_eq!(body["created"], 13);
    });
}

#[test]
fn delete_reports_requested_page() {
    both(|store| {
        let app = populated(store());
        let (status, body) = call(&app, Method::Delete, "/questions/12?page=2", None);
        assert_eq!(status, 200);
        assert_eq!(question_ids(&body), vec![11]);

        // The page after the last one is empty but the delete still succeeded
        let (status, body) = call(&app, Method::Delete, "/questions/11?page=2", None);
        assert_eq!(status, 200);
        assert!(question_ids(&body).is_empty());
    });
}

#[test]
fn search_is_case_insensitive_substring() {
    both(|store| {
        let app = populated(store());

        let (status, body) = call(
            &app,
            Method::Post,
            "/search_questions",
            Some(json!({"searchTerm": "WORLD cup"})),
        );
        assert_eq!(status, 200);
        assert_eq!(question_ids(&body), vec![10, 11]);
        assert_eq!(body["total_questions"], 2);
        assert_eq!(body["current_category"], Value::Null);

        let (status, body) = call(
            &app,
            Method::Post,
            "/search_questions",
            Some(json!({"searchTerm": "zebra"})),
        );
        assert_problem(status, &body, 404);

        let (status, body) = call(&app, Method::Post, "/search_questions", Some(json!({})));
        assert_problem(status, &body, 400);
        assert_eq!(body["detail"], "missing required field `searchTerm`");

        // LIKE wildcards match literally
        let (status, _) = call(
            &app,
            Method::Post,
            "/search_questions",
            Some(json!({"searchTerm": "%"})),
        );
        assert_eq!(status, 404);

        let (_, body) = call(
            &app,
            Method::Post,
            "/search_questions",
            Some(json!({"searchTerm": ""})),
        );
        assert_eq!(body["total_questions"], 12);
    });
}

#[test]
fn questions_by_category() {
    both(|store| {
        let app = populated(store());

        let (status, body) = call(&app, Method::Get, "/categories/1/questions", None);
        assert_eq!(status, 200);
        assert_eq!(question_ids(&body), vec![7, 8, 9]);
        assert_eq!(body["total_questions"], 3);
        assert_eq!(body["current_category"], json!({"id": 1, "type": "Science"}));

        let (status, body) = call(&app, Method::Get, "/categories/42/questions", None);
        assert_problem(status, &body, 404);

        let (status, body) = call(&app, Method::Get, "/categories/x/questions", None);
        assert_problem(status, &body, 404);

        let (status, _) = call(&app, Method::Get, "/categories/1/questions?page=2", None);
        assert_eq!(status, 404);
    });
}

fn quiz(app: &App<Store>, previous: &[i64], category: i64) -> (u16, Value) {
    call(
        app,
        Method::Post,
        "/quizzes",
        Some(json!({
            "previous_questions": previous,
            "quiz_category": {"type": "any", "id": category},
        })),
    )
}

#[test]
fn quiz_never_repeats_and_ends_with_null() {
    both(|store| {
        let app = populated(store());
        let mut previous = Vec::new();
        loop {
            let (status, body) = quiz(&app, &previous, 2);
            assert_eq!(status, 200);
            assert_eq!(body["current_category"], json!({"id": 2, "type": "Art"}));
            if body["question"].is_null() {
                break;
            }
            assert_eq!(body["question"]["category"], 2);
            let id = body["question"]["id"].as_i64().unwrap();
            assert!(!previous.contains(&id));
            previous.push(id);
        }
        previous.sort_unstable();
        assert_eq!(previous, vec![5, 6]);
    });
}

#[test]
fn quiz_over_all_categories() {
    both(|store| {
        let app = populated(store());
        let mut seen = HashSet::new();
        let mut previous: Vec<i64> = Vec::new();
        for _ in 0..QUESTIONS.len() {
            let (status, body) = quiz(&app, &previous, 0);
            assert_eq!(status, 200);
            assert_eq!(body["current_category"], Value::Null);
            let id = body["question"]["id"].as_i64().unwrap();
            assert!(seen.insert(id));
            previous.push(id);
        }
        let (_, body) = quiz(&app, &previous, 0);
        assert_eq!(body["question"], Value::Null);
    });
}

#[test]
fn quiz_edge_cases() {
    both(|store| {
        let app = populated(store());

        // Unknown category: nothing to serve
        let (status, body) = quiz(&app, &[], 99);
        assert_eq!(status, 200);
        assert_eq!(body["question"], Value::Null);
        assert_eq!(body["current_category"], json!({"id": 99, "type": null}));

        // Missing fields mean a fresh quiz over everything
        let (status, body) = call(&app, Method::Post, "/quizzes", Some(json!({})));
        assert_eq!(status, 200);
        assert!(body["question"]["id"].is_i64());

        let (status, body) = call(
            &app,
            Method::Post,
            "/quizzes",
            Some(json!({"previous_questions": "1,2", "quiz_category": {"id": 1}})),
        );
        assert_problem(status, &body, 400);

        let (status, body) = call(&app, Method::Post, "/quizzes", None);
        assert_problem(status, &body, 400);
    });
}

#[test]
fn seeded_quizzes_are_reproducible() {
    let draw = || {
        let app = populated(memory());
        let (_, body) = quiz(&app, &[], 0);
        body["question"]["id"].as_i64().unwrap()
    };
    assert_eq!(draw(), draw());
}

#[test]
fn cors_and_method_handling() {
    let app = populated(memory());

    let resp = send(&app, Method::Get, "/questions", None);
    assert_eq!(resp.header("Access-Control-Allow-Origin"), Some("*"));
    assert_eq!(
        resp.header("Access-Control-Allow-Methods"),
        Some("GET, PUT, POST, DELETE, OPTIONS")
    );

    let resp = send(&app, Method::Options, "/quizzes", None);
    assert_eq!(resp.status(), 204);
    assert!(resp.body().is_empty());
    assert_eq!(resp.header("Access-Control-Allow-Origin"), Some("*"));

    let resp = send(&app, Method::Patch, "/questions", None);
    assert_eq!(resp.status(), 405);
    assert_eq!(resp.header("Allow"), Some("GET, POST, OPTIONS"));

    let (status, body) = call(&app, Method::Get, "/nope", None);
    assert_problem(status, &body, 404);
}

#[test]
fn page_size_is_configurable() {
    let app = populated(memory()).with_page_size(5);
    let (_, body) = call(&app, Method::Get, "/questions?page=3", None);
    assert_eq!(question_ids(&body), vec![11, 12]);
}
