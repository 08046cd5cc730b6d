//! End-to-end tests of the HTTP routes with a stubbed chat-completion upstream

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use warp::http::StatusCode;

use student_dashboard::assistant::{ChatCompletion, ChatRequest};
use student_dashboard::auth::{AuthService, TokenManager};
use student_dashboard::error::{Result, StudentDashboardError};
use student_dashboard::handlers::{routes, AppState};
use student_dashboard::storage::MemoryAccountStore;

const SECRET: &str = "k9Vq2LxT7bWm4RzP8cYn3HdJ6fGs1AeU";

enum StubReply {
    Content(&'static str),
    Empty,
    Unavailable,
}

struct StubChat {
    reply: StubReply,
    seen: Mutex<Vec<ChatRequest>>,
}

impl StubChat {
    fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ChatRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for StubChat {
    async fn complete(&self, request: ChatRequest) -> Result<Option<String>> {
        self.seen.lock().unwrap().push(request);
        match self.reply {
            StubReply::Content(text) => Ok(Some(text.to_string())),
            StubReply::Empty => Ok(None),
            StubReply::Unavailable => Err(StudentDashboardError::UpstreamUnavailable),
        }
    }
}

fn state(chat: Arc<StubChat>) -> AppState {
    let auth = AuthService::new(
        Arc::new(MemoryAccountStore::new()),
        TokenManager::new(SECRET, Duration::from_secs(3600)),
        Duration::from_millis(5),
    );
    AppState {
        auth: Arc::new(auth),
        chat,
    }
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

async fn signup_and_login(state: &AppState) -> String {
    let api = routes(state.clone());

    let res = warp::test::request()
        .method("POST")
        .path("/signup")
        .json(&json!({"name": "Alice", "email": "alice@example.com", "pass": "secret123"}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = warp::test::request()
        .method("POST")
        .path("/login")
        .json(&json!({"email": "alice@example.com", "pass": "secret123"}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res.body());
    assert_eq!(body["message"], "Login successful");
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_signup_login_and_health() {
    let state = state(StubChat::new(StubReply::Empty));
    let token = signup_and_login(&state).await;
    let api = routes(state);

    let res = warp::test::request()
        .method("GET")
        .path("/api/health")
        .header("authorization", format!("Bearer {}", token))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res.body()), json!({"ok": true}));

    let res = warp::test::request()
        .method("GET")
        .path("/api/health")
        .header("authorization", format!("bearer {}", token))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_gate_statuses() {
    let api = routes(state(StubChat::new(StubReply::Empty)));

    let res = warp::test::request()
        .method("GET")
        .path("/api/health")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(res.body())["message"], "No token provided");

    let res = warp::test::request()
        .method("GET")
        .path("/api/health")
        .header("authorization", "Bearer garbage")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(res.body())["message"], "Invalid or expired token");

    // A rejected gate must not fall through to the catch-all route
    let res = warp::test::request()
        .method("POST")
        .path("/api/ask")
        .json(&json!({"question": "why?"}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_signup_and_bad_login() {
    let state = state(StubChat::new(StubReply::Empty));
    signup_and_login(&state).await;
    let api = routes(state);

    let res = warp::test::request()
        .method("POST")
        .path("/signup")
        .json(&json!({"name": "Alice", "email": "alice@example.com", "pass": "another"}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res.body())["message"], "User already exists. Try logging in.");

    let wrong_password = warp::test::request()
        .method("POST")
        .path("/login")
        .json(&json!({"email": "alice@example.com", "pass": "wrong"}))
        .reply(&api)
        .await;
    let unknown_email = warp::test::request()
        .method("POST")
        .path("/login")
        .json(&json!({"email": "nobody@example.com", "pass": "secret123"}))
        .reply(&api)
        .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body(), unknown_email.body());
}

#[tokio::test]
async fn test_signup_validation() {
    let api = routes(state(StubChat::new(StubReply::Empty)));

    let res = warp::test::request()
        .method("POST")
        .path("/signup")
        .json(&json!({"name": "Alice", "email": "alice@example.com", "pass": ""}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = warp::test::request()
        .method("POST")
        .path("/signup")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ask_forwards_question() {
    let chat = StubChat::new(StubReply::Content("Because of Rayleigh scattering."));
    let state = state(chat.clone());
    let token = signup_and_login(&state).await;
    let api = routes(state);

    let res = warp::test::request()
        .method("POST")
        .path("/api/ask")
        .header("authorization", format!("Bearer {}", token))
        .json(&json!({"question": "Why is the sky blue?"}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res.body())["answer"], "Because of Rayleigh scattering.");

    let requests = chat.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].user, "Why is the sky blue?");
    assert_eq!(requests[0].max_tokens, 800);
}

#[tokio::test]
async fn test_empty_upstream_reply_falls_back() {
    let state = state(StubChat::new(StubReply::Empty));
    let token = signup_and_login(&state).await;
    let api = routes(state);

    let res = warp::test::request()
        .method("POST")
        .path("/api/explain-notes")
        .header("authorization", format!("Bearer {}", token))
        .json(&json!({"notesText": "E = mc^2"}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res.body())["explanation"], "No response");

    let res = warp::test::request()
        .method("POST")
        .path("/api/explain-notes")
        .header("authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res.body())["message"], "Missing notesText");
}

#[tokio::test]
async fn test_generate_test_parses_questions() {
    let reply = "Sure!\n[{\"question\":\"H2O is?\",\"options\":[\"water\",\"salt\",\"gold\",\"air\"],\"answer\":0}]";
    let chat = StubChat::new(StubReply::Content(reply));
    let state = state(chat.clone());
    let token = signup_and_login(&state).await;
    let api = routes(state);

    let res = warp::test::request()
        .method("POST")
        .path("/api/generate-test")
        .header("authorization", format!("Bearer {}", token))
        .json(&json!({"subject": "Chemistry", "topic": "Molecules", "count": 1}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res.body());
    assert_eq!(body["questions"].as_array().unwrap().len(), 1);
    assert_eq!(body["questions"][0]["options"][0], "water");
    assert_eq!(body["raw"], reply);
    assert!(chat.requests()[0].user.starts_with("Create 1 multiple-choice questions"));

    let res = warp::test::request()
        .method("POST")
        .path("/api/generate-test")
        .header("authorization", format!("Bearer {}", token))
        .json(&json!({"subject": "Chemistry", "topic": "Molecules", "count": 0}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unconfigured_upstream() {
    let state = state(StubChat::new(StubReply::Unavailable));
    let token = signup_and_login(&state).await;
    let api = routes(state);

    let res = warp::test::request()
        .method("POST")
        .path("/api/ask")
        .header("authorization", format!("Bearer {}", token))
        .json(&json!({"question": "Why?"}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_catch_all() {
    let api = routes(state(StubChat::new(StubReply::Empty)));

    let res = warp::test::request()
        .method("GET")
        .path("/dashboard")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(&res.body()[..], b"This is backend");

    let res = warp::test::request()
        .method("GET")
        .path("/api/nope")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(&res.body()[..], b"This is backend");

    // Protected routes still answer with the gate's status
    let res = warp::test::request()
        .method("GET")
        .path("/api/health")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
