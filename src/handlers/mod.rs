//! Request handlers and route assembly

pub mod assistant;
pub mod auth;
pub mod rejection;

use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, Reply};

use crate::assistant::ChatCompletion;
use crate::auth::AuthService;
use crate::constants::MAX_JSON_BODY_BYTES;

pub use rejection::{handle_rejection, recover_api_error, ApiError};

/// Shared state handed to every route
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub chat: Arc<dyn ChatCompletion>,
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_JSON_BODY_BYTES).and(warp::body::json())
}

/// Build the complete route tree.
///
/// Gate and handler errors under `/api` are answered inside that scope so a
/// rejected protected request never falls through to the catch-all `GET`
/// route. Unmatched `/api` paths still reach it.
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let signup = warp::path("signup")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<auth::SignupRequest>())
        .and(auth::with_auth(state.auth.clone()))
        .and_then(auth::signup_handler);

    let login = warp::path("login")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<auth::LoginRequest>())
        .and(auth::with_auth(state.auth.clone()))
        .and_then(auth::login_handler);

    let gate = auth::with_identity(state.auth.clone());

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(gate.clone())
        .and_then(assistant::health_handler);

    let ask = warp::path("ask")
        .and(warp::path::end())
        .and(warp::post())
        .and(gate.clone())
        .and(json_body::<assistant::AskRequest>())
        .and(assistant::with_chat(state.chat.clone()))
        .and_then(assistant::ask_handler);

    let explain_notes = warp::path("explain-notes")
        .and(warp::path::end())
        .and(warp::post())
        .and(gate.clone())
        .and(json_body::<assistant::ExplainNotesRequest>())
        .and(assistant::with_chat(state.chat.clone()))
        .and_then(assistant::explain_notes_handler);

    let generate_test = warp::path("generate-test")
        .and(warp::path::end())
        .and(warp::post())
        .and(gate)
        .and(json_body::<assistant::GenerateTestRequest>())
        .and(assistant::with_chat(state.chat.clone()))
        .and_then(assistant::generate_test_handler);

    let api = warp::path("api").and(
        health
            .or(ask)
            .or(explain_notes)
            .or(generate_test)
            .recover(recover_api_error),
    );

    let fallback = warp::get().map(|| "This is backend");

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["authorization", "content-type"])
        .allow_methods(vec!["GET", "POST", "OPTIONS"]);

    signup
        .or(login)
        .or(api)
        .or(fallback)
        .with(cors)
        .recover(handle_rejection)
        .with(warp::log("student_dashboard::http"))
}
