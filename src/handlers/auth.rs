//! Account endpoints and the bearer-token gate filter

use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::{HeaderMap, StatusCode};
use warp::{Filter, Rejection, Reply};

use super::rejection::reject;
use crate::auth::{AuthService, Identity};
use crate::error::AuthError;
use crate::security_logger::{log_security_event, SecurityEvent};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub pass: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub pass: String,
}

/// Helper function to include the auth service in a route
pub fn with_auth(
    auth: Arc<AuthService>,
) -> impl Filter<Extract = (Arc<AuthService>,), Error = Infallible> + Clone {
    warp::any().map(move || auth.clone())
}

/// Gate filter: admits the request with its decoded `Identity` or rejects it
/// with `MissingToken` (401) / `InvalidToken` (403)
pub fn with_identity(
    auth: Arc<AuthService>,
) -> impl Filter<Extract = (Identity,), Error = Rejection> + Clone {
    warp::header::headers_cloned()
        .and(warp::path::full())
        .and(with_auth(auth))
        .and_then(
            |headers: HeaderMap, path: warp::path::FullPath, auth: Arc<AuthService>| async move {
                match auth.authenticate(&headers) {
                    Ok(identity) => Ok(identity),
                    Err(err) => {
                        let event = match &err {
                            AuthError::MissingToken => SecurityEvent::MissingToken {
                                path: path.as_str().to_string(),
                            },
                            other => SecurityEvent::TokenValidationFailed {
                                path: path.as_str().to_string(),
                                reason: other.to_string(),
                            },
                        };
                        log_security_event(&event);
                        Err(reject(err))
                    }
                }
            },
        )
}

pub async fn signup_handler(
    body: SignupRequest,
    auth: Arc<AuthService>,
) -> Result<impl Reply, Rejection> {
    auth.register(&body.name, &body.email, &body.pass)
        .await
        .map_err(reject)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "message": "User saved." })),
        StatusCode::CREATED,
    ))
}

pub async fn login_handler(
    body: LoginRequest,
    auth: Arc<AuthService>,
) -> Result<impl Reply, Rejection> {
    let token = auth.login(&body.email, &body.pass).await.map_err(reject)?;

    Ok(warp::reply::json(&serde_json::json!({
        "message": "Login successful",
        "token": token,
    })))
}
