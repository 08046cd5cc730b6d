//! Mapping of domain errors and warp rejections to JSON error replies

use log::error;
use serde::Serialize;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::error::{AuthError, RegistrationError, StudentDashboardError};

/// Any error a handler can short-circuit with
#[derive(Debug)]
pub enum ApiError {
    Registration(RegistrationError),
    Auth(AuthError),
    Dashboard(StudentDashboardError),
}

impl warp::reject::Reject for ApiError {}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        ApiError::Registration(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<StudentDashboardError> for ApiError {
    fn from(err: StudentDashboardError) -> Self {
        ApiError::Dashboard(err)
    }
}

/// Wrap a domain error into a warp rejection
pub fn reject<E: Into<ApiError>>(err: E) -> Rejection {
    warp::reject::custom(err.into())
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// Status code and caller-facing message
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Registration(err) => match err {
                RegistrationError::EmailTaken => (
                    StatusCode::BAD_REQUEST,
                    "User already exists. Try logging in.".to_string(),
                ),
                RegistrationError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                RegistrationError::StorageFailure(_) | RegistrationError::Internal(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error saving user.".to_string(),
                ),
            },
            ApiError::Auth(err) => {
                let status = match err {
                    AuthError::AccountNotFound
                    | AuthError::InvalidCredentials
                    | AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                    AuthError::InvalidToken(_) => StatusCode::FORBIDDEN,
                    AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    AuthError::StorageFailure(_) | AuthError::Internal(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.public_message().to_string())
            }
            ApiError::Dashboard(err) => match err {
                StudentDashboardError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                StudentDashboardError::UpstreamError(_) => (
                    StatusCode::BAD_GATEWAY,
                    "Upstream chat API request failed".to_string(),
                ),
                StudentDashboardError::UpstreamUnavailable => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "AI assistant is not configured".to_string(),
                ),
                StudentDashboardError::ConfigError(_) | StudentDashboardError::SystemError(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                ),
            },
        }
    }
}

/// Convert every rejection into a JSON `{"message": ...}` reply
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(api_error) = err.find::<ApiError>() {
        let (status, message) = api_error.status_and_message();
        if status.is_server_error() {
            error!("Request failed: {:?}", api_error);
        }
        (status, message)
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length header required".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected application/json".to_string(),
        )
    } else if err.find::<warp::filters::cors::CorsForbidden>().is_some() {
        (StatusCode::FORBIDDEN, "CORS request forbidden".to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorBody { message }),
        status,
    ))
}

/// Reply to handler and gate errors, pass every other rejection on.
///
/// Unmatched paths keep rejecting so the outer catch-all route still sees them.
pub async fn recover_api_error(err: Rejection) -> Result<impl Reply, Rejection> {
    if err.find::<ApiError>().is_none() {
        return Err(err);
    }
    handle_rejection(err).await.map_err(|never| match never {})
}
