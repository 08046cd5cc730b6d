use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum StudentDashboardError {
    // Configuration errors
    ConfigError(String),

    // Request validation errors
    ValidationError(String),

    // Chat-completion upstream errors
    UpstreamError(String),
    UpstreamUnavailable,

    // System errors
    SystemError(String),
}

impl fmt::Display for StudentDashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            Self::UpstreamUnavailable => write!(f, "Upstream chat API is not configured"),
            Self::SystemError(msg) => write!(f, "System error: {}", msg),
        }
    }
}

impl Error for StudentDashboardError {}

// Generic result type for the dashboard
pub type Result<T> = std::result::Result<T, StudentDashboardError>;

/// Failures raised by an account store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An account with this email already exists
    DuplicateKey(String),
    /// The backing store could not be reached or failed
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "Duplicate key: {}", key),
            Self::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
        }
    }
}

impl Error for StoreError {}

/// Failures of token verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// Signature is valid but the token is past its expiry
    Expired,
    /// Signature does not match the server secret
    BadSignature,
    /// Not a decodable token at all
    Malformed(String),
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "Token expired"),
            Self::BadSignature => write!(f, "Token signature mismatch"),
            Self::Malformed(msg) => write!(f, "Malformed token: {}", msg),
        }
    }
}

impl Error for VerifyError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    EmailTaken,
    InvalidInput(String),
    StorageFailure(String),
    Internal(String),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmailTaken => write!(f, "Email is already registered"),
            Self::InvalidInput(msg) => write!(f, "Invalid registration input: {}", msg),
            Self::StorageFailure(msg) => write!(f, "Storage failure: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl Error for RegistrationError {}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(_) => RegistrationError::EmailTaken,
            StoreError::Unavailable(msg) => RegistrationError::StorageFailure(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    AccountNotFound,
    InvalidCredentials,
    InvalidInput(String),
    MissingToken,
    InvalidToken(VerifyError),
    StorageFailure(String),
    Internal(String),
}

impl AuthError {
    /// Message safe to show to HTTP callers.
    ///
    /// Unknown accounts and wrong passwords share one message so the response
    /// does not reveal which emails are registered.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::AccountNotFound | Self::InvalidCredentials => "Invalid email or password",
            Self::InvalidInput(_) => "Email and password are required",
            Self::MissingToken => "No token provided",
            Self::InvalidToken(_) => "Invalid or expired token",
            Self::StorageFailure(_) | Self::Internal(_) => "Internal server error",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountNotFound => write!(f, "Account not found"),
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::InvalidInput(msg) => write!(f, "Invalid login input: {}", msg),
            Self::MissingToken => write!(f, "Missing bearer token"),
            Self::InvalidToken(e) => write!(f, "Invalid token: {}", e),
            Self::StorageFailure(msg) => write!(f, "Storage failure: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl Error for AuthError {}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::StorageFailure(err.to_string())
    }
}

impl From<VerifyError> for AuthError {
    fn from(err: VerifyError) -> Self {
        AuthError::InvalidToken(err)
    }
}
