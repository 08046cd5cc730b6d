//! Security-focused logging of authentication events
//!
//! Events are written through the `log` facade under the `security` target so
//! they can be filtered with `RUST_LOG=security=info`. Emails are masked and
//! passwords or tokens are never part of an event.

use log::{info, warn};

/// Types of security events to track
#[derive(Debug, Clone)]
pub enum SecurityEvent {
    // Registration events
    AccountCreated { account_id: String, email: String },
    RegistrationRejected { email: String, reason: String },

    // Authentication events
    AuthenticationSuccess { account_id: String },
    AuthenticationFailed { email: String, reason: String },

    // Gate events
    MissingToken { path: String },
    TokenValidationFailed { path: String, reason: String },
}

impl SecurityEvent {
    /// Short stable name for the event kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccountCreated { .. } => "account_created",
            Self::RegistrationRejected { .. } => "registration_rejected",
            Self::AuthenticationSuccess { .. } => "auth_success",
            Self::AuthenticationFailed { .. } => "auth_failed",
            Self::MissingToken { .. } => "missing_token",
            Self::TokenValidationFailed { .. } => "token_validation_failed",
        }
    }
}

/// Mask the local part of an email for logging: `alice@example.com` -> `a***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

/// Log a security event
pub fn log_security_event(event: &SecurityEvent) {
    let kind = event.kind();
    match event {
        SecurityEvent::AccountCreated { account_id, email } => {
            info!(target: "security", "[{}] account={} email={}", kind, account_id, mask_email(email));
        }
        SecurityEvent::RegistrationRejected { email, reason } => {
            warn!(target: "security", "[{}] email={} reason={}", kind, mask_email(email), reason);
        }
        SecurityEvent::AuthenticationSuccess { account_id } => {
            info!(target: "security", "[{}] account={}", kind, account_id);
        }
        SecurityEvent::AuthenticationFailed { email, reason } => {
            warn!(target: "security", "[{}] email={} reason={}", kind, mask_email(email), reason);
        }
        SecurityEvent::MissingToken { path } => {
            warn!(target: "security", "[{}] path={}", kind, path);
        }
        SecurityEvent::TokenValidationFailed { path, reason } => {
            warn!(target: "security", "[{}] path={} reason={}", kind, path, reason);
        }
    }
}
