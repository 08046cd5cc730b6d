//! Server configuration module
//! Loads the signing secret, listener address and upstream chat API settings

use crate::constants::{
    DEFAULT_GROQ_API_BASE, DEFAULT_GROQ_MODEL, DEFAULT_HOST, DEFAULT_MIN_AUTH_MILLIS,
    DEFAULT_PORT, DEFAULT_TOKEN_TTL_SECS, DEFAULT_UPSTREAM_TIMEOUT_SECS, MAX_TOKEN_TTL_SECS,
};
use crate::error::{Result, StudentDashboardError};
use std::env;
use std::fmt;
use std::time::Duration;

/// Server configuration parameters
#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Secret used to sign and verify bearer tokens
    pub jwt_secret: String,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Failed logins never return faster than this
    pub min_auth_duration: Duration,
    /// API key for the chat-completion upstream. Assistant routes answer 503 without it.
    pub groq_api_key: Option<String>,
    pub groq_api_base: String,
    pub groq_model: String,
    pub upstream_timeout: Duration,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("min_auth_duration", &self.min_auth_duration)
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("groq_api_base", &self.groq_api_base)
            .field("groq_model", &self.groq_model)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl ServerConfig {
    /// Build a configuration with defaults around an already chosen secret.
    ///
    /// The secret goes through the same checks as `from_env`.
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self> {
        let jwt_secret = jwt_secret.into();
        Self::validate_jwt_secret(&jwt_secret)?;

        Ok(Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            jwt_secret,
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            min_auth_duration: Duration::from_millis(DEFAULT_MIN_AUTH_MILLIS),
            groq_api_key: None,
            groq_api_base: DEFAULT_GROQ_API_BASE.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        })
    }

    /// Validate that the signing secret meets security requirements
    fn validate_jwt_secret(secret: &str) -> Result<()> {
        if secret.len() < 32 {
            return Err(StudentDashboardError::ConfigError(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        // Check for placeholder values copied from examples
        let insecure_patterns = [
            "your-secret-key",
            "change-this",
            "changeme",
            "secret",
            "password",
            "default",
            "12345",
        ];

        let lowered = secret.to_lowercase();
        for pattern in &insecure_patterns {
            if lowered.contains(pattern) {
                return Err(StudentDashboardError::ConfigError(format!(
                    "JWT secret contains insecure pattern '{}'. Please use a secure random secret generated with: openssl rand -base64 32",
                    pattern
                )));
            }
        }

        if secret.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(StudentDashboardError::ConfigError(
                "JWT secret should contain mixed characters (letters, numbers, symbols) for security"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// A missing or weak signing secret is fatal: protected routes are never
    /// served without a working signer.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("STUDENT_DASHBOARD_JWT_SECRET")
            .or_else(|_| env::var("JWT_SECRET"))
            .map_err(|_| {
                StudentDashboardError::ConfigError(
                    "JWT_SECRET environment variable is required for security. \
                     Generate one with: openssl rand -base64 32"
                        .to_string(),
                )
            })?;

        let mut config = Self::new(jwt_secret)?;

        if let Ok(host) = env::var("STUDENT_DASHBOARD_HOST") {
            config.host = host;
        }

        config.port = env::var("STUDENT_DASHBOARD_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let ttl_secs = env::var("STUDENT_DASHBOARD_TOKEN_TTL_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        if ttl_secs == 0 || ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(StudentDashboardError::ConfigError(format!(
                "STUDENT_DASHBOARD_TOKEN_TTL_SECS must be between 1 and {}",
                MAX_TOKEN_TTL_SECS
            )));
        }
        config.token_ttl = Duration::from_secs(ttl_secs);

        let min_auth_millis = env::var("STUDENT_DASHBOARD_MIN_AUTH_MILLIS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_MIN_AUTH_MILLIS);
        config.min_auth_duration = Duration::from_millis(min_auth_millis);

        config.groq_api_key = env::var("GROQ_API_KEY").ok().filter(|k| !k.trim().is_empty());

        if let Ok(base) = env::var("GROQ_API_BASE") {
            config.groq_api_base = base.trim_end_matches('/').to_string();
        }
        if let Ok(model) = env::var("GROQ_MODEL") {
            config.groq_model = model;
        }

        let timeout_secs = env::var("STUDENT_DASHBOARD_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);
        config.upstream_timeout = Duration::from_secs(timeout_secs);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_strong_secret() {
        let config = ServerConfig::new("k9Vq2LxT7bWm4RzP8cYn3HdJ6fGs1AeU").unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert!(config.groq_api_key.is_none());
    }

    #[test]
    fn test_new_rejects_weak_secrets() {
        assert!(ServerConfig::new("short").is_err());
        assert!(ServerConfig::new("my-jwt-secret-that-is-long-enough-0001").is_err());
        assert!(ServerConfig::new("onlylettersonlylettersonlylettersonly").is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ServerConfig::new("k9Vq2LxT7bWm4RzP8cYn3HdJ6fGs1AeU").unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("k9Vq2LxT7bWm4RzP8cYn3HdJ6fGs1AeU"));
        assert!(printed.contains("[REDACTED]"));
    }
}
