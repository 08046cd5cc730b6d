//! Registration, login and the bearer-token request gate

use std::sync::Arc;
use std::time::Duration;
use warp::http::header::AUTHORIZATION;
use warp::http::HeaderMap;

use crate::auth::account::{Confirmation, Identity, NewAccount};
use crate::auth::password::{hash_password, verify_against_placeholder, verify_password};
use crate::auth::token::{extract_bearer_token, unix_now, TokenManager};
use crate::config::ServerConfig;
use crate::constants::{MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN};
use crate::error::{AuthError, RegistrationError};
use crate::security::AuthTimer;
use crate::security_logger::{log_security_event, SecurityEvent};
use crate::storage::AccountStore;

/// Authentication service shared by all request handlers
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    tokens: TokenManager,
    min_auth_duration: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn AccountStore>, tokens: TokenManager, min_auth_duration: Duration) -> Self {
        Self {
            store,
            tokens,
            min_auth_duration,
        }
    }

    /// Build the service from validated configuration
    pub fn from_config(config: &ServerConfig, store: Arc<dyn AccountStore>) -> Self {
        Self::new(
            store,
            TokenManager::new(&config.jwt_secret, config.token_ttl),
            config.min_auth_duration,
        )
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Register a new account. No token is issued; the client logs in separately.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Confirmation, RegistrationError> {
        let name = name.trim();
        let email = email.trim();

        if let Err(reason) = validate_registration(name, email, password) {
            log_security_event(&SecurityEvent::RegistrationRejected {
                email: email.to_string(),
                reason: reason.clone(),
            });
            return Err(RegistrationError::InvalidInput(reason));
        }

        // Cheap early exit before paying for the hash. The store's uniqueness
        // check in `create` is still the authoritative one.
        if self.store.find_by_email(email).await?.is_some() {
            log_security_event(&SecurityEvent::RegistrationRejected {
                email: email.to_string(),
                reason: "email taken".to_string(),
            });
            return Err(RegistrationError::EmailTaken);
        }

        let plaintext = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&plaintext))
            .await
            .map_err(|e| RegistrationError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(RegistrationError::Internal)?;

        let account = self
            .store
            .create(NewAccount {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| {
                let err = RegistrationError::from(e);
                if err == RegistrationError::EmailTaken {
                    log_security_event(&SecurityEvent::RegistrationRejected {
                        email: email.to_string(),
                        reason: "email taken by concurrent registration".to_string(),
                    });
                }
                err
            })?;

        log_security_event(&SecurityEvent::AccountCreated {
            account_id: account.id.clone(),
            email: account.email.clone(),
        });

        Ok(Confirmation::from(&account))
    }

    /// Verify credentials and issue a signed bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput(
                "email and password are required".to_string(),
            ));
        }

        let timer = AuthTimer::new(self.min_auth_duration);

        let account = match self.store.find_by_email(email).await? {
            Some(account) => account,
            None => {
                let plaintext = password.to_string();
                tokio::task::spawn_blocking(move || verify_against_placeholder(&plaintext))
                    .await
                    .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))?;
                self.reject_login(email, AuthError::AccountNotFound, timer).await;
                return Err(AuthError::AccountNotFound);
            }
        };

        let plaintext = password.to_string();
        let stored_hash = account.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&plaintext, &stored_hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))?
            .map_err(AuthError::Internal)?;

        if !matches {
            self.reject_login(email, AuthError::InvalidCredentials, timer).await;
            return Err(AuthError::InvalidCredentials);
        }

        let claims = self.tokens.claims_for(&account.id, &account.email, unix_now());
        let token = self.tokens.sign(&claims).map_err(AuthError::Internal)?;

        log_security_event(&SecurityEvent::AuthenticationSuccess {
            account_id: account.id,
        });

        Ok(token)
    }

    async fn reject_login(&self, email: &str, reason: AuthError, timer: AuthTimer) {
        log_security_event(&SecurityEvent::AuthenticationFailed {
            email: email.to_string(),
            reason: reason.to_string(),
        });
        timer.wait().await;
    }

    /// Gate a request on its `Authorization: Bearer <token>` header
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        self.authenticate_header(header)
    }

    /// Gate on a raw Authorization header value
    pub fn authenticate_header(&self, auth_header: Option<&str>) -> Result<Identity, AuthError> {
        let token = auth_header
            .and_then(extract_bearer_token)
            .ok_or(AuthError::MissingToken)?;

        let claims = self.tokens.verify(token)?;

        Ok(Identity {
            subject_id: claims.sub,
            subject_email: claims.email,
        })
    }
}

fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is required".to_string());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!("name must be at most {} characters", MAX_NAME_LEN));
    }

    if email.is_empty() {
        return Err("email is required".to_string());
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(format!("email must be at most {} characters", MAX_EMAIL_LEN));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {}
        _ => return Err("email is not a valid address".to_string()),
    }

    if password.is_empty() {
        return Err("password is required".to_string());
    }
    if password.chars().count() > MAX_PASSWORD_LEN {
        return Err(format!("password must be at most {} characters", MAX_PASSWORD_LEN));
    }

    Ok(())
}
