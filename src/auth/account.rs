use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered student account
#[derive(Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier, assigned by the store
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email, unique across the store
    pub email: String,
    /// PHC-encoded salted password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Fields needed to create an account. The store assigns id and timestamp.
#[derive(Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Identity of an admitted request, decoded from its bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject_id: String,
    pub subject_email: String,
}

/// Returned by a successful registration
#[derive(Debug, Clone, Serialize)]
pub struct Confirmation {
    pub account_id: String,
    pub email: String,
}

impl From<&Account> for Confirmation {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id.clone(),
            email: account.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_hides_hash() {
        let account = Account {
            id: "acc_1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            created_at: chrono::Utc::now(),
        };

        assert!(!format!("{:?}", account).contains("argon2id"));
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(json.contains("alice@example.com"));
    }
}
