//! In-memory account storage for development and testing
//!
//! Accounts are keyed by email, so the uniqueness check and the insert happen
//! under a single write lock.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::traits::AccountStore;
use crate::auth::account::{Account, NewAccount};
use crate::error::StoreError;

/// In-memory account storage
#[derive(Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>, // email -> account
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.email) {
            return Err(StoreError::DuplicateKey(account.email));
        }

        let stored = Account {
            id: Uuid::new_v4().to_string(),
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            created_at: Utc::now(),
        };
        accounts.insert(stored.email.clone(), stored.clone());

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "Alice".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryAccountStore::new();
        let created = store.create(new_account("alice@example.com")).await.unwrap();
        assert!(!created.id.is_empty());

        let found = store.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.name, "Alice");
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let store = MemoryAccountStore::new();
        store.create(new_account("alice@example.com")).await.unwrap();

        assert!(store.find_by_email("Alice@example.com").await.unwrap().is_none());
        assert!(store.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryAccountStore::new();
        store.create(new_account("alice@example.com")).await.unwrap();

        let second = store.create(new_account("alice@example.com")).await;
        assert_eq!(
            second.unwrap_err(),
            StoreError::DuplicateKey("alice@example.com".to_string())
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = MemoryAccountStore::new();
        let a = store.create(new_account("a@example.com")).await.unwrap();
        let b = store.create(new_account("b@example.com")).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
