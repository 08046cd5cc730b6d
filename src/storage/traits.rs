//! Abstract storage interface for pluggable account backends
//!
//! Any backend must enforce email uniqueness itself: `create` either inserts
//! or fails with `StoreError::DuplicateKey`, as one atomic step.

use async_trait::async_trait;

use crate::auth::account::{Account, NewAccount};
use crate::error::StoreError;

/// Account storage interface
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Get account by email (case-sensitive exact match)
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Create a new account, assigning its id and creation time
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError>;
}
