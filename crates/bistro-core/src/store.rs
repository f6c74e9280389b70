//! Credential store abstraction

use async_trait::async_trait;
use bistro_db::{Account, Database, DbError, NewAccount};

/// Persistence the authentication service needs
///
/// Implementations must reject a second account with the same email with
/// `DbError::Duplicate`, including when two inserts race.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by its login email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DbError>;

    /// Persist a new account
    async fn insert(&self, account: NewAccount) -> Result<Account, DbError>;
}

#[async_trait]
impl AccountStore for Database {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DbError> {
        self.get_account_by_email(email).await
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, DbError> {
        self.insert_account(account).await
    }
}
