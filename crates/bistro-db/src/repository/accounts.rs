//! Account operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Account, AccountRole, NewAccount};
use crate::repository::Database;
use crate::utils::normalize_email;

impl Database {
    // ==================== Account Operations ====================

    /// Insert a new account
    ///
    /// A concurrent insert with the same email loses at the unique index and
    /// comes back as `DbError::Duplicate`.
    pub async fn insert_account(&self, account: NewAccount) -> Result<Account, DbError> {
        let now = Utc::now();
        let email = normalize_email(&account.email);

        let result = sqlx::query(
            r#"
            INSERT INTO accounts (username, email, password_hash, role, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&account.username)
        .bind(&email)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::on_insert(e, format!("Account '{}' already exists", email)))?;

        let id: i64 = result.get("id");

        Ok(Account {
            id,
            username: account.username,
            email,
            password_hash: account.password_hash,
            role: account.role,
            created_at: now,
        })
    }

    /// Get an account by email
    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role, created_at
            FROM accounts
            WHERE email = ?
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Account::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Get an account by ID
    pub async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role, created_at
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Account::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> Result<Vec<Account>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role, created_at
            FROM accounts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Account::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// List accounts holding the given role
    pub async fn list_accounts_by_role(&self, role: AccountRole) -> Result<Vec<Account>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role, created_at
            FROM accounts
            WHERE role = ?
            ORDER BY id
            "#,
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Account::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Delete an account
    pub async fn delete_account(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check if any accounts exist
    pub async fn has_accounts(&self) -> Result<bool, DbError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM accounts")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = result.get("count");
        Ok(count > 0)
    }
}
