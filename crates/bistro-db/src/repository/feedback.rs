//! Feedback operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Feedback, NewFeedback};

use super::Database;

impl Database {
    /// Store a piece of guest feedback
    pub async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO feedback (name, email, message, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&feedback.name)
        .bind(&feedback.email)
        .bind(&feedback.message)
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        Ok(Feedback {
            id: result.get("id"),
            name: feedback.name,
            email: feedback.email,
            message: feedback.message,
            created_at: now,
        })
    }

    /// List all feedback, newest first
    pub async fn list_feedback(&self) -> Result<Vec<Feedback>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, message, created_at
            FROM feedback
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Feedback::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Delete a piece of feedback
    pub async fn delete_feedback(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
