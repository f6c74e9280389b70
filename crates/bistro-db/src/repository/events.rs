//! Event operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Event, NewEvent};

use super::Database;

impl Database {
    /// Insert a new event
    pub async fn insert_event(&self, event: NewEvent) -> Result<Event, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO events (name, date, time, image, location, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&event.name)
        .bind(&event.date)
        .bind(&event.time)
        .bind(&event.image)
        .bind(&event.location)
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        Ok(Event {
            id: result.get("id"),
            name: event.name,
            date: event.date,
            time: event.time,
            image: event.image,
            location: event.location,
            created_at: now,
        })
    }

    /// List events in date order
    pub async fn list_events(&self) -> Result<Vec<Event>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, date, time, image, location, created_at
            FROM events
            ORDER BY date, time
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Event::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Replace an event's fields
    pub async fn update_event(&self, id: i64, event: NewEvent) -> Result<Option<Event>, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET name = ?, date = ?, time = ?, image = ?, location = ?
            WHERE id = ?
            RETURNING id, name, date, time, image, location, created_at
            "#,
        )
        .bind(&event.name)
        .bind(&event.date)
        .bind(&event.time)
        .bind(&event.image)
        .bind(&event.location)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Event::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Delete an event
    pub async fn delete_event(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
