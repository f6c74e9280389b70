//! Reservation operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewReservation, Reservation, ReservationStatus};

use super::Database;

impl Database {
    /// Insert a new reservation in the pending state
    pub async fn insert_reservation(&self, reservation: NewReservation) -> Result<Reservation, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO reservations (name, phone, email, guests, date, time, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&reservation.name)
        .bind(&reservation.phone)
        .bind(&reservation.email)
        .bind(reservation.guests)
        .bind(&reservation.date)
        .bind(&reservation.time)
        .bind(ReservationStatus::Pending.as_str())
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        Ok(Reservation {
            id: result.get("id"),
            name: reservation.name,
            phone: reservation.phone,
            email: reservation.email,
            guests: reservation.guests,
            date: reservation.date,
            time: reservation.time,
            status: ReservationStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// List all reservations, newest first
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, phone, email, guests, date, time, status, created_at, updated_at
            FROM reservations
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Reservation::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Get a reservation by ID
    pub async fn get_reservation(&self, id: i64) -> Result<Option<Reservation>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, name, phone, email, guests, date, time, status, created_at, updated_at
            FROM reservations
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Reservation::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Set a reservation's review status
    pub async fn set_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<Option<Reservation>, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_reservation(id).await
    }

    /// Delete a reservation
    pub async fn delete_reservation(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
