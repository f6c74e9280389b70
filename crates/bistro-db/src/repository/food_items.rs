//! Menu item operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{FoodItem, NewFoodItem};

use super::Database;

impl Database {
    /// Insert a new menu item
    pub async fn insert_food_item(&self, item: NewFoodItem) -> Result<FoodItem, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO food_items (name, rating, category, image, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&item.name)
        .bind(item.rating)
        .bind(&item.category)
        .bind(&item.image)
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        Ok(FoodItem {
            id: result.get("id"),
            name: item.name,
            rating: item.rating,
            category: item.category,
            image: item.image,
            created_at: now,
        })
    }

    /// List the menu
    pub async fn list_food_items(&self) -> Result<Vec<FoodItem>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, rating, category, image, created_at
            FROM food_items
            ORDER BY category, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| FoodItem::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Get a menu item by ID
    pub async fn get_food_item(&self, id: i64) -> Result<Option<FoodItem>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, name, rating, category, image, created_at
            FROM food_items
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| FoodItem::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Replace a menu item's fields
    pub async fn update_food_item(&self, id: i64, item: NewFoodItem) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE food_items
            SET name = ?, rating = ?, category = ?, image = ?
            WHERE id = ?
            "#,
        )
        .bind(&item.name)
        .bind(item.rating)
        .bind(&item.category)
        .bind(&item.image)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a menu item
    pub async fn delete_food_item(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM food_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(name: &str, category: &str) -> NewFoodItem {
        NewFoodItem {
            name: name.to_string(),
            rating: 4.5,
            category: category.to_string(),
            image: format!("https://img.example/{}.jpg", name),
        }
    }

    #[tokio::test]
    async fn test_food_item_lifecycle() {
        let db = Database::in_memory().await.unwrap();

        let soup = db.insert_food_item(dish("soup", "starters")).await.unwrap();
        db.insert_food_item(dish("cake", "desserts")).await.unwrap();

        let menu = db.list_food_items().await.unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].name, "cake");

        assert!(db.update_food_item(soup.id, dish("bisque", "starters")).await.unwrap());
        let updated = db.get_food_item(soup.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "bisque");

        assert!(db.delete_food_item(soup.id).await.unwrap());
        assert!(!db.update_food_item(soup.id, dish("x", "y")).await.unwrap());
        assert_eq!(db.list_food_items().await.unwrap().len(), 1);
    }
}
