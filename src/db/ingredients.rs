//! Ingredient persistence.

use sqlx::Row;

use super::Repository;
use crate::errors::AppError;
use crate::models::Ingredient;

impl Repository {
    /// List all ingredients.
    pub async fn list_ingredients(&self) -> Result<Vec<Ingredient>, AppError> {
        let rows = sqlx::query("SELECT id, name FROM ingredient ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(ingredient_from_row).collect())
    }

    /// Get an ingredient by ID.
    pub async fn get_ingredient(&self, id: i64) -> Result<Option<Ingredient>, AppError> {
        let row = sqlx::query("SELECT id, name FROM ingredient WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(ingredient_from_row))
    }

    /// Insert a new ingredient and return it with its assigned id.
    pub async fn create_ingredient(&self, ingredient: &Ingredient) -> Result<Ingredient, AppError> {
        let result = sqlx::query("INSERT INTO ingredient (name) VALUES (?)")
            .bind(&ingredient.name)
            .execute(&self.pool)
            .await?;

        Ok(Ingredient {
            id: Some(result.last_insert_rowid()),
            name: ingredient.name.clone(),
            recipes: None,
        })
    }

    /// Replace every column of an existing ingredient.
    pub async fn update_ingredient(
        &self,
        id: i64,
        ingredient: &Ingredient,
    ) -> Result<Ingredient, AppError> {
        let result = sqlx::query("UPDATE ingredient SET name = ? WHERE id = ?")
            .bind(&ingredient.name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Ingredient {} not found", id)));
        }

        Ok(Ingredient {
            id: Some(id),
            name: ingredient.name.clone(),
            recipes: None,
        })
    }

    /// Delete an ingredient, returning whether a row was removed.
    pub async fn delete_ingredient(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM ingredient WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn ingredient_from_row(row: &sqlx::sqlite::SqliteRow) -> Ingredient {
    Ingredient {
        id: Some(row.get("id")),
        name: row.get("name"),
        recipes: None,
    }
}
