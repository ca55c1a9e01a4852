//! Technique persistence.

use sqlx::Row;

use super::Repository;
use crate::errors::AppError;
use crate::models::Technique;

impl Repository {
    /// List all techniques.
    pub async fn list_techniques(&self) -> Result<Vec<Technique>, AppError> {
        let rows = sqlx::query("SELECT id, description FROM technique ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(technique_from_row).collect())
    }

    /// Get a technique by ID.
    pub async fn get_technique(&self, id: i64) -> Result<Option<Technique>, AppError> {
        let row = sqlx::query("SELECT id, description FROM technique WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(technique_from_row))
    }

    /// Insert a new technique.
    pub async fn create_technique(&self, technique: &Technique) -> Result<Technique, AppError> {
        let result = sqlx::query("INSERT INTO technique (description) VALUES (?)")
            .bind(&technique.description)
            .execute(&self.pool)
            .await?;

        Ok(Technique {
            id: Some(result.last_insert_rowid()),
            description: technique.description.clone(),
        })
    }

    /// Replace every column of an existing technique.
    pub async fn update_technique(
        &self,
        id: i64,
        technique: &Technique,
    ) -> Result<Technique, AppError> {
        let result = sqlx::query("UPDATE technique SET description = ? WHERE id = ?")
            .bind(&technique.description)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Technique {} not found", id)));
        }

        Ok(Technique {
            id: Some(id),
            description: technique.description.clone(),
        })
    }

    /// Delete a technique, returning whether a row was removed.
    pub async fn delete_technique(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM technique WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn technique_from_row(row: &sqlx::sqlite::SqliteRow) -> Technique {
    Technique {
        id: Some(row.get("id")),
        description: row.get("description"),
    }
}
