//! Step persistence.

use sqlx::Row;

use super::Repository;
use crate::errors::AppError;
use crate::models::Step;

impl Repository {
    /// List all steps.
    pub async fn list_steps(&self) -> Result<Vec<Step>, AppError> {
        let rows = sqlx::query("SELECT id, action FROM step ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(step_from_row).collect())
    }

    /// Get a step by ID.
    pub async fn get_step(&self, id: i64) -> Result<Option<Step>, AppError> {
        let row = sqlx::query("SELECT id, action FROM step WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(step_from_row))
    }

    /// Insert a new step.
    pub async fn create_step(&self, step: &Step) -> Result<Step, AppError> {
        let result = sqlx::query("INSERT INTO step (action) VALUES (?)")
            .bind(&step.action)
            .execute(&self.pool)
            .await?;

        Ok(Step {
            id: Some(result.last_insert_rowid()),
            action: step.action.clone(),
            recipes: None,
        })
    }

    /// Replace every column of an existing step.
    pub async fn update_step(&self, id: i64, step: &Step) -> Result<Step, AppError> {
        let result = sqlx::query("UPDATE step SET action = ? WHERE id = ?")
            .bind(&step.action)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Step {} not found", id)));
        }

        Ok(Step {
            id: Some(id),
            action: step.action.clone(),
            recipes: None,
        })
    }

    /// Delete a step, returning whether a row was removed.
    pub async fn delete_step(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM step WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn step_from_row(row: &sqlx::sqlite::SqliteRow) -> Step {
    Step {
        id: Some(row.get("id")),
        action: row.get("action"),
        recipes: None,
    }
}
