//! Database repository for CRUD operations.
//!
//! Entity-specific operations live in sibling modules as further `impl Repository`
//! blocks; this file holds the shared handle and helpers.

use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::EntityKind;

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pub(super) pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check whether a row with the given id exists for an entity type.
    pub async fn exists(&self, kind: EntityKind, id: i64) -> Result<bool, AppError> {
        // Table names are the fixed singular entity names, never user input.
        let sql = format!("SELECT COUNT(*) AS n FROM {} WHERE id = ?", kind.as_str());
        let row = sqlx::query(&sql).bind(id).fetch_one(&self.pool).await?;
        let n: i64 = row.get("n");
        Ok(n > 0)
    }

    /// Count rows of an entity type.
    pub async fn count(&self, kind: EntityKind) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) AS n FROM {}", kind.as_str());
        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;
        Ok(row.get("n"))
    }

    /// Return the ids from `ids` that have no row in the entity's table.
    pub(super) async fn missing_ids(
        &self,
        kind: EntityKind,
        ids: &[i64],
    ) -> Result<Vec<i64>, AppError> {
        let mut missing = Vec::new();
        for id in ids {
            if !self.exists(kind, *id).await? {
                missing.push(*id);
            }
        }
        Ok(missing)
    }
}
