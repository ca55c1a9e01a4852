//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for all entities; the search index is derived from it.

mod ingredients;
mod recipes;
mod repository;
mod steps;
mod techniques;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ingredient (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipe (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            cooking TEXT NOT NULL DEFAULT 'WITH_COOKING',
            cooking_time INTEGER CHECK (cooking_time BETWEEN 0 AND 65535),
            picture BLOB,
            picture_content_type TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS step (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            action TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS technique (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Many-to-many link tables, owned by the recipe side
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rel_recipe__ingredients (
            recipe_id INTEGER NOT NULL REFERENCES recipe(id) ON DELETE CASCADE,
            ingredients_id INTEGER NOT NULL REFERENCES ingredient(id) ON DELETE CASCADE,
            PRIMARY KEY (recipe_id, ingredients_id)
        );

        CREATE TABLE IF NOT EXISTS rel_recipe__steps (
            recipe_id INTEGER NOT NULL REFERENCES recipe(id) ON DELETE CASCADE,
            steps_id INTEGER NOT NULL REFERENCES step(id) ON DELETE CASCADE,
            PRIMARY KEY (recipe_id, steps_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_ingredient_name ON ingredient(name);
        CREATE INDEX IF NOT EXISTS idx_recipe_name ON recipe(name);
        CREATE INDEX IF NOT EXISTS idx_rel_recipe_ingredients_ingredient ON rel_recipe__ingredients(ingredients_id);
        CREATE INDEX IF NOT EXISTS idx_rel_recipe_steps_step ON rel_recipe__steps(steps_id);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
