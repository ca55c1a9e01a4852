//! Recipe persistence, including the ingredient and step link tables.

use std::collections::HashMap;

use sqlx::{Row, Sqlite, Transaction};

use super::Repository;
use crate::errors::AppError;
use crate::models::{blob, Cooking, EntityKind, FieldError, Ingredient, Recipe, Step};

const RECIPE_COLUMNS: &str = "id, name, cooking, cooking_time, picture, picture_content_type";

impl Repository {
    /// List all recipes with their ingredient and step references.
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, AppError> {
        let rows = sqlx::query(&format!("SELECT {} FROM recipe ORDER BY id", RECIPE_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        let mut ingredients = self.ingredient_links(None).await?;
        let mut steps = self.step_links(None).await?;

        Ok(rows
            .iter()
            .map(|row| {
                let mut recipe = recipe_from_row(row);
                let id = recipe.id.unwrap_or_default();
                recipe.ingredients = Some(ingredients.remove(&id).unwrap_or_default());
                recipe.steps = Some(steps.remove(&id).unwrap_or_default());
                recipe
            })
            .collect())
    }

    /// Get a recipe by ID, eagerly loading its relations.
    pub async fn get_recipe(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM recipe WHERE id = ?", RECIPE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut recipe = recipe_from_row(&row);
        recipe.ingredients = Some(
            self.ingredient_links(Some(id))
                .await?
                .remove(&id)
                .unwrap_or_default(),
        );
        recipe.steps = Some(self.step_links(Some(id)).await?.remove(&id).unwrap_or_default());
        Ok(Some(recipe))
    }

    /// Insert a new recipe and its relation links in one transaction.
    pub async fn create_recipe(&self, recipe: &Recipe) -> Result<Recipe, AppError> {
        self.check_relations(recipe).await?;
        let picture = decode_picture(recipe)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO recipe (name, cooking, cooking_time, picture, picture_content_type) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&recipe.name)
        .bind(recipe.cooking.unwrap_or_default().as_str())
        .bind(recipe.cooking_time)
        .bind(&picture)
        .bind(&recipe.picture_content_type)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        replace_links(&mut tx, id, recipe).await?;
        tx.commit().await?;

        self.get_recipe(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Recipe {} vanished after insert", id)))
    }

    /// Replace every column and relation of an existing recipe.
    pub async fn update_recipe(&self, id: i64, recipe: &Recipe) -> Result<Recipe, AppError> {
        self.check_relations(recipe).await?;
        let picture = decode_picture(recipe)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE recipe SET name = ?, cooking = ?, cooking_time = ?, picture = ?, picture_content_type = ? WHERE id = ?",
        )
        .bind(&recipe.name)
        .bind(recipe.cooking.unwrap_or_default().as_str())
        .bind(recipe.cooking_time)
        .bind(&picture)
        .bind(&recipe.picture_content_type)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Recipe {} not found", id)));
        }

        replace_links(&mut tx, id, recipe).await?;
        tx.commit().await?;

        self.get_recipe(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))
    }

    /// Delete a recipe; link rows go with it.
    pub async fn delete_recipe(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM recipe WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn check_relations(&self, recipe: &Recipe) -> Result<(), AppError> {
        let mut errors = Vec::new();

        let missing = self
            .missing_ids(EntityKind::Ingredient, &recipe.ingredient_ids())
            .await?;
        if !missing.is_empty() {
            errors.push(FieldError::new(
                "ingredients",
                format!("Unknown ingredient ids: {:?}", missing),
            ));
        }

        let missing = self.missing_ids(EntityKind::Step, &recipe.step_ids()).await?;
        if !missing.is_empty() {
            errors.push(FieldError::new(
                "steps",
                format!("Unknown step ids: {:?}", missing),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation {
                entity: EntityKind::Recipe,
                errors,
            })
        }
    }

    /// Ingredient references grouped by recipe id, optionally for a single recipe.
    async fn ingredient_links(
        &self,
        recipe_id: Option<i64>,
    ) -> Result<HashMap<i64, Vec<Ingredient>>, AppError> {
        let rows = sqlx::query(
            r#"SELECT r.recipe_id, i.id, i.name
               FROM rel_recipe__ingredients r
               JOIN ingredient i ON i.id = r.ingredients_id
               WHERE ? IS NULL OR r.recipe_id = ?
               ORDER BY i.id"#,
        )
        .bind(recipe_id)
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await?;

        let mut links: HashMap<i64, Vec<Ingredient>> = HashMap::new();
        for row in rows {
            links
                .entry(row.get("recipe_id"))
                .or_default()
                .push(Ingredient {
                    id: Some(row.get("id")),
                    name: row.get("name"),
                    recipes: None,
                });
        }
        Ok(links)
    }

    /// Step references grouped by recipe id, optionally for a single recipe.
    async fn step_links(&self, recipe_id: Option<i64>) -> Result<HashMap<i64, Vec<Step>>, AppError> {
        let rows = sqlx::query(
            r#"SELECT r.recipe_id, s.id, s.action
               FROM rel_recipe__steps r
               JOIN step s ON s.id = r.steps_id
               WHERE ? IS NULL OR r.recipe_id = ?
               ORDER BY s.id"#,
        )
        .bind(recipe_id)
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await?;

        let mut links: HashMap<i64, Vec<Step>> = HashMap::new();
        for row in rows {
            links.entry(row.get("recipe_id")).or_default().push(Step {
                id: Some(row.get("id")),
                action: row.get("action"),
                recipes: None,
            });
        }
        Ok(links)
    }
}

async fn replace_links(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: i64,
    recipe: &Recipe,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM rel_recipe__ingredients WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM rel_recipe__steps WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut **tx)
        .await?;

    for ingredient_id in recipe.ingredient_ids() {
        sqlx::query(
            "INSERT OR IGNORE INTO rel_recipe__ingredients (recipe_id, ingredients_id) VALUES (?, ?)",
        )
        .bind(recipe_id)
        .bind(ingredient_id)
        .execute(&mut **tx)
        .await?;
    }
    for step_id in recipe.step_ids() {
        sqlx::query("INSERT OR IGNORE INTO rel_recipe__steps (recipe_id, steps_id) VALUES (?, ?)")
            .bind(recipe_id)
            .bind(step_id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

fn decode_picture(recipe: &Recipe) -> Result<Option<Vec<u8>>, AppError> {
    recipe
        .picture
        .as_deref()
        .map(blob::decode)
        .transpose()
        .map_err(|e| AppError::Validation {
            entity: EntityKind::Recipe,
            errors: vec![FieldError::new(
                "picture",
                format!("Invalid base64 data: {}", e),
            )],
        })
}

fn recipe_from_row(row: &sqlx::sqlite::SqliteRow) -> Recipe {
    let cooking: String = row.get("cooking");
    let picture: Option<Vec<u8>> = row.get("picture");

    Recipe {
        id: Some(row.get("id")),
        name: row.get("name"),
        cooking: Cooking::parse(&cooking),
        cooking_time: row.get("cooking_time"),
        picture: picture.map(|bytes| blob::encode(&bytes)),
        picture_content_type: row.get("picture_content_type"),
        ingredients: None,
        steps: None,
    }
}
