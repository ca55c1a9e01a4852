//! Recipe API endpoints.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use super::{
    alert_headers, check_existing, check_new, created_headers, index_entity, unindex_entity,
    validate, Alert, Path, SearchParams,
};
use crate::errors::AppError;
use crate::models::{Entity, EntityKind, Recipe};
use crate::search::SearchDocument;
use crate::AppState;

/// GET /api/recipes - List all recipes with their relations.
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>, AppError> {
    tracing::debug!("REST request to get all Recipes");
    Ok(Json(state.repo.list_recipes().await?))
}

/// GET /api/recipes/:id - Get a single recipe.
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Recipe>, AppError> {
    tracing::debug!("REST request to get Recipe : {}", id);
    state
        .repo
        .get_recipe(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))
}

/// POST /api/recipes - Create a new recipe.
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(recipe): Json<Recipe>,
) -> Result<(StatusCode, HeaderMap, Json<Recipe>), AppError> {
    tracing::debug!("REST request to save Recipe : {:?}", recipe.name);
    check_new(&recipe)?;
    validate(&recipe)?;

    let created = state.repo.create_recipe(&recipe).await?;
    index_entity(&state, SearchDocument::from(&created)).await;

    let id = created.id.unwrap_or_default();
    Ok((
        StatusCode::CREATED,
        created_headers(EntityKind::Recipe, id),
        Json(created),
    ))
}

/// PUT /api/recipes/:id - Replace a recipe, including its relations.
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(recipe): Json<Recipe>,
) -> Result<(HeaderMap, Json<Recipe>), AppError> {
    tracing::debug!("REST request to update Recipe : {}, {:?}", id, recipe.name);
    check_existing(&state, id, &recipe).await?;
    validate(&recipe)?;

    let updated = state.repo.update_recipe(id, &recipe).await?;
    index_entity(&state, SearchDocument::from(&updated)).await;

    Ok((
        alert_headers(EntityKind::Recipe, Alert::Updated, id),
        Json(updated),
    ))
}

/// PATCH /api/recipes/:id - Update the given scalar fields of a recipe.
pub async fn partial_update_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<Recipe>,
) -> Result<(HeaderMap, Json<Recipe>), AppError> {
    tracing::debug!("REST request to partial update Recipe : {}", id);
    check_existing(&state, id, &patch).await?;

    let mut recipe = state
        .repo
        .get_recipe(id)
        .await?
        .ok_or_else(|| AppError::id_not_found(EntityKind::Recipe))?;
    recipe.apply_patch(&patch);
    validate(&recipe)?;

    let updated = state.repo.update_recipe(id, &recipe).await?;
    index_entity(&state, SearchDocument::from(&updated)).await;

    Ok((
        alert_headers(EntityKind::Recipe, Alert::Updated, id),
        Json(updated),
    ))
}

/// DELETE /api/recipes/:id - Delete a recipe.
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, HeaderMap), AppError> {
    tracing::debug!("REST request to delete Recipe : {}", id);
    if state.repo.delete_recipe(id).await? {
        unindex_entity(&state, EntityKind::Recipe, id).await;
    }

    Ok((
        StatusCode::NO_CONTENT,
        alert_headers(EntityKind::Recipe, Alert::Deleted, id),
    ))
}

/// GET /api/_search/recipes?query= - Full-text search over names, ingredients and steps.
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    tracing::debug!("REST request to search Recipes for query {}", params.query);
    let hits = state
        .search
        .search(EntityKind::Recipe, &params.query, params.size)?;

    let mut results = Vec::with_capacity(hits.len());
    for hit in hits {
        if let Some(recipe) = state.repo.get_recipe(hit.id).await? {
            results.push(recipe);
        }
    }
    Ok(Json(results))
}
