//! Ingredient API endpoints.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use super::{
    alert_headers, check_existing, check_new, created_headers, index_entity,
    rebuild_search_index_async, validate, Alert, Path, SearchParams,
};
use crate::errors::AppError;
use crate::models::{Entity, EntityKind, Ingredient};
use crate::search::SearchDocument;
use crate::AppState;

/// GET /api/ingredients - List all ingredients.
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    tracing::debug!("REST request to get all Ingredients");
    Ok(Json(state.repo.list_ingredients().await?))
}

/// GET /api/ingredients/:id - Get a single ingredient.
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ingredient>, AppError> {
    tracing::debug!("REST request to get Ingredient : {}", id);
    state
        .repo
        .get_ingredient(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Ingredient {} not found", id)))
}

/// POST /api/ingredients - Create a new ingredient.
pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(ingredient): Json<Ingredient>,
) -> Result<(StatusCode, HeaderMap, Json<Ingredient>), AppError> {
    tracing::debug!("REST request to save Ingredient : {:?}", ingredient);
    check_new(&ingredient)?;
    validate(&ingredient)?;

    let created = state.repo.create_ingredient(&ingredient).await?;
    index_entity(&state, SearchDocument::from(&created)).await;

    let id = created.id.unwrap_or_default();
    Ok((
        StatusCode::CREATED,
        created_headers(EntityKind::Ingredient, id),
        Json(created),
    ))
}

/// PUT /api/ingredients/:id - Replace an ingredient.
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(ingredient): Json<Ingredient>,
) -> Result<(HeaderMap, Json<Ingredient>), AppError> {
    tracing::debug!("REST request to update Ingredient : {}, {:?}", id, ingredient);
    check_existing(&state, id, &ingredient).await?;
    validate(&ingredient)?;

    let updated = state.repo.update_ingredient(id, &ingredient).await?;
    // Recipe documents carry ingredient names.
    rebuild_search_index_async(&state).await;

    Ok((
        alert_headers(EntityKind::Ingredient, Alert::Updated, id),
        Json(updated),
    ))
}

/// PATCH /api/ingredients/:id - Update the given fields of an ingredient.
pub async fn partial_update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<Ingredient>,
) -> Result<(HeaderMap, Json<Ingredient>), AppError> {
    tracing::debug!("REST request to partial update Ingredient : {}, {:?}", id, patch);
    check_existing(&state, id, &patch).await?;

    let mut ingredient = state
        .repo
        .get_ingredient(id)
        .await?
        .ok_or_else(|| AppError::id_not_found(EntityKind::Ingredient))?;
    ingredient.apply_patch(&patch);
    validate(&ingredient)?;

    let updated = state.repo.update_ingredient(id, &ingredient).await?;
    rebuild_search_index_async(&state).await;

    Ok((
        alert_headers(EntityKind::Ingredient, Alert::Updated, id),
        Json(updated),
    ))
}

/// DELETE /api/ingredients/:id - Delete an ingredient.
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, HeaderMap), AppError> {
    tracing::debug!("REST request to delete Ingredient : {}", id);
    if state.repo.delete_ingredient(id).await? {
        rebuild_search_index_async(&state).await;
    }

    Ok((
        StatusCode::NO_CONTENT,
        alert_headers(EntityKind::Ingredient, Alert::Deleted, id),
    ))
}

/// GET /api/_search/ingredients?query= - Full-text search.
pub async fn search_ingredients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    tracing::debug!("REST request to search Ingredients for query {}", params.query);
    let hits = state
        .search
        .search(EntityKind::Ingredient, &params.query, params.size)?;

    let mut results = Vec::with_capacity(hits.len());
    for hit in hits {
        if let Some(ingredient) = state.repo.get_ingredient(hit.id).await? {
            results.push(ingredient);
        }
    }
    Ok(Json(results))
}
