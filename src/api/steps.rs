//! Step API endpoints.

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
use crate::models::{Entity, EntityKind, Step};
use crate::search::SearchDocument;
use crate::AppState;

/// GET /api/steps - List all steps.
pub async fn list_steps(State(state): State<AppState>) -> Result<Json<Vec<Step>>, AppError> {
    tracing::debug!("REST request to get all Steps");
    Ok(Json(state.repo.list_steps().await?))
}

/// GET /api/steps/:id - Get a single step.
pub async fn get_step(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Step>, AppError> {
    tracing::debug!("REST request to get Step : {}", id);
    state
        .repo
        .get_step(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Step {} not found", id)))
}

/// POST /api/steps - Create a new step.
pub async fn create_step(
    State(state): State<AppState>,
    Json(step): Json<Step>,
) -> Result<(StatusCode, HeaderMap, Json<Step>), AppError> {
    tracing::debug!("REST request to save Step : {:?}", step);
    check_new(&step)?;
    validate(&step)?;

    let created = state.repo.create_step(&step).await?;
    index_entity(&state, SearchDocument::from(&created)).await;

    let id = created.id.unwrap_or_default();
    Ok((
        StatusCode::CREATED,
        created_headers(EntityKind::Step, id),
        Json(created),
    ))
}

/// PUT /api/steps/:id - Replace a step.
pub async fn update_step(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(step): Json<Step>,
) -> Result<(HeaderMap, Json<Step>), AppError> {
    tracing::debug!("REST request to update Step : {}, {:?}", id, step);
    check_existing(&state, id, &step).await?;
    validate(&step)?;

    let updated = state.repo.update_step(id, &step).await?;
    // Recipe documents carry step actions.
    rebuild_search_index_async(&state).await;

    Ok((
        alert_headers(EntityKind::Step, Alert::Updated, id),
        Json(updated),
    ))
}

/// PATCH /api/steps/:id - Update the given fields of a step.
pub async fn partial_update_step(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<Step>,
) -> Result<(HeaderMap, Json<Step>), AppError> {
    tracing::debug!("REST request to partial update Step : {}, {:?}", id, patch);
    check_existing(&state, id, &patch).await?;

    let mut step = state
        .repo
        .get_step(id)
        .await?
        .ok_or_else(|| AppError::id_not_found(EntityKind::Step))?;
    step.apply_patch(&patch);
    validate(&step)?;

    let updated = state.repo.update_step(id, &step).await?;
    rebuild_search_index_async(&state).await;

    Ok((
        alert_headers(EntityKind::Step, Alert::Updated, id),
        Json(updated),
    ))
}

/// DELETE /api/steps/:id - Delete a step.
pub async fn delete_step(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, HeaderMap), AppError> {
    tracing::debug!("REST request to delete Step : {}", id);
    if state.repo.delete_step(id).await? {
        rebuild_search_index_async(&state).await;
    }

    Ok((
        StatusCode::NO_CONTENT,
        alert_headers(EntityKind::Step, Alert::Deleted, id),
    ))
}

/// GET /api/_search/steps?query= - Full-text search.
pub async fn search_steps(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Step>>, AppError> {
    tracing::debug!("REST request to search Steps for query {}", params.query);
    let hits = state
        .search
        .search(EntityKind::Step, &params.query, params.size)?;

    let mut results = Vec::with_capacity(hits.len());
    for hit in hits {
        if let Some(step) = state.repo.get_step(hit.id).await? {
            results.push(step);
        }
    }
    Ok(Json(results))
}
