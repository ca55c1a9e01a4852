//! Technique API endpoints.

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
use crate::models::{Entity, EntityKind, Technique};
use crate::search::SearchDocument;
use crate::AppState;

/// GET /api/techniques - List all techniques.
pub async fn list_techniques(
    State(state): State<AppState>,
) -> Result<Json<Vec<Technique>>, AppError> {
    tracing::debug!("REST request to get all Techniques");
    Ok(Json(state.repo.list_techniques().await?))
}

/// GET /api/techniques/:id - Get a single technique.
pub async fn get_technique(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Technique>, AppError> {
    tracing::debug!("REST request to get Technique : {}", id);
    state
        .repo
        .get_technique(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Technique {} not found", id)))
}

/// POST /api/techniques - Create a new technique.
pub async fn create_technique(
    State(state): State<AppState>,
    Json(technique): Json<Technique>,
) -> Result<(StatusCode, HeaderMap, Json<Technique>), AppError> {
    tracing::debug!("REST request to save Technique : {:?}", technique);
    check_new(&technique)?;
    validate(&technique)?;

    let created = state.repo.create_technique(&technique).await?;
    index_entity(&state, SearchDocument::from(&created)).await;

    let id = created.id.unwrap_or_default();
    Ok((
        StatusCode::CREATED,
        created_headers(EntityKind::Technique, id),
        Json(created),
    ))
}

/// PUT /api/techniques/:id - Replace a technique.
pub async fn update_technique(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(technique): Json<Technique>,
) -> Result<(HeaderMap, Json<Technique>), AppError> {
    tracing::debug!("REST request to update Technique : {}, {:?}", id, technique);
    check_existing(&state, id, &technique).await?;
    validate(&technique)?;

    let updated = state.repo.update_technique(id, &technique).await?;
    index_entity(&state, SearchDocument::from(&updated)).await;

    Ok((
        alert_headers(EntityKind::Technique, Alert::Updated, id),
        Json(updated),
    ))
}

/// PATCH /api/techniques/:id - Update the given fields of a technique.
pub async fn partial_update_technique(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<Technique>,
) -> Result<(HeaderMap, Json<Technique>), AppError> {
    tracing::debug!("REST request to partial update Technique : {}, {:?}", id, patch);
    check_existing(&state, id, &patch).await?;

    let mut technique = state
        .repo
        .get_technique(id)
        .await?
        .ok_or_else(|| AppError::id_not_found(EntityKind::Technique))?;
    technique.apply_patch(&patch);
    validate(&technique)?;

    let updated = state.repo.update_technique(id, &technique).await?;
    index_entity(&state, SearchDocument::from(&updated)).await;

    Ok((
        alert_headers(EntityKind::Technique, Alert::Updated, id),
        Json(updated),
    ))
}

/// DELETE /api/techniques/:id - Delete a technique.
pub async fn delete_technique(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, HeaderMap), AppError> {
    tracing::debug!("REST request to delete Technique : {}", id);
    if state.repo.delete_technique(id).await? {
        unindex_entity(&state, EntityKind::Technique, id).await;
    }

    Ok((
        StatusCode::NO_CONTENT,
        alert_headers(EntityKind::Technique, Alert::Deleted, id),
    ))
}

/// GET /api/_search/techniques?query= - Full-text search.
pub async fn search_techniques(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Technique>>, AppError> {
    tracing::debug!("REST request to search Techniques for query {}", params.query);
    let hits = state
        .search
        .search(EntityKind::Technique, &params.query, params.size)?;

    let mut results = Vec::with_capacity(hits.len());
    for hit in hits {
        if let Some(technique) = state.repo.get_technique(hit.id).await? {
            results.push(technique);
        }
    }
    Ok(Json(results))
}
