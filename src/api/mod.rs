//! REST API module.
//!
//! One submodule per entity resource; all of them share the id checks, alert headers
//! and search index maintenance defined here.

mod ingredients;
mod recipes;
mod steps;
mod techniques;

pub use ingredients::*;
pub use recipes::*;
pub use steps::*;
pub use techniques::*;

use axum::extract::{rejection::PathRejection, FromRequestParts};
use axum::http::{header, HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Entity, EntityKind};
use crate::search::SearchDocument;
use crate::AppState;

/// Application name used in alert headers and translation keys.
pub const APPLICATION_NAME: &str = "gatewayApp";

pub const ALERT_HEADER: &str = "x-gatewayapp-alert";
pub const PARAMS_HEADER: &str = "x-gatewayapp-params";

/// Path parameters; a malformed id is answered with the problem body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Query parameters of the `_search` endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    /// Maximum number of results (default: 1000).
    #[serde(default = "default_search_limit")]
    pub size: usize,
}

fn default_search_limit() -> usize {
    crate::search::MAX_RESULTS
}

/// Write outcome announced through the alert header.
#[derive(Debug, Clone, Copy)]
pub enum Alert {
    Created,
    Updated,
    Deleted,
}

impl Alert {
    fn as_str(&self) -> &'static str {
        match self {
            Alert::Created => "created",
            Alert::Updated => "updated",
            Alert::Deleted => "deleted",
        }
    }
}

/// Headers announcing a successful write, e.g. `gatewayApp.recipe.created`.
pub fn alert_headers(kind: EntityKind, alert: Alert, id: i64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let message = format!("{}.{}.{}", APPLICATION_NAME, kind, alert.as_str());
    if let Ok(value) = HeaderValue::from_str(&message) {
        headers.insert(ALERT_HEADER, value);
    }
    headers.insert(PARAMS_HEADER, HeaderValue::from(id));
    headers
}

/// Headers for a `201 Created` response.
pub fn created_headers(kind: EntityKind, id: i64) -> HeaderMap {
    let mut headers = alert_headers(kind, Alert::Created, id);
    if let Ok(location) = HeaderValue::from_str(&format!("/api/{}/{}", kind.plural(), id)) {
        headers.insert(header::LOCATION, location);
    }
    headers
}

/// Reject entities that fail field validation.
pub fn validate<E: Entity>(entity: &E) -> Result<(), AppError> {
    entity.validate().map_err(|errors| AppError::Validation {
        entity: E::KIND,
        errors,
    })
}

/// A create request must not carry an id.
pub fn check_new<E: Entity>(entity: &E) -> Result<(), AppError> {
    if entity.id().is_some() {
        return Err(AppError::id_exists(E::KIND));
    }
    Ok(())
}

/// An update request must carry the id given in its path, and that entity must exist.
pub async fn check_existing<E: Entity>(
    state: &AppState,
    path_id: i64,
    entity: &E,
) -> Result<(), AppError> {
    let Some(body_id) = entity.id() else {
        return Err(AppError::id_null(E::KIND));
    };
    if body_id != path_id {
        return Err(AppError::id_invalid(E::KIND));
    }
    if !state.repo.exists(E::KIND, path_id).await? {
        return Err(AppError::id_not_found(E::KIND));
    }
    Ok(())
}

/// Index a written entity; the index is derived data, so failures only warn.
pub async fn index_entity(state: &AppState, document: SearchDocument) {
    let (kind, id) = (document.kind, document.id);
    if let Err(e) = state.search.index(document).await {
        tracing::warn!("Failed to index {} {}: {}", kind, id, e);
    }
}

/// Remove a deleted entity from the index.
pub async fn unindex_entity(state: &AppState, kind: EntityKind, id: i64) {
    if let Err(e) = state.search.remove(kind, id).await {
        tracing::warn!("Failed to remove {} {} from index: {}", kind, id, e);
    }
}

/// Rebuild the search index after a change that affects other entities' documents.
pub async fn rebuild_search_index_async(state: &AppState) {
    if let Err(e) = rebuild_search_index(state).await {
        tracing::warn!("Failed to rebuild search index: {}", e);
    }
}

/// Build every search document from the database and replace the index contents.
pub async fn rebuild_search_index(state: &AppState) -> Result<usize, AppError> {
    let mut documents: Vec<SearchDocument> = Vec::new();
    documents.extend(state.repo.list_ingredients().await?.iter().map(SearchDocument::from));
    documents.extend(state.repo.list_recipes().await?.iter().map(SearchDocument::from));
    documents.extend(state.repo.list_steps().await?.iter().map(SearchDocument::from));
    documents.extend(state.repo.list_techniques().await?.iter().map(SearchDocument::from));

    state.search.rebuild(&documents).await?;
    Ok(documents.len())
}
