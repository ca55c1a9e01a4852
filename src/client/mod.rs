//! HTTP client for the gateway's REST surface.
//!
//! Every entity resource is addressed the same way, so the client is generic over
//! [`Entity`] and derives its paths from [`Entity::KIND`].

mod error;

pub use error::RequestFailure;

use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};

use crate::models::Entity;

/// Content type of `PATCH` bodies.
pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resource_url<E: Entity>(&self) -> String {
        format!("{}/api/{}", self.base_url, E::KIND.plural())
    }

    fn entity_url<E: Entity>(&self, id: i64) -> String {
        format!("{}/{}", self.resource_url::<E>(), id)
    }

    /// GET /api/{plural}?cacheBuster={epoch millis}
    pub async fn list<E: Entity>(&self) -> Result<Vec<E>, RequestFailure> {
        let cache_buster = chrono::Utc::now().timestamp_millis();
        let request = self
            .http
            .get(self.resource_url::<E>())
            .query(&[("cacheBuster", cache_buster)]);
        self.send_json(request).await
    }

    /// GET /api/_search/{plural}?query={q}
    pub async fn search<E: Entity>(&self, query: &str) -> Result<Vec<E>, RequestFailure> {
        let url = format!("{}/api/_search/{}", self.base_url, E::KIND.plural());
        let request = self.http.get(url).query(&[("query", query)]);
        self.send_json(request).await
    }

    /// GET /api/{plural}/{id}
    pub async fn get<E: Entity>(&self, id: i64) -> Result<E, RequestFailure> {
        let request = self.http.get(self.entity_url::<E>(id));
        self.send_json(request).await
    }

    /// POST /api/{plural}
    pub async fn create<E: Entity>(&self, entity: &E) -> Result<E, RequestFailure> {
        let request = self.http.post(self.resource_url::<E>()).json(entity);
        self.send_json(request).await
    }

    /// PUT /api/{plural}/{id}
    pub async fn update<E: Entity>(&self, entity: &E) -> Result<E, RequestFailure> {
        let id = require_id(entity)?;
        let request = self.http.put(self.entity_url::<E>(id)).json(entity);
        self.send_json(request).await
    }

    /// PATCH /api/{plural}/{id}; only the fields present in `entity` are changed.
    pub async fn partial_update<E: Entity>(&self, entity: &E) -> Result<E, RequestFailure> {
        let id = require_id(entity)?;
        let body = serde_json::to_vec(entity)
            .map_err(|e| RequestFailure::local(format!("Failed to encode body: {}", e)))?;
        let request = self
            .http
            .patch(self.entity_url::<E>(id))
            .header(CONTENT_TYPE, MERGE_PATCH_JSON)
            .body(body);
        self.send_json(request).await
    }

    /// DELETE /api/{plural}/{id}
    pub async fn delete<E: Entity>(&self, id: i64) -> Result<(), RequestFailure> {
        let request = self.http.delete(self.entity_url::<E>(id));
        self.send(request).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, RequestFailure> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("{} {}", status.as_u16(), response.url());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(RequestFailure::from_body(status.as_u16(), &body))
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, RequestFailure> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }
}

fn require_id<E: Entity>(entity: &E) -> Result<i64, RequestFailure> {
    entity.id().ok_or_else(|| {
        RequestFailure::local(format!("Cannot update a {} without an id", E::KIND))
    })
}
