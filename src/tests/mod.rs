//! Integration tests for the recipes gateway.
//!
//! Every test starts the router on an ephemeral port with a fresh database and index.
//! `api` drives the REST surface directly; `e2e` drives it through the view-models.

mod e2e;

use std::sync::Arc;

use axum::Router;
use reqwest::Client;
use serde_json::Value;
use tempfile::TempDir;

use crate::actions::Store;
use crate::client::ApiClient;
use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::search::SearchIndex;
use crate::{create_router, AppState};

/// Serve `app` on an already bound listener and return its base URL.
async fn serve(listener: tokio::net::TcpListener, app: Router) -> String {
    let addr = listener.local_addr().expect("Failed to get addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Wait for server to start
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    format!("http://{}", addr)
}

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    repo: Arc<Repository>,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let index_path = temp_dir.path().join("index");

        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        let search = Arc::new(SearchIndex::open(&index_path).expect("Failed to init search"));

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");

        let config = Config {
            db_path,
            index_path,
            bind_addr: addr,
            log_level: "warn".to_string(),
            api_url: format!("http://{}", addr),
            api_token: None,
        };

        let state = AppState {
            repo: repo.clone(),
            search,
            config: Arc::new(config),
        };

        let base_url = serve(listener, create_router(state)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            repo,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A client-side store pointed at this server.
    fn store(&self) -> Store {
        Store::new(ApiClient::new(&self.base_url))
    }

    /// POST a JSON body and return the created entity.
    async fn create(&self, path: &str, body: Value) -> Value {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201, "POST {} failed", path);
        resp.json().await.unwrap()
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        let body = resp.json().await.unwrap_or(Value::Null);
        (status, body)
    }
}
