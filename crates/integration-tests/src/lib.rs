//! Integration tests for the QuickMart storefront.
//!
//! Each test starts the real router on an ephemeral port with latency
//! simulation turned off and talks to it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p quickmart-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use quickmart_storefront::config::StorefrontConfig;
use quickmart_storefront::routes;
use quickmart_storefront::state::AppState;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Errors while starting a test server.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A running storefront with its own data directory.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    data_dir: TempDir,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a storefront over a fresh data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory, state or listener cannot be
    /// created.
    pub async fn new() -> Result<Self, BoxError> {
        let data_dir = tempfile::tempdir()?;
        let (base_url, server) = start(data_dir.path()).await?;
        Ok(Self {
            client: Client::new(),
            base_url,
            data_dir,
            server,
        })
    }

    /// Stop the server and start a new one over the same data directory,
    /// as happens when the app is relaunched on the same device.
    ///
    /// # Errors
    ///
    /// Returns an error if the new server cannot be started.
    pub async fn restart(&mut self) -> Result<(), BoxError> {
        self.server.abort();
        let (base_url, server) = start(self.data_dir.path()).await?;
        self.base_url = base_url;
        self.server = server;
        Ok(())
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.path().to_path_buf()
    }

    /// Send a request and decode the JSON response body. An empty body
    /// decodes to `null`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value), BoxError> {
        let mut request = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        if let Some(json) = body {
            request = request.json(&json);
        }
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, json))
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn get(&self, path: &str) -> Result<(StatusCode, Value), BoxError> {
        self.request(Method::GET, path, None).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn post(&self, path: &str, body: Value) -> Result<(StatusCode, Value), BoxError> {
        self.request(Method::POST, path, Some(body)).await
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn start(data_dir: &Path) -> Result<(String, JoinHandle<()>), BoxError> {
    let state = AppState::load(&StorefrontConfig::local(data_dir)).await?;

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    let app = routes::app(state);
    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Test server stopped");
        }
    });

    Ok((format!("http://{addr}"), server))
}
