#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use sensor_api::config::AppConfig;
use sensor_api::database::Store;
use sensor_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve a fresh router with an empty in-memory store on the current runtime
    async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = AppConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some(TEST_SECRET.to_string()),
            "STORE_BACKEND" => Some("memory".to_string()),
            "PASSWORD_HASH_COST" => Some("4".to_string()),
            "API_ENABLE_REQUEST_LOGGING" => Some("false".to_string()),
            _ => None,
        })
        .context("failed to build test configuration")?;
        let router = app(AppState::new(config, Store::memory()));

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind test port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let url = self.url("/health");
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register an account and return the response status and body
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({ "email": email, "password": password, "name": name }))
            .send()
            .await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Ok((res.status(), res.json().await?))
    }

    /// Register a throwaway account and return its token
    pub async fn token(&self) -> Result<String> {
        let (status, body) = self.register("sensor@example.com", "secret123", "Sensor Admin").await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {} {}", status, body);
        body["token"]
            .as_str()
            .map(String::from)
            .context("register response has no token")
    }
}

/// Start an isolated server for one test
pub async fn spawn_server() -> Result<TestServer> {
    let server = TestServer::spawn().await?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
