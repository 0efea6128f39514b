//! HTTP client adapter. Wraps a `reqwest::Client` configured for the API base
//! endpoint, carries cookies on every request (CSRF flows) and injects an
//! `Authorization: Bearer` header whenever the durable token store holds one.
//! The adapter never mutates session state and never recovers errors.

use crate::error::{AppError, AppResult};
use crate::token_store::TokenStore;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Url};
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    client: reqwest::Client,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    pub fn new(base: &str, tokens: Arc<TokenStore>) -> AppResult<Self> {
        let base = Url::parse(base).map_err(|e| AppError::config(format!("invalid base URL '{}': {}", base, e)))?;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| AppError::config(format!("http client: {}", e)))?;
        Ok(Self { base, client, tokens })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub async fn get(&self, path: &str) -> AppResult<serde_json::Value> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &serde_json::Value) -> AppResult<serde_json::Value> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &serde_json::Value) -> AppResult<serde_json::Value> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<serde_json::Value> {
        self.send(Method::DELETE, path, None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> AppResult<serde_json::Value> {
        let url = self
            .base
            .join(path)
            .map_err(|e| AppError::config(format!("invalid path '{}': {}", path, e)))?;
        let mut req = self.client.request(method.clone(), url);
        // Read the durable token fresh per request so a token installed or
        // cleared mid-session takes effect immediately.
        if let Some(token) = self.tokens.load()? {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| AppError::storage(format!("token not header-safe: {}", e)))?;
            req = req.header(AUTHORIZATION, value);
        }
        if let Some(b) = body {
            req = req.json(b);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::debug!(target: "pitchside", "{} {} -> {}", method, path, status);
            return Err(AppError::request(status.as_u16(), text));
        }
        if text.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| AppError::request(status.as_u16(), format!("invalid json body: {}", e)))
    }
}
