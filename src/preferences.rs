//! Thin wrappers over the preferences endpoints. Preferences are an opaque
//! JSON object owned by the server.

use crate::client::ApiClient;
use crate::error::AppResult;
use std::sync::Arc;

#[derive(Clone)]
pub struct Preferences {
    client: Arc<ApiClient>,
}

impl Preferences {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> AppResult<serde_json::Value> {
        self.client.get("/auth/preferences").await
    }

    pub async fn save(&self, prefs: &serde_json::Value) -> AppResult<serde_json::Value> {
        self.client.post("/auth/preferences", prefs).await
    }
}
