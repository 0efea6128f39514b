use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::client::ApiClient;
use crate::error::{AppError, AppResult};
use crate::token_store::TokenStore;

use super::user::User;

/// Point-in-time view of the session. `user == None` means Anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Authoritative "who is logged in" state, injected wherever session
/// decisions are made (no module-level globals).
///
/// All lifecycle operations acquire `write_gate` for their full duration,
/// network call included, so overlapping mutations resolve in acquisition
/// order: a stale `fetch_me` can never clobber a later `logout`. Reads go
/// through the lock-free-ish `snapshot` and observe either the pre-call or
/// fully-post-call state, never a partial one.
pub struct SessionStore {
    state: RwLock<SessionState>,
    write_gate: Mutex<()>,
    client: Arc<ApiClient>,
    tokens: Arc<TokenStore>,
}

impl SessionStore {
    pub fn new(client: Arc<ApiClient>, tokens: Arc<TokenStore>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            write_gate: Mutex::new(()),
            client,
            tokens,
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Authenticate against `/auth/login`. On success the session becomes
    /// Authenticated with the returned profile; the session cookie carried by
    /// the client is the credential from here on, so any stale durable token
    /// is cleared rather than kept alongside it. On failure nothing changes.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let _gate = self.write_gate.lock().await;
        let body = serde_json::json!({ "email": email, "password": password });
        let val = match self.client.post("/auth/login", &body).await {
            Ok(v) => v,
            Err(AppError::Request { status, body }) if (400..500).contains(&status) => {
                tracing::info!(target: "pitchside", "auth.login rejected email={} status={}", email, status);
                let reason = if body.is_empty() { "invalid credentials".to_string() } else { body };
                return Err(AppError::auth(reason));
            }
            Err(e) => return Err(e),
        };
        let user: User = serde_json::from_value(
            val.get("user").cloned().ok_or_else(|| AppError::auth("login response missing user"))?,
        )
        .map_err(|e| AppError::auth(format!("malformed login response: {}", e)))?;

        if let Err(e) = self.tokens.clear() {
            tracing::warn!(target: "pitchside", "auth.login token clear failed: {}", e);
        }
        {
            let mut st = self.state.write();
            st.user = Some(user.clone());
            st.token = None;
        }
        tracing::info!(target: "pitchside", "auth.login user={} role={}", user.id, user.role);
        Ok(user)
    }

    /// Direct assignment for callers that already hold a validated profile,
    /// e.g. right after registration.
    pub async fn set_user(&self, user: User) {
        let _gate = self.write_gate.lock().await;
        self.state.write().user = Some(user);
    }

    /// Install or clear an externally-issued bearer token. The durable copy
    /// is written first; on storage failure the in-memory token is unchanged.
    pub async fn set_token(&self, token: Option<String>) -> AppResult<()> {
        let _gate = self.write_gate.lock().await;
        match &token {
            Some(t) => self.tokens.save(t)?,
            None => self.tokens.clear()?,
        }
        self.state.write().token = token;
        Ok(())
    }

    /// Rehydrate the session from `/users/me` using whatever credential is
    /// attached (cookie or bearer token). An unauthenticated answer surfaces
    /// as `SessionExpired`; callers treat that as Anonymous.
    pub async fn fetch_me(&self) -> AppResult<User> {
        let _gate = self.write_gate.lock().await;
        let val = match self.client.get("/users/me").await {
            Ok(v) => v,
            Err(AppError::Request { status, .. }) if status == 401 || status == 403 => {
                return Err(AppError::session_expired("no valid session"));
            }
            Err(e) => return Err(e),
        };
        let user: User = serde_json::from_value(val)
            .map_err(|e| AppError::session_expired(format!("malformed profile: {}", e)))?;
        self.state.write().user = Some(user.clone());
        tracing::debug!(target: "pitchside", "session.rehydrated user={}", user.id);
        Ok(user)
    }

    /// Drop to Anonymous and remove the durable token. Idempotent and
    /// infallible; a failed file removal is logged, not surfaced.
    pub async fn logout(&self) {
        let _gate = self.write_gate.lock().await;
        if let Err(e) = self.tokens.clear() {
            tracing::warn!(target: "pitchside", "session.logout token clear failed: {}", e);
        }
        let mut st = self.state.write();
        st.user = None;
        st.token = None;
        tracing::info!(target: "pitchside", "session.logout");
    }
}
