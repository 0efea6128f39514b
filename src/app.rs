//! Application context: explicit construction and wiring of every component,
//! in place of module-level globals. Built once at startup and passed to
//! whatever drives the shell (the REPL binary, tests, an embedding UI).

use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::identity::SessionStore;
use crate::preferences::Preferences;
use crate::router::Router;
use crate::token_store::TokenStore;

pub struct App {
    pub config: Config,
    pub tokens: Arc<TokenStore>,
    pub client: Arc<ApiClient>,
    pub session: Arc<SessionStore>,
    pub preferences: Preferences,
    pub router: Router,
}

impl App {
    pub fn new(config: Config) -> AppResult<Self> {
        let tokens = Arc::new(TokenStore::new(&config.token_file));
        let client = Arc::new(ApiClient::new(&config.api_base, tokens.clone())?);
        let session = Arc::new(SessionStore::new(client.clone(), tokens.clone()));
        let preferences = Preferences::new(client.clone());
        Ok(Self {
            config,
            tokens,
            client,
            session,
            preferences,
            router: Router::with_default_routes(),
        })
    }

    pub fn from_env() -> AppResult<Self> {
        Self::new(Config::from_env())
    }
}
