//! Startup configuration, collected from environment variables so deployments
//! can point the shell at different backends without a rebuild.

use std::path::PathBuf;

pub const ENV_API_BASE: &str = "PITCHSIDE_API_BASE";
pub const ENV_TOKEN_FILE: &str = "PITCHSIDE_TOKEN_FILE";

const DEFAULT_API_BASE: &str = "http://localhost:3000";
const DEFAULT_TOKEN_FILE: &str = ".pitchside/token";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote API (login, profile, preferences endpoints).
    pub api_base: String,
    /// Durable storage location for the bearer token; survives restarts.
    pub token_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let api_base = std::env::var(ENV_API_BASE).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let token_file = std::env::var(ENV_TOKEN_FILE)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_FILE));
        Self { api_base, token_file }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}
