/*---------- Imports ----------*/
use std::env;
use thiserror::Error;

/*---------- Constants ----------*/
const DEFAULT_CONNECTIONS_TABLE: &str = "WebSocketConnections";
const DEFAULT_CHATS_TABLE: &str = "Chats";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid WebSocket endpoint: {0}")]
    InvalidEndpoint(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub connections_table: String,
    pub chats_table: String,
    websocket_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            connections_table: non_empty("CONNECTIONS_TABLE")
                .unwrap_or_else(|| DEFAULT_CONNECTIONS_TABLE.to_owned()),
            chats_table: non_empty("CHATS_TABLE").unwrap_or_else(|| DEFAULT_CHATS_TABLE.to_owned()),
            websocket_url: non_empty("WEBSOCKET_URL"),
        }
    }

    /// Only the action router pushes replies, so only it requires the endpoint.
    pub fn websocket_url(&self) -> Result<&str, ConfigError> {
        self.websocket_url
            .as_deref()
            .ok_or(ConfigError::Missing("WEBSOCKET_URL"))
    }
}
