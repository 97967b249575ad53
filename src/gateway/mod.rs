/*---------- Imports ----------*/
use crate::storage::BoxError;
use async_trait::async_trait;
use thiserror::Error;

pub mod apigateway;
pub mod memory;

/*---------- Enums ----------*/
#[derive(Error, Debug)]
pub enum PushError {
    #[error("connection {0} no longer exists")]
    Gone(String),

    #[error("couldn't post to connection {connection_id}: {source}")]
    Failed {
        connection_id: String,
        #[source]
        source: BoxError,
    },
}

/*---------- Traits ----------*/

/// Per-connection push API of the WebSocket gateway.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionGateway: Send + Sync {
    async fn post_to_connection(&self, connection_id: &str, data: &str) -> Result<(), PushError>;
}
