/*---------- Imports ----------*/
use super::{ConnectionGateway, PushError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeSet;
use tokio::sync::Mutex;

/// Records every post instead of delivering it. Connections marked as gone
/// answer the way API Gateway does for a closed socket.
#[derive(Default)]
pub struct RecordingGateway {
    posts: Mutex<Vec<(String, String)>>,
    gone: Mutex<BTreeSet<String>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mark_gone(&self, connection_id: &str) {
        self.gone.lock().await.insert(connection_id.to_owned());
    }

    /// Delivered posts, with payloads decoded back into JSON.
    pub async fn posts(&self) -> Vec<(String, Value)> {
        self.posts
            .lock()
            .await
            .iter()
            .map(|(connection_id, data)| {
                let payload = serde_json::from_str(data).unwrap_or(Value::Null);

                (connection_id.to_owned(), payload)
            })
            .collect()
    }
}

#[async_trait]
impl ConnectionGateway for RecordingGateway {
    async fn post_to_connection(&self, connection_id: &str, data: &str) -> Result<(), PushError> {
        if self.gone.lock().await.contains(connection_id) {
            return Err(PushError::Gone(connection_id.to_owned()));
        }

        self.posts
            .lock()
            .await
            .push((connection_id.to_owned(), data.to_owned()));

        Ok(())
    }
}
