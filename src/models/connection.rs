/*---------- Imports ----------*/
use serde::{Deserialize, Serialize};

/// An open WebSocket session, keyed by the gateway-assigned connection id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: String,
}

impl Connection {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
