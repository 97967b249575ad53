/*---------- Imports ----------*/
use crate::models::{
    chat::{Chat, Message},
    connection::Connection,
};
use async_trait::async_trait;
use thiserror::Error;

pub mod dynamodb;
pub mod memory;

/*---------- Enums ----------*/
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{operation} request failed: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("couldn't convert item: {0}")]
    Conversion(#[from] serde_dynamo::Error),

    #[error("chat {0} not found")]
    ChatNotFound(String),
}

impl StoreError {
    pub fn request(operation: &'static str, error: impl Into<BoxError>) -> Self {
        StoreError::Request {
            operation,
            source: error.into(),
        }
    }
}

/*---------- Traits ----------*/

/// Document-store access for the chats table, keyed by `Chat::id`.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Writes the whole chat, replacing any item with the same id.
    async fn put_chat(&self, chat: &Chat) -> Result<(), StoreError>;

    async fn get_chat(&self, chat_id: &str) -> Result<Option<Chat>, StoreError>;

    /// Appends to `Messages`, creating the list if the chat has none yet.
    /// Fails with `ChatNotFound` when no chat has this id.
    async fn append_message(&self, chat_id: &str, message: &Message) -> Result<(), StoreError>;

    /// Overwrites the `Participants` field as a whole.
    async fn set_participants(
        &self,
        chat_id: &str,
        participants: &[String],
    ) -> Result<(), StoreError>;

    /// Chats whose `Participants` contain `user_id`. Single page, no pagination.
    async fn find_chats_by_participant(&self, user_id: &str) -> Result<Vec<Chat>, StoreError>;
}

#[async_trait]
pub trait ConnectionStore: Send + Sync {
    async fn put_connection(&self, connection: &Connection) -> Result<(), StoreError>;

    async fn delete_connection(&self, connection_id: &str) -> Result<(), StoreError>;
}
