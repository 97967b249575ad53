//! In-process stores with the same observable behaviour as the DynamoDB ones.
//! Used by the test suites and for running the handlers without AWS.

/*---------- Imports ----------*/
use super::{ChatStore, ConnectionStore, StoreError};
use crate::models::{
    chat::{Chat, Message},
    connection::Connection,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryChatStore {
    chats: Mutex<BTreeMap<String, Chat>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, chat: Chat) {
        self.chats.lock().await.insert(chat.id.to_owned(), chat);
    }

    pub async fn chat(&self, chat_id: &str) -> Option<Chat> {
        self.chats.lock().await.get(chat_id).cloned()
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn put_chat(&self, chat: &Chat) -> Result<(), StoreError> {
        self.insert(chat.clone()).await;

        Ok(())
    }

    async fn get_chat(&self, chat_id: &str) -> Result<Option<Chat>, StoreError> {
        Ok(self.chat(chat_id).await)
    }

    async fn append_message(&self, chat_id: &str, message: &Message) -> Result<(), StoreError> {
        let mut chats = self.chats.lock().await;

        let chat = chats
            .get_mut(chat_id)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.to_owned()))?;

        chat.messages
            .get_or_insert_with(Vec::new)
            .push(message.clone());

        Ok(())
    }

    async fn set_participants(
        &self,
        chat_id: &str,
        participants: &[String],
    ) -> Result<(), StoreError> {
        let mut chats = self.chats.lock().await;

        let chat = chats
            .get_mut(chat_id)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.to_owned()))?;

        chat.participants = Some(participants.to_vec());

        Ok(())
    }

    async fn find_chats_by_participant(&self, user_id: &str) -> Result<Vec<Chat>, StoreError> {
        let chats = self.chats.lock().await;

        Ok(chats
            .values()
            .filter(|chat| chat.has_participant(user_id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryConnectionStore {
    connections: Mutex<BTreeSet<String>>,
}

impl InMemoryConnectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, connection_id: &str) -> bool {
        self.connections.lock().await.contains(connection_id)
    }

    pub async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.lock().await.is_empty()
    }
}

#[async_trait]
impl ConnectionStore for InMemoryConnectionStore {
    async fn put_connection(&self, connection: &Connection) -> Result<(), StoreError> {
        self.connections
            .lock()
            .await
            .insert(connection.id.to_owned());

        Ok(())
    }

    async fn delete_connection(&self, connection_id: &str) -> Result<(), StoreError> {
        self.connections.lock().await.remove(connection_id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chat(id: &str, participants: &[&str]) -> Chat {
        Chat {
            id: id.to_owned(),
            name: format!("chat {}", id),
            admin_id: None,
            admin_name: None,
            share_id: None,
            participants: Some(participants.iter().map(|p| p.to_string()).collect()),
            date_created: None,
            messages: None,
        }
    }

    #[tokio::test]
    async fn append_to_missing_chat_fails() {
        let store = InMemoryChatStore::new();
        let message: Message =
            serde_json::from_value(serde_json::json!({ "Id": "m", "UserId": "u" })).unwrap();

        let result = store.append_message("nope", &message).await;

        assert!(matches!(result, Err(StoreError::ChatNotFound(id)) if id == "nope"));
    }

    #[tokio::test]
    async fn scan_filters_by_participant() {
        let store = InMemoryChatStore::new();
        store.insert(sample_chat("a", &["u1", "u2"])).await;
        store.insert(sample_chat("b", &["u2"])).await;
        store.insert(sample_chat("c", &[])).await;

        let found = store.find_chats_by_participant("u2").await.unwrap();
        let ids: Vec<&str> = found.iter().map(|chat| chat.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b"]);
        assert!(store.find_chats_by_participant("u3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn connections_come_and_go() {
        let store = InMemoryConnectionStore::new();

        store.put_connection(&Connection::new("abc=")).await.unwrap();
        assert!(store.contains("abc=").await);

        store.delete_connection("abc=").await.unwrap();
        store.delete_connection("never-seen").await.unwrap();
        assert!(store.is_empty().await);
    }
}
