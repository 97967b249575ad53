/*---------- Imports ----------*/
use crate::models::chat::{current_timestamp, generate_message_id, Chat, MessageEnvelope};
use crate::storage::{ChatStore, StoreError};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

/*---------- Enums ----------*/
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("{0} must be provided")]
    MissingField(&'static str),

    #[error("chat {0} not found")]
    ChatNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Chat-mutation routines behind the action router. Every public routine
/// logs and swallows its failures, reporting them only as `false` (or an
/// empty list).
pub struct ChatService<S> {
    store: S,
}

impl<S: ChatStore> ChatService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn send_message(&self, data: Value) -> bool {
        info!(payload = %data, "Sending message");

        match self.append_message(data).await {
            Ok(()) => true,
            Err(error) => {
                error!(%error, "Error sending message");
                false
            }
        }
    }

    pub async fn get_user_chats(&self, user_id: &str) -> Vec<Chat> {
        info!(user_id, "Getting chats for user");

        if user_id.is_empty() {
            error!("Error getting user chats: UserId must be provided");
            return vec![];
        }

        match self.store.find_chats_by_participant(user_id).await {
            Ok(chats) => chats,
            Err(error) => {
                error!(%error, "Error getting user chats");
                vec![]
            }
        }
    }

    pub async fn create_chat(&self, data: Value) -> bool {
        info!(payload = %data, "Creating chat");

        match self.insert_chat(data).await {
            Ok(()) => true,
            Err(error) => {
                error!(%error, "Error creating chat");
                false
            }
        }
    }

    pub async fn join_chat(&self, chat_id: &str, user_id: &str) -> bool {
        info!(chat_id, user_id, "Joining chat");

        match self.add_participant(chat_id, user_id).await {
            Ok(()) => true,
            Err(error) => {
                error!(%error, "Error joining chat");
                false
            }
        }
    }

    pub async fn leave_chat(&self, chat_id: &str, user_id: &str) -> bool {
        info!(chat_id, user_id, "Leaving chat");

        match self.remove_participant(chat_id, user_id).await {
            Ok(()) => true,
            Err(error) => {
                error!(%error, "Error leaving chat");
                false
            }
        }
    }

    async fn append_message(&self, data: Value) -> Result<(), ChatError> {
        let MessageEnvelope {
            chat_id,
            mut message,
        } = serde_json::from_value(data)?;

        if chat_id.is_empty() {
            return Err(ChatError::MissingField("ChatId"));
        }

        if message.id.is_none() {
            message.id = Some(generate_message_id());
        }

        if message.date_created.is_none() {
            message.date_created = Some(current_timestamp());
        }

        self.store.append_message(&chat_id, &message).await?;

        Ok(())
    }

    async fn insert_chat(&self, data: Value) -> Result<(), ChatError> {
        let mut chat: Chat = serde_json::from_value(data)?;

        chat.date_created = Some(current_timestamp());

        if chat.messages.is_none() {
            chat.messages = Some(vec![]);
        }

        if chat.participants.is_none() {
            let admin_id = chat
                .admin_id
                .clone()
                .ok_or(ChatError::MissingField("AdminId"))?;

            chat.participants = Some(vec![admin_id]);
        }

        self.store.put_chat(&chat).await?;

        Ok(())
    }

    async fn load_chat(&self, chat_id: &str, user_id: &str) -> Result<Chat, ChatError> {
        if chat_id.is_empty() || user_id.is_empty() {
            return Err(ChatError::MissingField("ChatId and UserId"));
        }

        self.store
            .get_chat(chat_id)
            .await?
            .ok_or_else(|| ChatError::ChatNotFound(chat_id.to_owned()))
    }

    // Read-modify-write without a condition: a concurrent join/leave on the
    // same chat can overwrite this update.
    async fn add_participant(&self, chat_id: &str, user_id: &str) -> Result<(), ChatError> {
        let chat = self.load_chat(chat_id, user_id).await?;

        if chat.has_participant(user_id) {
            info!(chat_id, user_id, "User is already in Participants");
            return Ok(());
        }

        let mut participants = chat.participants().to_vec();
        participants.push(user_id.to_owned());

        self.store.set_participants(chat_id, &participants).await?;

        Ok(())
    }

    async fn remove_participant(&self, chat_id: &str, user_id: &str) -> Result<(), ChatError> {
        let chat = self.load_chat(chat_id, user_id).await?;

        if !chat.has_participant(user_id) {
            info!(chat_id, user_id, "User is not in Participants");
            return Ok(());
        }

        let mut participants = chat.participants().to_vec();

        if let Some(position) = participants.iter().position(|current| current == user_id) {
            participants.remove(position);
        }

        self.store.set_participants(chat_id, &participants).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryChatStore;
    use serde_json::json;

    async fn service_with(chats: Vec<Value>) -> ChatService<InMemoryChatStore> {
        let store = InMemoryChatStore::new();

        for chat in chats {
            store.insert(serde_json::from_value(chat).unwrap()).await;
        }

        ChatService::new(store)
    }

    #[tokio::test]
    async fn send_message_appends_and_stamps_date() {
        let service = service_with(vec![json!({ "Id": "c1", "Name": "Trip" })]).await;

        let sent = service
            .send_message(json!({ "ChatId": "c1", "Id": "m1", "UserId": "u1", "Text": "hi" }))
            .await;

        assert!(sent);
        let chat = service.store().chat("c1").await.unwrap();
        let messages = chat.messages.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text.as_deref(), Some("hi"));
        assert!(messages[0].date_created.is_some());
    }

    #[tokio::test]
    async fn send_message_assigns_an_id_only_when_missing() {
        let service = service_with(vec![json!({ "Id": "c1", "Name": "Trip" })]).await;

        assert!(service.send_message(json!({ "ChatId": "c1", "UserId": "u1" })).await);
        assert!(service.send_message(json!({ "ChatId": "c1", "Id": "m2", "UserId": "u1" })).await);

        let messages = service.store().chat("c1").await.unwrap().messages.unwrap();
        let generated = messages[0].id.clone().unwrap();

        assert!(ulid::Ulid::from_string(&generated).is_ok());
        assert_eq!(messages[1].id.as_deref(), Some("m2"));

        let again = service.store().chat("c1").await.unwrap().messages.unwrap();
        assert_eq!(again[0].id.as_deref(), Some(generated.as_str()));
    }

    #[tokio::test]
    async fn send_message_keeps_client_date_and_order() {
        let service = service_with(vec![json!({ "Id": "c1", "Name": "Trip", "Messages": [] })]).await;

        for (id, date) in [("m1", "2024-01-01T00:00:00Z"), ("m2", "2024-01-02T00:00:00Z")] {
            let sent = service
                .send_message(json!({ "ChatId": "c1", "Id": id, "UserId": "u1", "DateCreated": date }))
                .await;
            assert!(sent);
        }

        let messages = service.store().chat("c1").await.unwrap().messages.unwrap();
        let ids: Vec<&str> = messages
            .iter()
            .filter_map(|message| message.id.as_deref())
            .collect();

        assert_eq!(ids, vec!["m1", "m2"]);
        assert_eq!(messages[0].date_created.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn send_message_failures_return_false() {
        let service = service_with(vec![json!({ "Id": "c1", "Name": "Trip" })]).await;

        assert!(!service.send_message(json!({ "UserId": "u1" })).await);
        assert!(!service.send_message(json!({ "ChatId": "", "UserId": "u1" })).await);
        assert!(!service.send_message(json!({ "ChatId": "missing", "UserId": "u1" })).await);
        assert!(!service.send_message(json!("just text")).await);
    }

    #[tokio::test]
    async fn create_chat_fills_defaults() {
        let service = service_with(vec![]).await;

        let created = service
            .create_chat(json!({ "Id": "c1", "Name": "Trip", "AdminId": "admin" }))
            .await;

        assert!(created);
        let chat = service.store().chat("c1").await.unwrap();
        assert_eq!(chat.participants, Some(vec!["admin".to_owned()]));
        assert_eq!(chat.messages, Some(vec![]));
        assert!(chat.date_created.is_some());
    }

    #[tokio::test]
    async fn create_chat_overwrites_date_and_keeps_given_participants() {
        let service = service_with(vec![]).await;

        let created = service
            .create_chat(json!({
                "Id": "c1",
                "Name": "Trip",
                "DateCreated": "1999-01-01T00:00:00Z",
                "Participants": []
            }))
            .await;

        assert!(created);
        let chat = service.store().chat("c1").await.unwrap();
        assert_eq!(chat.participants, Some(vec![]));
        assert_ne!(chat.date_created.as_deref(), Some("1999-01-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn create_chat_without_admin_or_participants_fails() {
        let service = service_with(vec![]).await;

        assert!(!service.create_chat(json!({ "Id": "c1", "Name": "Trip" })).await);
        assert!(!service.create_chat(json!({ "Name": "No id" })).await);
        assert!(service.store().chat("c1").await.is_none());
    }

    #[tokio::test]
    async fn join_adds_once() {
        let service =
            service_with(vec![json!({ "Id": "c1", "Name": "Trip", "Participants": ["a"] })]).await;

        assert!(service.join_chat("c1", "b").await);
        assert!(service.join_chat("c1", "b").await);

        let chat = service.store().chat("c1").await.unwrap();
        assert_eq!(chat.participants().to_vec(), vec!["a".to_owned(), "b".to_owned()]);
    }

    #[tokio::test]
    async fn join_chat_without_participants_list() {
        let service = service_with(vec![json!({ "Id": "c1", "Name": "Trip" })]).await;

        assert!(service.join_chat("c1", "a").await);
        assert_eq!(
            service.store().chat("c1").await.unwrap().participants,
            Some(vec!["a".to_owned()])
        );
    }

    #[tokio::test]
    async fn join_and_leave_reject_missing_input() {
        let service = service_with(vec![json!({ "Id": "c1", "Name": "Trip" })]).await;

        assert!(!service.join_chat("", "a").await);
        assert!(!service.join_chat("c1", "").await);
        assert!(!service.join_chat("nope", "a").await);
        assert!(!service.leave_chat("nope", "a").await);
        assert!(!service.leave_chat("", "").await);
    }

    #[tokio::test]
    async fn leave_removes_member_and_tolerates_strangers() {
        let service = service_with(vec![json!({
            "Id": "c1",
            "Name": "Trip",
            "Participants": ["a", "b", "c"]
        })])
        .await;

        assert!(service.leave_chat("c1", "b").await);
        assert!(service.leave_chat("c1", "zed").await);

        let chat = service.store().chat("c1").await.unwrap();
        assert_eq!(chat.participants().to_vec(), vec!["a".to_owned(), "c".to_owned()]);
    }

    #[tokio::test]
    async fn user_chats_follow_membership() {
        let service = service_with(vec![
            json!({ "Id": "c1", "Name": "One", "Participants": ["a"] }),
            json!({ "Id": "c2", "Name": "Two", "Participants": ["a", "b"] }),
        ])
        .await;

        assert_eq!(service.get_user_chats("a").await.len(), 2);
        assert_eq!(service.get_user_chats("b").await.len(), 1);
        assert!(service.get_user_chats("").await.is_empty());

        assert!(service.leave_chat("c2", "b").await);
        assert!(service.get_user_chats("b").await.is_empty());
    }
}
