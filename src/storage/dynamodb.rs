/*---------- Imports ----------*/
use super::{ChatStore, ConnectionStore, StoreError};
use crate::models::{
    chat::{Chat, Message},
    connection::Connection,
};
use async_trait::async_trait;
use aws_sdk_dynamodb::{error::UpdateItemError, model::AttributeValue, types::SdkError};
use serde_dynamo::aws_sdk_dynamodb_0_21::{from_item, to_item};
use std::{collections::HashMap, fmt::Debug};
use tracing::warn;

/*---------- Constants ----------*/
const CHAT_KEY: &str = "Id";
const CONNECTION_KEY: &str = "id";

pub struct DynamoChatStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoChatStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl ChatStore for DynamoChatStore {
    async fn put_chat(&self, chat: &Chat) -> Result<(), StoreError> {
        let item: HashMap<String, AttributeValue> = to_item(chat)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|error| StoreError::request("PutItem", error))?;

        Ok(())
    }

    async fn get_chat(&self, chat_id: &str) -> Result<Option<Chat>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(CHAT_KEY, AttributeValue::S(chat_id.to_owned()))
            .send()
            .await
            .map_err(|error| StoreError::request("GetItem", error))?;

        match output.item() {
            Some(item) => {
                let chat: Chat = from_item(item.clone())?;

                Ok(Some(chat))
            }
            None => Ok(None),
        }
    }

    async fn append_message(&self, chat_id: &str, message: &Message) -> Result<(), StoreError> {
        let message_item: HashMap<String, AttributeValue> = to_item(message)?;

        let update_result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(CHAT_KEY, AttributeValue::S(chat_id.to_owned()))
            .update_expression("SET Messages = list_append(if_not_exists(Messages, :empty), :msg)")
            .condition_expression("attribute_exists(Id)")
            .expression_attribute_values(
                ":msg",
                AttributeValue::L(vec![AttributeValue::M(message_item)]),
            )
            .expression_attribute_values(":empty", AttributeValue::L(vec![]))
            .send()
            .await;

        update_result.map_err(|error| classify_append_error(chat_id, error))?;

        Ok(())
    }

    async fn set_participants(
        &self,
        chat_id: &str,
        participants: &[String],
    ) -> Result<(), StoreError> {
        let participants_list = participants
            .iter()
            .map(|participant| AttributeValue::S(participant.to_owned()))
            .collect();

        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(CHAT_KEY, AttributeValue::S(chat_id.to_owned()))
            .update_expression("SET Participants = :p")
            .expression_attribute_values(":p", AttributeValue::L(participants_list))
            .send()
            .await
            .map_err(|error| StoreError::request("UpdateItem", error))?;

        Ok(())
    }

    async fn find_chats_by_participant(&self, user_id: &str) -> Result<Vec<Chat>, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("contains(Participants, :user_id)")
            .expression_attribute_values(":user_id", AttributeValue::S(user_id.to_owned()))
            .send()
            .await
            .map_err(|error| StoreError::request("Scan", error))?;

        let items_list = output.items().unwrap_or(&[]);

        Ok(decode_chats(items_list))
    }
}

/// The append is conditioned on the chat existing, so a failed condition
/// check means there is no such chat.
fn classify_append_error<R>(chat_id: &str, error: SdkError<UpdateItemError, R>) -> StoreError
where
    R: Debug + Send + Sync + 'static,
{
    match error {
        SdkError::ServiceError { err, .. } if err.is_conditional_check_failed_exception() => {
            StoreError::ChatNotFound(chat_id.to_owned())
        }
        error => StoreError::request("UpdateItem", error),
    }
}

fn decode_chats(items: &[HashMap<String, AttributeValue>]) -> Vec<Chat> {
    items
        .iter()
        .filter_map(|item| match from_item::<Chat>(item.clone()) {
            Ok(chat) => Some(chat),
            Err(error) => {
                let chat_id = item.get(CHAT_KEY).and_then(|id| id.as_s().ok());
                warn!(?chat_id, %error, "Skipping chat item that couldn't be decoded");

                None
            }
        })
        .collect()
}

pub struct DynamoConnectionStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoConnectionStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl ConnectionStore for DynamoConnectionStore {
    async fn put_connection(&self, connection: &Connection) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item(CONNECTION_KEY, AttributeValue::S(connection.id.to_owned()))
            .send()
            .await
            .map_err(|error| StoreError::request("PutItem", error))?;

        Ok(())
    }

    async fn delete_connection(&self, connection_id: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(CONNECTION_KEY, AttributeValue::S(connection_id.to_owned()))
            .send()
            .await
            .map_err(|error| StoreError::request("DeleteItem", error))?;

        Ok(())
    }
}
