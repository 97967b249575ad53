/*---------- Imports ----------*/
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

pub fn generate_message_id() -> String {
    Ulid::new().to_string()
}

/// RFC 3339 UTC timestamp with millisecond precision, used for `DateCreated`.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A single entry of a chat's `Messages` list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default)]
    pub included_in_model: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
}

/// Inbound `SendMessage` payload: the message fields plus the chat they target.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct MessageEnvelope {
    pub chat_id: String,

    #[serde(flatten)]
    pub message: Message,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Chat {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
}

impl Chat {
    pub fn participants(&self) -> &[String] {
        self.participants.as_deref().unwrap_or_default()
    }

    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants().iter().any(|current| current == user_id)
    }
}
