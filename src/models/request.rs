/*---------- Imports ----------*/
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use std::str::FromStr;
use thiserror::Error;

/*---------- Enums ----------*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SendMessage,
    GetUserChats,
    CreateChat,
    JoinChat,
    LeaveChat,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "SendMessage" => Ok(Action::SendMessage),
            "GetUserChats" => Ok(Action::GetUserChats),
            "CreateChat" => Ok(Action::CreateChat),
            "JoinChat" => Ok(Action::JoinChat),
            "LeaveChat" => Ok(Action::LeaveChat),
            other => Err(UnknownAction(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string_version = match self {
            Action::SendMessage => "SendMessage",
            Action::GetUserChats => "GetUserChats",
            Action::CreateChat => "CreateChat",
            Action::JoinChat => "JoinChat",
            Action::LeaveChat => "LeaveChat",
        };

        write!(f, "{}", string_version)
    }
}

/*---------- Structs ----------*/

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Inbound WebSocket envelope. Fields stay untyped here so that presence can
/// be checked per action before each routine decodes its own payload.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ActionRequest {
    #[serde(default, deserialize_with = "present")]
    pub action: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub message: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub user_id: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub chat: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub chat_id: Option<Value>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("Missing Action")]
    MissingAction,
}

impl ActionRequest {
    pub fn parse(body: Option<&str>) -> Result<Self, RequestError> {
        let value: Value = body
            .and_then(|raw| serde_json::from_str(raw).ok())
            .ok_or(RequestError::InvalidJson)?;

        if !value.is_object() {
            return Err(RequestError::MissingAction);
        }

        serde_json::from_value(value).map_err(|_| RequestError::MissingAction)
    }

    /// `None` when `Action` is absent, `Some(Err(..))` when it names nothing we route.
    pub fn action(&self) -> Option<Result<Action, UnknownAction>> {
        self.action.as_ref().map(|value| match value {
            Value::String(name) => name.parse(),
            other => Err(UnknownAction(other.to_string())),
        })
    }
}

/// Reads an identifier field; anything but a JSON string counts as empty.
pub fn field_as_str(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}

pub fn error_data(message: &str) -> Value {
    json!({ "error": message })
}

pub fn result_data(result: bool) -> Value {
    json!({ "result": result })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_actions() {
        assert_eq!("SendMessage".parse::<Action>(), Ok(Action::SendMessage));
        assert_eq!("LeaveChat".parse::<Action>(), Ok(Action::LeaveChat));
        assert_eq!(
            "sendMessage".parse::<Action>(),
            Err(UnknownAction("sendMessage".to_owned()))
        );
    }

    #[test]
    fn rejects_bodies_that_are_not_json() {
        assert_eq!(
            ActionRequest::parse(Some("{not json")).unwrap_err(),
            RequestError::InvalidJson
        );
        assert_eq!(ActionRequest::parse(None).unwrap_err(), RequestError::InvalidJson);
    }

    #[test]
    fn non_object_bodies_have_no_action() {
        assert_eq!(
            ActionRequest::parse(Some("[\"SendMessage\"]")).unwrap_err(),
            RequestError::MissingAction
        );
    }

    #[test]
    fn reads_action_and_fields() {
        let request =
            ActionRequest::parse(Some(r#"{"Action":"JoinChat","ChatId":"c-1","UserId":"u-1"}"#))
                .unwrap();

        assert_eq!(request.action(), Some(Ok(Action::JoinChat)));
        assert_eq!(request.chat_id.as_ref().map(field_as_str), Some("c-1"));
        assert!(request.message.is_none());
    }

    #[test]
    fn null_fields_count_as_present() {
        let request = ActionRequest::parse(Some(
            r#"{"Action":null,"Message":null,"ChatId":null}"#,
        ))
        .unwrap();

        assert_eq!(request.action, Some(Value::Null));
        assert_eq!(request.message, Some(Value::Null));
        assert_eq!(request.chat_id.as_ref().map(field_as_str), Some(""));
        assert!(request.user_id.is_none());
        assert!(matches!(request.action(), Some(Err(_))));
    }

    #[test]
    fn non_string_action_is_unknown() {
        let request = ActionRequest::parse(Some(r#"{"Action":7}"#)).unwrap();

        assert!(matches!(request.action(), Some(Err(_))));
    }
}
