/*---------- Imports ----------*/
use crate::gateway::{ConnectionGateway, PushError};
use crate::models::request::{
    error_data, field_as_str, result_data, Action, ActionRequest, RequestError,
};
use crate::services::chat::ChatService;
use crate::storage::ChatStore;
use crate::utils::http::HttpResponse;
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use lambda_runtime::Error;
use serde_json::{json, Value};
use tracing::{info, warn};

/// `$default`: decodes the envelope, runs the requested routine and pushes
/// `{"response": <data>}` back to the caller. The same data is the HTTP body.
pub async fn handle_default<S, G>(
    chat_service: &ChatService<S>,
    gateway: &G,
    connection_id: Option<&str>,
    body: Option<&str>,
) -> Result<ApiGatewayProxyResponse, Error>
where
    S: ChatStore,
    G: ConnectionGateway,
{
    let connection_id = match connection_id {
        Some(id) => id,
        None => return Ok(HttpResponse::build_success_response()),
    };

    let response_data = match ActionRequest::parse(body) {
        Ok(request) => {
            info!(action = ?request.action, connection_id, "Action received");

            route(chat_service, request).await
        }
        Err(error @ RequestError::InvalidJson) => error_data(&error.to_string()),
        Err(error @ RequestError::MissingAction) => {
            info!(connection_id, "Action received without a name");

            error_data(&error.to_string())
        }
    };

    reply(gateway, connection_id, response_data).await
}

/// Runs one action and returns the data to send back.
pub async fn route<S: ChatStore>(chat_service: &ChatService<S>, request: ActionRequest) -> Value {
    let action = match request.action() {
        Some(Ok(action)) => action,
        Some(Err(_)) => return error_data("Unknown action"),
        None => return error_data("Missing Action"),
    };

    match action {
        Action::SendMessage => match request.message {
            Some(message) => result_data(chat_service.send_message(message).await),
            None => error_data("Missing Message"),
        },

        Action::GetUserChats => match &request.user_id {
            Some(user_id) => {
                let chats = chat_service.get_user_chats(field_as_str(user_id)).await;

                serde_json::to_value(chats).unwrap_or_else(|_| json!([]))
            }
            None => error_data("Missing UserId"),
        },

        Action::CreateChat => match request.chat {
            Some(chat) => result_data(chat_service.create_chat(chat).await),
            None => error_data("Missing Chat"),
        },

        Action::JoinChat => match (&request.chat_id, &request.user_id) {
            (Some(chat_id), Some(user_id)) => result_data(
                chat_service
                    .join_chat(field_as_str(chat_id), field_as_str(user_id))
                    .await,
            ),
            _ => error_data("Missing ChatId or UserId"),
        },

        Action::LeaveChat => match (&request.chat_id, &request.user_id) {
            (Some(chat_id), Some(user_id)) => result_data(
                chat_service
                    .leave_chat(field_as_str(chat_id), field_as_str(user_id))
                    .await,
            ),
            _ => error_data("Missing Chat or UserId"),
        },
    }
}

/// Pushes `{"response": data}` to the connection. A connection that has
/// already gone away is not an error; any other push failure is.
pub async fn reply<G: ConnectionGateway>(
    gateway: &G,
    connection_id: &str,
    response_data: Value,
) -> Result<ApiGatewayProxyResponse, Error> {
    let envelope = json!({ "response": response_data });

    match gateway
        .post_to_connection(connection_id, &envelope.to_string())
        .await
    {
        Ok(()) => {}
        Err(PushError::Gone(_)) => {
            warn!(connection_id, "Connection no longer exists");
        }
        Err(error) => return Err(error.into()),
    }

    Ok(HttpResponse::build_response(200, &response_data.to_string()))
}
