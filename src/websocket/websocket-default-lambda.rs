/*---------- Imports ----------*/
use aws_lambda_events::apigw::{ApiGatewayProxyResponse, ApiGatewayWebsocketProxyRequest};
use chat_socket_backend::{
    gateway::apigateway::ApiGatewayPusher,
    handlers::default,
    services::chat::ChatService,
    storage::dynamodb::DynamoChatStore,
    utils::{config::Config, logging},
};
use lambda_runtime::{service_fn, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();

    let config = aws_config::load_from_env().await;
    let settings = Config::from_env();

    // Initializing APIGateway MGMT client
    let apigtw_pusher = ApiGatewayPusher::from_endpoint(&config, settings.websocket_url()?)?;

    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    let chat_service = ChatService::new(DynamoChatStore::new(
        dynamodb_client,
        &settings.chats_table,
    ));

    let handler = service_fn(|event| handler_fn(&chat_service, &apigtw_pusher, event));

    lambda_runtime::run(handler).await?;

    Ok(())
}

async fn handler_fn(
    chat_service: &ChatService<DynamoChatStore>,
    apigtw_pusher: &ApiGatewayPusher,
    event: LambdaEvent<ApiGatewayWebsocketProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let payload = event.payload;

    default::handle_default(
        chat_service,
        apigtw_pusher,
        payload.request_context.connection_id.as_deref(),
        payload.body.as_deref(),
    )
    .await
}
