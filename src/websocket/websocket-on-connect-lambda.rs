/*---------- Imports ----------*/
use aws_lambda_events::apigw::{ApiGatewayProxyResponse, ApiGatewayWebsocketProxyRequest};
use chat_socket_backend::{
    handlers::connect,
    storage::dynamodb::DynamoConnectionStore,
    utils::{config::Config, logging},
};
use lambda_runtime::{service_fn, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();

    let config = aws_config::load_from_env().await;
    let settings = Config::from_env();
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    let connection_store = DynamoConnectionStore::new(dynamodb_client, &settings.connections_table);
    let handler = service_fn(|event| handler_fn(&connection_store, event));

    lambda_runtime::run(handler).await?;

    Ok(())
}

async fn handler_fn(
    connection_store: &DynamoConnectionStore,
    event: LambdaEvent<ApiGatewayWebsocketProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let connection_id = event.payload.request_context.connection_id.as_deref();

    connect::handle_connect(connection_store, connection_id).await
}
