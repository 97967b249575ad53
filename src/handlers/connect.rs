/*---------- Imports ----------*/
use crate::models::connection::Connection;
use crate::storage::ConnectionStore;
use crate::utils::http::HttpResponse;
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use lambda_runtime::Error;
use tracing::{info, warn};

/// `$connect`: remembers the connection id for later pushes. A storage
/// failure fails the invocation, which makes the gateway refuse the socket.
pub async fn handle_connect<S: ConnectionStore>(
    store: &S,
    connection_id: Option<&str>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let connection_id = match connection_id {
        Some(id) => id,
        None => {
            warn!("Connect event without a connection id");
            return Ok(HttpResponse::build_success_response());
        }
    };

    info!(connection_id, "New connection");

    store.put_connection(&Connection::new(connection_id)).await?;

    Ok(HttpResponse::build_response(200, "Connected"))
}
