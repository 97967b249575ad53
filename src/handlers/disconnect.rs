/*---------- Imports ----------*/
use crate::storage::ConnectionStore;
use crate::utils::http::HttpResponse;
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use lambda_runtime::Error;
use tracing::{info, warn};

/// `$disconnect`: forgets the connection id. The socket is already closed,
/// so a failed delete is only logged.
pub async fn handle_disconnect<S: ConnectionStore>(
    store: &S,
    connection_id: Option<&str>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let connection_id = match connection_id {
        Some(id) => id,
        None => return Ok(HttpResponse::build_success_response()),
    };

    info!(connection_id, "Connection closed");

    if let Err(error) = store.delete_connection(connection_id).await {
        warn!(connection_id, %error, "Failed to delete connection");
    }

    Ok(HttpResponse::build_response(200, "Disconnected"))
}
