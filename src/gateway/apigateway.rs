/*---------- Imports ----------*/
use super::{ConnectionGateway, PushError};
use crate::utils::config::ConfigError;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_apigatewaymanagement::{
    config::Builder,
    error::PostToConnectionError,
    types::{Blob, SdkError},
    Endpoint,
};
use std::fmt::Debug;

pub struct ApiGatewayPusher {
    client: aws_sdk_apigatewaymanagement::Client,
}

impl ApiGatewayPusher {
    /// Builds a management API client pointed at the WebSocket stage's
    /// connection endpoint (`https://{api-id}.execute-api.{region}.amazonaws.com/{stage}`).
    pub fn from_endpoint(config: &SdkConfig, websocket_url: &str) -> Result<Self, ConfigError> {
        let apigtw_client_endpoint = Endpoint::immutable(
            websocket_url
                .parse()
                .map_err(|_| ConfigError::InvalidEndpoint(websocket_url.to_owned()))?,
        );

        let apigtw_client_config = Builder::from(config)
            .endpoint_resolver(apigtw_client_endpoint)
            .build();

        Ok(Self {
            client: aws_sdk_apigatewaymanagement::Client::from_conf(apigtw_client_config),
        })
    }
}

fn is_gone<R>(error: &SdkError<PostToConnectionError, R>) -> bool {
    match error {
        SdkError::ServiceError { err, .. } => err.is_gone_exception(),
        _ => false,
    }
}

fn classify_push_error<R>(
    connection_id: &str,
    error: SdkError<PostToConnectionError, R>,
) -> PushError
where
    R: Debug + Send + Sync + 'static,
{
    if is_gone(&error) {
        return PushError::Gone(connection_id.to_owned());
    }

    PushError::Failed {
        connection_id: connection_id.to_owned(),
        source: error.into(),
    }
}

#[async_trait]
impl ConnectionGateway for ApiGatewayPusher {
    async fn post_to_connection(&self, connection_id: &str, data: &str) -> Result<(), PushError> {
        self.client
            .post_to_connection()
            .connection_id(connection_id)
            .data(Blob::new(data.to_owned()))
            .send()
            .await
            .map_err(|error| classify_push_error(connection_id, error))?;

        Ok(())
    }
}
