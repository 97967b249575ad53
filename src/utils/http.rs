/*---------- Imports ----------*/
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use serde_json::json;

pub struct HttpResponse;

impl HttpResponse {
    pub fn build_response(status_code: u16, body: &str) -> ApiGatewayProxyResponse {
        let response = json!({
            "statusCode": status_code,
            "headers": {},
            "multiValueHeaders": {},
            "body": body
        });

        let parsed_reponse: ApiGatewayProxyResponse =
            serde_json::from_value(response).unwrap_or_default();

        parsed_reponse
    }

    /// Bare 200 for invocations that have nothing to report back.
    pub fn build_success_response() -> ApiGatewayProxyResponse {
        let response = json!({
            "statusCode": 200,
            "headers": {},
            "multiValueHeaders": {}
        });

        serde_json::from_value(response).unwrap_or_default()
    }
}
