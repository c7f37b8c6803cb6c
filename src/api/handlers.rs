use async_graphql::{EmptyMutation, EmptySubscription};
use axum::{
    extract::Extension,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::graphql::{Greeter, QueryRoot};
use crate::api::responder::{Content, GraphQLResponder, RequestInfo, ResponderError};

/// Responder serving the demo schema
pub type ApiResponder = GraphQLResponder<QueryRoot, EmptyMutation, EmptySubscription, Greeter>;

/// Handler for GraphQL queries over `GET` and `POST`
pub async fn graphql_handler(
    Extension(responder): Extension<Arc<ApiResponder>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Content(content): Content,
) -> Result<Response, ResponderError> {
    let request = RequestInfo {
        method,
        uri,
        headers,
    };
    responder.respond(request, content).await
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check() {
        let rt = tokio::runtime::Runtime::new().unwrap();

        let response = rt.block_on(async { health_check().await.into_response() });

        assert_eq!(response.status(), StatusCode::OK);
    }
}
