pub mod api;
pub mod map;
pub mod options;

pub use api::{ContextValue, GraphQLResponder, NoRootValue, RequestInfo, ResponderError};
pub use map::Map;
pub use options::ServerOptions;

use anyhow::{Context, Result};
use axum::{extract::Extension, routing::get, Router, Server as HttpServer};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::api::graphql::{create_schema, Greeter};
use crate::api::handlers::{graphql_handler, health_check, ApiResponder};

pub struct Server {
    options: ServerOptions,
}

impl Server {
    pub fn new(options: ServerOptions) -> Self {
        Self { options }
    }

    /// Build the responder for the demo schema from the options
    #[must_use]
    pub fn responder(&self) -> ApiResponder {
        GraphQLResponder::new(create_schema())
            .graphiql(self.options.graphiql)
            .root_value(Greeter {
                salutation: self.options.salutation.clone(),
            })
    }

    pub fn router(&self) -> Router {
        let router = Router::new()
            .route(
                &self.options.endpoint,
                get(graphql_handler).post(graphql_handler),
            )
            .route("/health", get(health_check))
            .layer(Extension(Arc::new(self.responder())))
            .layer(TraceLayer::new_for_http());

        if self.options.cors {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    pub async fn run(&self) -> Result<()> {
        let addr = format!("{}:{}", self.options.host, self.options.port)
            .parse::<SocketAddr>()
            .context("Invalid socket address")?;
        info!("Starting GraphQL server on {}{}", addr, self.options.endpoint);

        HttpServer::bind(&addr)
            .serve(self.router().into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

        info!("GraphQL server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    fn server(graphiql: bool) -> Server {
        Server::new(ServerOptions {
            graphiql,
            salutation: "Hi".to_string(),
            ..ServerOptions::default()
        })
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, String, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_post_json_body() {
        let request = post_json(
            "/graphql",
            json!({"query": "{ greeting(name: \"Bob\") requestMethod }"}),
        );
        let (status, content_type, body) = send(server(false).router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("application/json"));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            json!({"data": {"greeting": "Hi, Bob!", "requestMethod": "POST"}})
        );
    }

    #[tokio::test]
    async fn test_url_query_wins_over_body() {
        let request = post_json(
            "/graphql?query=%7Bshout(text%3A%22url%22)%7D",
            json!({"query": "{ shout(text: \"body\") }"}),
        );
        let (_, _, body) = send(server(false).router(), request).await;

        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            json!({"data": {"shout": "URL!"}})
        );
    }

    #[tokio::test]
    async fn test_form_body() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/graphql")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("query=%7Badd(a%3A2%2Cb%3A3)%7D"))
            .unwrap();
        let (status, _, body) = send(server(false).router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            json!({"data": {"add": 5}})
        );
    }

    #[tokio::test]
    async fn test_missing_query_is_bad_request() {
        let request = Request::builder()
            .uri("/graphql")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(server(false).router(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Must provide query string.");
    }

    #[tokio::test]
    async fn test_explorer_and_raw_body_flag() {
        let request = Request::builder()
            .uri("/graphql?query=%7Badd(a%3A1%2Cb%3A2)%7D")
            .body(Body::empty())
            .unwrap();
        let (status, content_type, body) = send(server(true).router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/html; charset=utf-8");
        assert!(body.contains(r#"\"add\": 3"#));

        let request = post_json("/graphql", json!({"query": "{ add(a: 1, b: 2) }", "raw": true}));
        let (status, content_type, body) = send(server(true).router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("application/json"));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            json!({"data": {"add": 3}})
        );
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(server(false).router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }
}
