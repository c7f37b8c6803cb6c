use axum::{
    async_trait,
    body::{Bytes, HttpBody},
    extract::FromRequest,
    http::{header::CONTENT_TYPE, Request},
    BoxError, Form, Json,
};
use std::{collections::BTreeMap, convert::Infallible};
use tracing::debug;

use crate::map::Map;

/// Request body decoded into a [`Map`], or `None` when there is no body or
/// it could not be decoded.
///
/// Decoding is delegated to axum's `Json` and `Form` extractors; any other
/// non-empty body is kept as [`Map::Buffer`].
#[derive(Debug, Clone, Default)]
pub struct Content(pub Option<Map>);

enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind<B>(req: &Request<B>) -> BodyKind {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let essence = content_type.split(';').next().unwrap_or_default().trim();

    if essence == "application/json" || essence.ends_with("+json") {
        BodyKind::Json
    } else if essence == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

#[async_trait]
impl<S, B> FromRequest<S, B> for Content
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let map = match body_kind(&req) {
            BodyKind::Json => match Json::<serde_json::Value>::from_request(req, state).await {
                Ok(Json(value)) => Some(Map::from(value)),
                Err(rejection) => {
                    debug!("discarding undecodable JSON body: {rejection}");
                    None
                }
            },
            BodyKind::Form => match Form::<Vec<(String, String)>>::from_request(req, state).await {
                Ok(Form(fields)) => Some(Map::Dictionary(
                    fields
                        .into_iter()
                        .map(|(key, value)| (key, Map::String(value)))
                        .collect::<BTreeMap<_, _>>(),
                )),
                Err(rejection) => {
                    debug!("discarding undecodable form body: {rejection}");
                    None
                }
            },
            BodyKind::Other => match Bytes::from_request(req, state).await {
                Ok(bytes) if !bytes.is_empty() => Some(Map::Buffer(bytes.to_vec())),
                Ok(_) => None,
                Err(rejection) => {
                    debug!("discarding unreadable body: {rejection}");
                    None
                }
            },
        };

        Ok(Content(map))
    }
}
