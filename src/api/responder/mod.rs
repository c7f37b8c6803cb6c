//! Serve an async-graphql [`Schema`] over HTTP.
//!
//! A [`GraphQLResponder`] pulls the query, variables, operation name and raw
//! flag out of a request, runs them through the schema and answers with the
//! JSON result, or with a GraphiQL page when explorer support is on and the
//! client did not ask for raw output.

mod content;
mod error;
mod explorer;
mod params;

pub use content::Content;
pub use error::{ResponderError, MISSING_QUERY};
pub use explorer::ExplorerPage;
pub use params::GraphQLParams;

use async_graphql::{
    Name, ObjectType, Request, Schema, SubscriptionType, Value as GraphQLValue, Variables,
};
use axum::{
    http::{HeaderMap, Method, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::map::Map;

/// Root value for schemas whose resolvers don't read one
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRootValue;

/// The inbound request, handed to resolvers as context data unless a
/// fixed context was configured
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

/// Context data given to every execution
#[derive(Debug, Clone, Default)]
pub enum ContextValue<C> {
    /// Use the [`RequestInfo`] of the request being served
    #[default]
    Request,
    /// Use the same value for every request
    Fixed(C),
}

pub struct GraphQLResponder<Query, Mutation, Subscription, Root = NoRootValue, Ctx = ()> {
    schema: Schema<Query, Mutation, Subscription>,
    graphiql: bool,
    root_value: Root,
    context_value: ContextValue<Ctx>,
}

impl<Query, Mutation, Subscription> GraphQLResponder<Query, Mutation, Subscription>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
{
    /// Create a responder with the explorer off, no root value and the
    /// request as context
    #[must_use]
    pub fn new(schema: Schema<Query, Mutation, Subscription>) -> Self {
        Self {
            schema,
            graphiql: false,
            root_value: NoRootValue,
            context_value: ContextValue::Request,
        }
    }
}

impl<Query, Mutation, Subscription, Root, Ctx> GraphQLResponder<Query, Mutation, Subscription, Root, Ctx>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
    Root: Clone + Send + Sync + 'static,
    Ctx: Clone + Send + Sync + 'static,
{
    /// Render GraphiQL unless the request sets `raw`
    #[must_use]
    pub fn graphiql(mut self, enabled: bool) -> Self {
        self.graphiql = enabled;
        self
    }

    #[must_use]
    pub fn root_value<R>(self, root_value: R) -> GraphQLResponder<Query, Mutation, Subscription, R, Ctx> {
        GraphQLResponder {
            schema: self.schema,
            graphiql: self.graphiql,
            root_value,
            context_value: self.context_value,
        }
    }

    /// Use `context` for every request instead of the request itself
    #[must_use]
    pub fn context_value<C>(self, context: C) -> GraphQLResponder<Query, Mutation, Subscription, Root, C> {
        GraphQLResponder {
            schema: self.schema,
            graphiql: self.graphiql,
            root_value: self.root_value,
            context_value: ContextValue::Fixed(context),
        }
    }

    /// Answer one HTTP request.
    ///
    /// # Errors
    /// Returns [`ResponderError::BadRequest`] when raw output is wanted but no
    /// query was sent, and [`ResponderError::Execution`] when the engine's
    /// response cannot be converted.
    pub async fn respond(
        &self,
        request: RequestInfo,
        content: Option<Map>,
    ) -> Result<Response, ResponderError> {
        let params = GraphQLParams::extract(&request.uri, content.as_ref());
        let show_graphiql = self.graphiql && !params.raw.unwrap_or(false);

        debug!(
            operation_name = ?params.operation_name,
            has_query = params.query.is_some(),
            show_graphiql,
            "serving GraphQL request"
        );

        if !show_graphiql {
            let Some(query) = params.query.as_deref() else {
                return Err(ResponderError::missing_query());
            };

            let result = self.execute(query, &params, request).await?;
            return Ok(Json(result).into_response());
        }

        let result = match params.query.as_deref() {
            Some(query) => Some(self.execute(query, &params, request).await?),
            None => None,
        };

        let page = ExplorerPage {
            query: params.query.as_deref(),
            variables: params.variables.as_ref(),
            operation_name: params.operation_name.as_deref(),
            result: result.as_ref(),
        };

        Ok(Html(page.render()).into_response())
    }

    async fn execute(
        &self,
        query: &str,
        params: &GraphQLParams,
        request: RequestInfo,
    ) -> Result<Map, ResponderError> {
        let variables = params
            .variables
            .clone()
            .map(|vars| {
                GraphQLValue::Object(
                    vars.into_iter()
                        .map(|(key, value)| (Name::new(key), GraphQLValue::from(value)))
                        .collect(),
                )
            })
            .map(Variables::from_value)
            .unwrap_or_default();

        let mut graphql_request = Request::new(query)
            .variables(variables)
            .data(self.root_value.clone());

        if let Some(operation_name) = &params.operation_name {
            graphql_request = graphql_request.operation_name(operation_name);
        }

        graphql_request = match &self.context_value {
            ContextValue::Request => graphql_request.data(request),
            ContextValue::Fixed(context) => graphql_request.data(context.clone()),
        };

        let response = self.schema.execute(graphql_request).await;
        if response.is_err() {
            debug!(errors = ?response.errors, "GraphQL execution reported errors");
        }

        let value = async_graphql::to_value(&response)?;
        Ok(Map::from(value))
    }
}
