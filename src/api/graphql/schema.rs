use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use crate::api::graphql::resolvers::QueryRoot;

/// Type alias for the demo GraphQL schema
#[allow(clippy::module_name_repetitions)]
pub type ApiSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Create the demo schema
#[must_use]
#[allow(clippy::module_name_repetitions)]
pub fn create_schema() -> ApiSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription).finish()
}
