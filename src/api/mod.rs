pub mod graphql;
pub mod handlers;
pub mod responder;

pub use responder::{ContextValue, GraphQLResponder, NoRootValue, RequestInfo, ResponderError};
