pub mod resolvers;
pub mod schema;

pub use resolvers::{Greeter, QueryRoot};
pub use schema::{create_schema, ApiSchema};
