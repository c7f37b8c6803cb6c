use async_graphql::{Context, Object};

use crate::api::responder::RequestInfo;

/// Root value of the demo schema
#[derive(Debug, Clone)]
pub struct Greeter {
    pub salutation: String,
}

impl Default for Greeter {
    fn default() -> Self {
        Self {
            salutation: "Hello".to_string(),
        }
    }
}

/// Root query type of the demo schema
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Greet `name` with the salutation of the root value
    async fn greeting(&self, ctx: &Context<'_>, name: Option<String>) -> String {
        let salutation = ctx
            .data_opt::<Greeter>()
            .map_or("Hello", |greeter| greeter.salutation.as_str());
        format!("{}, {}!", salutation, name.as_deref().unwrap_or("world"))
    }

    /// Sum of two integers
    async fn add(&self, a: i32, b: i32) -> i32 {
        a.saturating_add(b)
    }

    async fn shout(&self, text: String) -> String {
        format!("{}!", text.to_uppercase())
    }

    /// HTTP method of the request being served, when the request is the context
    async fn request_method(&self, ctx: &Context<'_>) -> Option<String> {
        ctx.data_opt::<RequestInfo>()
            .map(|request| request.method.to_string())
    }

    /// Fixed context value, when one was configured
    async fn context(&self, ctx: &Context<'_>) -> Option<String> {
        ctx.data_opt::<String>().cloned()
    }
}
