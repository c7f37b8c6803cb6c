use clap::Parser;

#[derive(Parser, Clone, Debug)]
#[command(version, about = "GraphQL over HTTP with an optional GraphiQL explorer")]
pub struct ServerOptions {
    /// The address to listen on
    #[arg(long, default_value = "0.0.0.0", env = "GRAPHQL_RESPONDER_HOST")]
    pub host: String,

    /// The port to listen on
    #[arg(short = 'p', long, default_value = "8080", env = "GRAPHQL_RESPONDER_PORT")]
    pub port: u16,

    /// The path GraphQL requests are served on
    #[arg(long, default_value = "/graphql", env = "GRAPHQL_RESPONDER_ENDPOINT")]
    pub endpoint: String,

    /// Render GraphiQL for requests that don't set `raw`
    #[arg(long, env = "GRAPHQL_RESPONDER_GRAPHIQL")]
    pub graphiql: bool,

    /// Salutation used by the `greeting` query
    #[arg(long, default_value = "Hello", env = "GRAPHQL_RESPONDER_SALUTATION")]
    pub salutation: String,

    /// Allow cross-origin requests from any origin
    #[arg(long, env = "GRAPHQL_RESPONDER_CORS")]
    pub cors: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            endpoint: "/graphql".to_string(),
            graphiql: false,
            salutation: "Hello".to_string(),
            cors: false,
        }
    }
}
