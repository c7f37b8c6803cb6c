use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use graphql_responder::{Server, ServerOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let opts = ServerOptions::parse();

    tracing::info!("Configuration:");
    tracing::info!("  Listen address: {}:{}", opts.host, opts.port);
    tracing::info!("  Endpoint: {}", opts.endpoint);
    tracing::info!("  GraphiQL: {}", opts.graphiql);
    tracing::info!("  CORS: {}", opts.cors);

    let server = Server::new(opts);
    server.run().await?;

    Ok(())
}
