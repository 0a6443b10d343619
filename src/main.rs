use anyhow::Result;
use clap::Parser;

use chatbot_gateway::{
    cli::Cli,
    config::{AzureOpenAiConfig, Config, ServerConfig},
    init_tracing, server,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before reading any configuration
    dotenv::dotenv().ok();

    let args = Cli::parse();

    init_tracing();

    let config = Config {
        server: ServerConfig {
            host: args.host,
            port: args.port,
        },
        provider: AzureOpenAiConfig::from_env(),
    };

    server::start_server(config).await
}
