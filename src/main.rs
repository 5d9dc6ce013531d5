use anyhow::Result;
use tracing_subscriber::EnvFilter;

use book_qa::anthropic::AnthropicClient;
use book_qa::ask::AskService;
use book_qa::{run_server, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env();
    if config.model.api_key.trim().is_empty() {
        tracing::warn!("ANTHROPIC_API_KEY is not set; every question will fail");
    }

    let anthropic = AnthropicClient::new(&config.model)?;
    tracing::info!(model = anthropic.model(), "using Anthropic messages API");

    let ask = AskService::new(
        anthropic,
        config.document.clone(),
        config.model.max_output_tokens,
    );

    run_server(config, ask).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
