use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use book_qa::anthropic::AnthropicClient;
use book_qa::ask::AskService;
use book_qa::config::AppConfig;
use book_qa::models::AskInput;

#[derive(Parser, Debug)]
#[command(name = "ask")]
#[command(about = "Ask a question about a local text file and print the answer record")]
struct Cli {
    #[arg(long)]
    file: String,
    #[arg(long)]
    question: String,
    /// Override the chunk size in characters.
    #[arg(long, env = "CHUNK_SIZE_CHARS")]
    chunk_size: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let config = AppConfig::from_env();
    let mut document = config.document.clone();
    if let Some(size) = cli.chunk_size {
        document.chunk_size_chars = size;
    }

    let bytes = tokio::fs::read(&cli.file)
        .await
        .with_context(|| format!("failed to read {}", cli.file))?;

    let anthropic = AnthropicClient::new(&config.model)?;
    let ask = AskService::new(anthropic, document, config.model.max_output_tokens);

    let record = ask
        .answer(AskInput {
            file: Some(bytes),
            file_name: Some(cli.file.clone()),
            question: Some(cli.question),
        })
        .await
        .map_err(|err| anyhow::anyhow!("{}: {err}", err.user_message()))?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
