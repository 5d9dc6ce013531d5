pub mod answer;
pub mod anthropic;
pub mod ask;
pub mod chunker;
pub mod config;
pub mod llm;
pub mod models;
pub mod prompt;
pub mod server;

pub use config::AppConfig;
pub use server::run_server;
