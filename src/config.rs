use std::env;

#[derive(Clone, Debug)]
pub struct ModelConfig {
    pub api_key: String,
    pub base_url: String,
    pub answer_model: String,
    pub max_output_tokens: usize,
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct DocumentConfig {
    pub chunk_size_chars: usize,
    pub min_document_chars: usize,
    pub max_upload_bytes: usize,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub model: ModelConfig,
    pub document: DocumentConfig,
}

impl AppConfig {
    /// Reads configuration once from the process environment. A missing API key
    /// is not rejected here; calls to the model then fail and surface as 500s.
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BOOK_QA_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            model: ModelConfig {
                api_key: env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
                base_url: env::var("ANTHROPIC_BASE_URL")
                    .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
                answer_model: env::var("ANSWER_MODEL")
                    .unwrap_or_else(|_| "claude-3-5-sonnet-20241022".to_string()),
                max_output_tokens: parsed_var("MAX_OUTPUT_TOKENS").unwrap_or(1024),
                timeout_secs: parsed_var("MODEL_TIMEOUT_SECS"),
            },
            document: DocumentConfig {
                chunk_size_chars: parsed_var("CHUNK_SIZE_CHARS").unwrap_or(8_000),
                min_document_chars: parsed_var("MIN_DOCUMENT_CHARS").unwrap_or(10),
                max_upload_bytes: parsed_var("BOOK_QA_MAX_UPLOAD_BYTES")
                    .unwrap_or(20 * 1024 * 1024),
            },
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            chunk_size_chars: 8_000,
            min_document_chars: 10,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

fn parsed_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
