use std::time::Instant;

use thiserror::Error;
use uuid::Uuid;

use crate::answer::parse_answer_record;
use crate::chunker::chunk_text;
use crate::config::DocumentConfig;
use crate::llm::TextGenerator;
use crate::models::{AnswerRecord, AskInput};
use crate::prompt::build_answer_prompt;

pub const MISSING_INPUT_MESSAGE: &str = "फाइल और सवाल दोनों जरूरी हैं";
pub const UNREADABLE_DOCUMENT_MESSAGE: &str = "फाइल खाली है या पढ़ी नहीं जा सकी";
pub const GENERIC_FAILURE_MESSAGE: &str = "कुछ गलत हो गया। कृपया दोबारा प्रयास करें।";

#[derive(Debug, Error)]
pub enum AskError {
    #[error("file and question are both required")]
    MissingInput,

    #[error("document is empty or unreadable ({chars} chars after trimming)")]
    UnreadableDocument { chars: usize },

    #[error("model call failed: {0:#}")]
    Model(anyhow::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AskError {
    /// Message safe to show the user; internal details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            AskError::MissingInput => MISSING_INPUT_MESSAGE,
            AskError::UnreadableDocument { .. } => UNREADABLE_DOCUMENT_MESSAGE,
            AskError::Model(_) | AskError::Internal(_) => GENERIC_FAILURE_MESSAGE,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AskError::MissingInput | AskError::UnreadableDocument { .. }
        )
    }
}

#[derive(Clone)]
pub struct AskService<G> {
    generator: G,
    document: DocumentConfig,
    max_output_tokens: usize,
}

impl<G: TextGenerator> AskService<G> {
    pub fn new(generator: G, document: DocumentConfig, max_output_tokens: usize) -> Self {
        Self {
            generator,
            document,
            max_output_tokens,
        }
    }

    pub fn document_config(&self) -> &DocumentConfig {
        &self.document
    }

    pub async fn answer(&self, input: AskInput) -> Result<AnswerRecord, AskError> {
        let started = Instant::now();
        let request_id = Uuid::new_v4();

        let (bytes, question) = match (input.file, input.question) {
            (Some(bytes), Some(question)) if !question.is_empty() => (bytes, question),
            _ => return Err(AskError::MissingInput),
        };

        let text = decode_document(&bytes);
        let chars = text.trim().chars().count();
        if chars < self.document.min_document_chars {
            return Err(AskError::UnreadableDocument { chars });
        }

        let chunks = chunk_text(&text, self.document.chunk_size_chars);
        let first_chunk = chunks.first().map(String::as_str).unwrap_or_default();
        let prompt = build_answer_prompt(first_chunk, chunks.len(), &question);

        tracing::info!(
            %request_id,
            file_name = input.file_name.as_deref().unwrap_or("<unnamed>"),
            bytes = bytes.len(),
            chunks = chunks.len(),
            "asking model about uploaded document"
        );

        let reply = self
            .generator
            .generate_text(&prompt, self.max_output_tokens)
            .await
            .map_err(AskError::Model)?;

        let record = parse_answer_record(&reply);
        tracing::info!(
            %request_id,
            latency_ms = started.elapsed().as_millis() as u64,
            reply_chars = reply.chars().count(),
            "answer ready"
        );

        Ok(record)
    }
}

/// Decodes upload bytes as UTF-8, replacing invalid sequences and dropping a
/// leading byte-order mark.
pub fn decode_document(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{FEFF}').unwrap_or(&text).to_string()
}
