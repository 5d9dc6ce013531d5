use std::future::Future;

use anyhow::Result;

/// A text-generation backend: one prompt in, one reply out.
///
/// Implemented by [`crate::anthropic::AnthropicClient`] in production; the
/// handler state is generic over it so tests can plug in a fake.
pub trait TextGenerator: Clone + Send + Sync + 'static {
    fn generate_text(
        &self,
        prompt: &str,
        max_output_tokens: usize,
    ) -> impl Future<Output = Result<String>> + Send;
}
