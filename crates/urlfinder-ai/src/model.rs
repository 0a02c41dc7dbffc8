//! Model-invocation seam.

use async_trait::async_trait;

use crate::InvocationError;

/// Sends a rendered prompt to a language model and returns its raw text reply.
///
/// Implementations should ask the model for JSON output when the service
/// supports it. Errors stay per call: the pipeline skips the record.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Identifier of the model being called, for logs.
    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, InvocationError>;
}
