//! Content generation boundary.
//!
//! Every piece of user-facing content (mission text, challenge
//! descriptions, achievement batches, difficulty scores) comes from an
//! external generator behind the [`ContentGenerator`] trait. The
//! generator is opaque, possibly slow, and possibly failing; callers
//! treat any transport failure or shape violation as a
//! [`GenerationError`] and apply the engine's fallback/defer policy.
//! Loosely-shaped output never crosses this boundary: responses are
//! validated against the request kind before they reach the engine.

mod content;
mod request;
mod template;

pub use content::{AchievementSpec, Content, RequirementSpec};
pub use request::GenerationRequest;
pub use template::TemplateGenerator;

use async_trait::async_trait;

/// Failure at the generation boundary. All variants are recoverable:
/// the engine degrades to a fallback or a retryable "generating" state.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("generator transport failed: {0}")]
    Transport(String),

    #[error("generator timed out")]
    Timeout,

    #[error("generator returned a malformed shape: {0}")]
    Shape(String),
}

/// External content producer. Implementations must be cheap to share;
/// the engine serializes calls per mission chain itself.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Produce content for the given request. The returned variant must
    /// match the request kind; [`generate_validated`] enforces this.
    async fn generate(&self, request: GenerationRequest) -> Result<Content, GenerationError>;
}

/// Run a generation request and validate the response shape against it.
pub async fn generate_validated(
    generator: &dyn ContentGenerator,
    request: GenerationRequest,
) -> Result<Content, GenerationError> {
    let kind = request.kind();
    let content = generator.generate(request).await?;
    content.validate(kind)?;
    Ok(content)
}
