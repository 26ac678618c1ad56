use crate::ai::{error::GenerationError, types::GenerationRequest};

/// Boundary to the text-generation backend. One outbound call per turn,
/// returning the raw generated text or a typed failure.
#[async_trait::async_trait]
pub trait GenerationProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}
