pub mod anthropic;
pub mod error;
pub mod mock;
pub mod provider;
pub mod types;

pub use anthropic::AnthropicProvider;
pub use error::GenerationError;
pub use provider::GenerationProvider;
pub use types::*;
