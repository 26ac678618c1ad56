use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const DEFAULT_TYPING_DELAY_MS: u64 = 1000;

/// Configuration for a generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProviderConfig {
    #[serde(rename = "anthropic")]
    Anthropic {
        api_key: String,
        #[serde(default = "default_model")]
        model: String,
    },
    #[serde(rename = "mock")]
    Mock {
        #[serde(default)]
        reply: Option<String>,
    },
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Which entry in `providers` drives the session.
    #[serde(default)]
    pub active_provider: Option<String>,

    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// Replaces the built-in standing instruction text when set.
    #[serde(default)]
    pub standing_instructions: Option<String>,

    /// Display-pacing delay before a finalized reply becomes visible. Purely
    /// cosmetic; correctness never depends on it.
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,
}

fn default_typing_delay_ms() -> u64 {
    DEFAULT_TYPING_DELAY_MS
}

impl Settings {
    pub fn active_provider_config(&self) -> Option<&ProviderConfig> {
        let name = self.active_provider.as_ref()?;
        self.providers.get(name)
    }
}
