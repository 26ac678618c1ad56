use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::ai::{
    anthropic::AnthropicProvider,
    mock::{MockBehavior, MockProvider},
    provider::GenerationProvider,
};
use crate::chat::events::{ChatEvent, ChatMessage, EventSender};
use crate::chat::turn;
use crate::leads::LeadCatalog;
use crate::prompt::DEFAULT_STANDING_INSTRUCTIONS;
use crate::reminders::store::{self, ReminderStore};
use crate::settings::{ProviderConfig, SettingsManager};

const GREETING: &str =
    "Hey there! I'm here to help you stay on top of your leads. What would you like to check first?";

/// Defines the possible input messages to the `ChatActor`.
#[derive(Serialize, Deserialize)]
pub enum ChatActorMessage {
    /// A user input to the conversation
    UserInput(String),

    /// Sends the current settings (from SettingsManager) to the EventSender
    GetSettings,
    SaveSettings {
        settings: serde_json::Value,
    },
}

/// The `ChatActor` implements the core (or backend) of the assistant.
///
/// The UI does not contain any application logic; it is a thin wrapper that
/// takes input from the user, sends it to the actor, and renders events from
/// the actor back into the terminal.
///
/// The interface to the actor is two channels: `ChatActorMessage`s are sent
/// to the input channel and `ChatEvent`s are emitted to the output channel,
/// whose receiver is returned when the actor is launched. One turn is
/// processed at a time; there is no cancellation primitive, an in-flight
/// generation call runs to completion or failure.
pub struct ChatActor {
    pub tx: mpsc::UnboundedSender<ChatActorMessage>,
}

impl ChatActor {
    /// Launch the chat actor and return a handle to it
    pub fn launch(
        settings_manager: SettingsManager,
        reminders: Arc<dyn ReminderStore>,
    ) -> (Self, mpsc::UnboundedReceiver<ChatEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (event_sender, event_rx) = EventSender::new();

        tokio::spawn(async move {
            let settings = settings_manager.settings();

            // Session-start housekeeping before anything reads the store.
            match store::prune_expired(reminders.as_ref(), Utc::now().date_naive()) {
                Ok(0) => {}
                Ok(n) => info!(pruned = n, "deleted expired reminders"),
                Err(e) => error!(error = ?e, "failed to prune expired reminders"),
            }

            if settings.active_provider_config().is_none() {
                event_sender.add_message(ChatMessage::error(
                    "No generation provider is configured. Add one to settings.toml and set active_provider."
                        .to_string(),
                ));
            }

            let provider = create_provider(&settings_manager);

            let state = ActorState {
                event_sender: event_sender.clone(),
                provider,
                catalog: LeadCatalog::builtin(),
                reminders,
                settings: settings_manager,
                session: SessionContext::default(),
                typing_delay: Duration::from_millis(settings.typing_delay_ms),
            };

            event_sender.add_message(ChatMessage::assistant(
                GREETING.to_string(),
                None,
                vec![],
            ));

            run_actor(state, rx).await;
        });

        (ChatActor { tx }, event_rx)
    }

    pub fn send_message(&self, message: String) -> Result<()> {
        self.tx.send(ChatActorMessage::UserInput(message))?;
        Ok(())
    }

    pub fn get_settings(&self) -> Result<()> {
        self.tx.send(ChatActorMessage::GetSettings)?;
        Ok(())
    }

    pub fn save_settings(&self, settings: serde_json::Value) -> Result<()> {
        self.tx.send(ChatActorMessage::SaveSettings { settings })?;
        Ok(())
    }
}

/// Per-session conversational state: the ordered message log, the lead under
/// discussion, and whether a turn is in flight. Held by the actor rather
/// than ambient so sessions stay independent and testable.
#[derive(Default)]
pub struct SessionContext {
    pub current_lead: Option<String>,
    pub log: Vec<ChatMessage>,
    pub pending_turn: bool,
}

pub struct ActorState {
    pub event_sender: EventSender,
    pub provider: Box<dyn GenerationProvider>,
    pub catalog: LeadCatalog,
    pub reminders: Arc<dyn ReminderStore>,
    pub settings: SettingsManager,
    pub session: SessionContext,
    pub typing_delay: Duration,
}

impl ActorState {
    pub fn standing_instructions(&self) -> String {
        self.settings
            .settings()
            .standing_instructions
            .unwrap_or_else(|| DEFAULT_STANDING_INSTRUCTIONS.to_string())
    }
}

fn create_provider(settings: &SettingsManager) -> Box<dyn GenerationProvider> {
    match settings.settings().active_provider_config() {
        Some(ProviderConfig::Anthropic { api_key, model }) => {
            Box::new(AnthropicProvider::new(api_key.clone(), model.clone()))
        }
        Some(ProviderConfig::Mock { reply }) => Box::new(MockProvider::new(match reply {
            Some(text) => MockBehavior::Reply { text: text.clone() },
            None => MockBehavior::AlwaysUnavailable,
        })),
        None => Box::new(MockProvider::new(MockBehavior::AlwaysUnavailable)),
    }
}

// Actor implementation as free functions
async fn run_actor(mut state: ActorState, mut rx: mpsc::UnboundedReceiver<ChatActorMessage>) {
    info!("ChatActor started");

    while let Some(message) = rx.recv().await {
        // Typing goes high for the whole time a request is being processed
        // so the UI can disable submission.
        state.event_sender.set_typing(true);

        if let Err(e) = handle_message(&mut state, message).await {
            error!(?e, "Error processing message");
            state
                .event_sender
                .add_message(ChatMessage::error(format!("Error: {e:?}")));
        }

        state.event_sender.set_typing(false);
    }

    info!("ChatActor stopped");
}

async fn handle_message(state: &mut ActorState, message: ChatActorMessage) -> Result<()> {
    match message {
        ChatActorMessage::UserInput(input) => turn::run_turn(state, input).await,
        ChatActorMessage::GetSettings => {
            let settings = state.settings.settings();
            let settings_json = serde_json::to_value(settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize settings: {}", e))?;
            state.event_sender.send(ChatEvent::Settings(settings_json));
            Ok(())
        }
        ChatActorMessage::SaveSettings { settings } => {
            let settings = serde_json::from_value(settings)
                .map_err(|e| anyhow::anyhow!("Failed to deserialize settings: {}", e))?;
            state.settings.save_settings(settings)?;
            state.typing_delay =
                Duration::from_millis(state.settings.settings().typing_delay_ms);
            state.provider = create_provider(&state.settings);
            Ok(())
        }
    }
}
