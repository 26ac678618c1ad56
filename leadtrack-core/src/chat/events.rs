use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::chat::directive::ActionDirective;

/// `ChatEvent` are the messages sent from the actor - the output of the actor.
///
/// The actor is built with 2 channels - an input and output channel. Requests
/// are sent to the actor through the input channel. Requests may generate 1 or
/// more `ChatEvent`s in response which are sent to the output channel. The CLI
/// (and tests) process chat events to implement their rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum ChatEvent {
    MessageAdded(ChatMessage),
    TypingStatusChanged(bool),
    Settings(serde_json::Value),
    Error(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub timestamp: u64,
    pub sender: MessageSender,
    pub content: String,
    /// Lead in focus when this message was produced, if any.
    pub lead_ref: Option<String>,
    /// Follow-up actions extracted from an assistant reply.
    pub actions: Vec<ActionDirective>,
}

impl ChatMessage {
    pub fn user(content: String, lead_ref: Option<String>) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis() as u64,
            sender: MessageSender::User,
            content,
            lead_ref,
            actions: vec![],
        }
    }

    pub fn assistant(
        content: String,
        lead_ref: Option<String>,
        actions: Vec<ActionDirective>,
    ) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis() as u64,
            sender: MessageSender::Assistant,
            content,
            lead_ref,
            actions,
        }
    }

    pub fn system(content: String) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis() as u64,
            sender: MessageSender::System,
            content,
            lead_ref: None,
            actions: vec![],
        }
    }

    pub fn error(content: String) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis() as u64,
            sender: MessageSender::Error,
            content,
            lead_ref: None,
            actions: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageSender {
    User,
    Assistant,
    System,
    Error,
}

/// A small wrapper over the `event_tx` for convienance.
#[derive(Clone)]
pub struct EventSender {
    event_tx: mpsc::UnboundedSender<ChatEvent>,
}

impl EventSender {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ChatEvent>) {
        let (event_tx, rx) = mpsc::unbounded_channel();
        (Self { event_tx }, rx)
    }

    pub fn add_message(&self, message: ChatMessage) {
        let _ = self.event_tx.send(ChatEvent::MessageAdded(message));
    }

    pub fn set_typing(&self, typing: bool) {
        let _ = self.event_tx.send(ChatEvent::TypingStatusChanged(typing));
    }

    pub fn send(&self, event: ChatEvent) {
        let _ = self.event_tx.send(event);
    }
}
