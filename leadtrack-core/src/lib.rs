pub mod ai;
pub mod chat;
pub mod leads;
pub mod prompt;
pub mod reminders;
pub mod settings;

pub use chat::{ChatActor, ChatActorMessage, ChatEvent, ChatMessage};
