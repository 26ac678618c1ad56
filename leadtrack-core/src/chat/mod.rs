pub mod actor;
pub mod context;
pub mod directive;
pub mod events;
pub mod resolver;
pub mod turn;

#[cfg(test)]
mod tests;

pub use actor::{ChatActor, ChatActorMessage, SessionContext};
pub use directive::{ActionDirective, ActionKind, Extraction};
pub use events::{ChatEvent, ChatMessage, EventSender, MessageSender};
