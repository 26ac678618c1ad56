use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::ai::{GenerationError, GenerationRequest, HistoryMessage};
use crate::chat::actor::ActorState;
use crate::chat::events::{ChatMessage, MessageSender};
use crate::chat::{context, directive, resolver};
use crate::reminders::store;

/// Hard cap on how many prior messages (user and assistant combined) are
/// sent to the backend each turn.
pub const HISTORY_WINDOW: usize = 6;

pub async fn run_turn(state: &mut ActorState, input: String) -> anyhow::Result<()> {
    run_turn_at(state, input, Utc::now().date_naive()).await
}

/// Drive one full turn: resolve the lead reference, assemble the payload,
/// call the backend, extract directives, persist any reminder, and finalize
/// the assistant message after the display-pacing delay.
///
/// The history window is captured before the current user message is
/// appended, so the trailing payload is the only place the backend sees this
/// turn's text.
pub async fn run_turn_at(
    state: &mut ActorState,
    input: String,
    today: NaiveDate,
) -> anyhow::Result<()> {
    state.session.pending_turn = true;
    let history = recent_history(&state.session.log);

    let resolved = resolver::resolve(
        &input,
        state.session.current_lead.as_deref(),
        &state.catalog,
    );
    state.session.current_lead = resolved.clone();

    let user_message = ChatMessage::user(input.clone(), resolved.clone());
    state.session.log.push(user_message.clone());
    state.event_sender.add_message(user_message);

    let payload = context::assemble(
        &input,
        resolved.as_deref(),
        &state.catalog,
        state.reminders.as_ref(),
        today,
    );

    let request = GenerationRequest {
        standing_instructions: state.standing_instructions(),
        history,
        trailing_user_content: payload,
    };

    let raw = match state.provider.generate(request).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, provider = state.provider.name(), "generation failed");
            fallback_text(&e)
        }
    };

    let extraction = directive::extract(&raw);

    if let Some(reminder) = extraction.reminder {
        // A reminder the model confirmed but we cannot store is worth a log
        // line, not a failed turn.
        if let Err(e) = store::append(state.reminders.as_ref(), reminder, today) {
            warn!(error = ?e, "failed to persist reminder");
        }
    }

    tokio::time::sleep(state.typing_delay).await;

    let assistant_message = ChatMessage::assistant(extraction.text, resolved, extraction.actions);
    state.session.log.push(assistant_message.clone());
    state.event_sender.add_message(assistant_message);
    state.session.pending_turn = false;

    Ok(())
}

/// The most recent conversational messages, oldest first, capped at
/// `HISTORY_WINDOW`. System and error messages never reach the backend.
fn recent_history(log: &[ChatMessage]) -> Vec<HistoryMessage> {
    let conversational: Vec<HistoryMessage> = log
        .iter()
        .filter_map(|m| match m.sender {
            MessageSender::User => Some(HistoryMessage::user(m.content.clone())),
            MessageSender::Assistant => Some(HistoryMessage::assistant(m.content.clone())),
            MessageSender::System | MessageSender::Error => None,
        })
        .collect();

    let skip = conversational.len().saturating_sub(HISTORY_WINDOW);
    conversational.into_iter().skip(skip).collect()
}

/// Every failure kind maps to a neutral string the RM can act on; raw error
/// detail stays in the logs.
fn fallback_text(error: &GenerationError) -> String {
    match error {
        GenerationError::Unavailable(_) => {
            "Oops, I'm having some connection issues. Please try again in a moment.".to_string()
        }
        GenerationError::Backend(message) => {
            format!("Sorry, I encountered an error: {message}. Please try again.")
        }
        GenerationError::EmptyResponse => {
            "I'm having trouble processing that right now. Could you try asking in a different way?"
                .to_string()
        }
    }
}
