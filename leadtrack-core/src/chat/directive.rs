use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::reminders::ReminderDraft;

/// What a follow-up action asks the relationship manager to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Call,
    Draft,
    Confirm,
    Nudge,
}

impl ActionKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "call" => Some(Self::Call),
            "draft" => Some(Self::Draft),
            "confirm" => Some(Self::Confirm),
            "nudge" => Some(Self::Nudge),
            _ => None,
        }
    }
}

/// One follow-up action extracted from an assistant reply, rendered by the
/// UI as a clickable button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDirective {
    pub kind: ActionKind,
    pub label: String,
    pub payload: String,
}

/// The result of scanning an assistant reply for directives: the reply with
/// every recognized directive stripped, plus the structured data recovered
/// from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub text: String,
    pub actions: Vec<ActionDirective>,
    pub reminder: Option<ReminderDraft>,
}

/// Scan generated text for `ACTION:` and `REMINDER_SET:` directives, strip
/// them, and return the structured leftovers.
///
/// Parsing is fail-open: a span that does not fully match the directive
/// grammar is left in the text untouched, except for a `REMINDER_SET:` whose
/// braces match but whose body is unparseable, which is removed with a
/// warning so the user never sees a half-formed machine line. Only the first
/// `REMINDER_SET:` is honored; any later ones stay in the text as-is.
pub fn extract(raw: &str) -> Extraction {
    let (text, reminder) = extract_reminder(raw);
    let (text, actions) = extract_actions(&text);

    Extraction {
        text: text.trim().to_string(),
        actions,
        reminder,
    }
}

fn extract_reminder(text: &str) -> (String, Option<ReminderDraft>) {
    const MARKER: &str = "REMINDER_SET:";

    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(MARKER) {
        let marker_start = search_from + offset;
        search_from = marker_start + MARKER.len();

        let after_marker = &text[marker_start + MARKER.len()..];
        let trimmed = after_marker.trim_start();
        if !trimmed.starts_with('{') {
            continue;
        }

        // The payload is a flat JSON object, so the first closing brace
        // ends it.
        let Some(brace_end) = trimmed.find('}') else {
            continue;
        };
        let json = &trimmed[..=brace_end];

        let span_len = MARKER.len() + (after_marker.len() - trimmed.len()) + brace_end + 1;
        let mut stripped = String::with_capacity(text.len());
        stripped.push_str(&text[..marker_start]);
        stripped.push_str(&text[marker_start + span_len..]);

        return match serde_json::from_str::<ReminderDraft>(json) {
            Ok(draft) => (stripped, Some(draft)),
            Err(e) => {
                warn!(error = %e, payload = json, "discarding unparseable reminder directive");
                (stripped, None)
            }
        };
    }

    (text.to_string(), None)
}

fn extract_actions(text: &str) -> (String, Vec<ActionDirective>) {
    const MARKER: &str = "ACTION:";

    let mut actions = Vec::new();
    let mut cleaned = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(marker_start) = rest.find(MARKER) {
        let after_marker = &rest[marker_start + MARKER.len()..];
        let trimmed = after_marker.trim_start();

        let Some(body) = parse_action_body(trimmed) else {
            // Not directive-shaped; keep the marker text and move past it.
            cleaned.push_str(&rest[..marker_start + MARKER.len()]);
            rest = after_marker;
            continue;
        };

        let span_len =
            MARKER.len() + (after_marker.len() - trimmed.len()) + body.span_len;
        cleaned.push_str(&rest[..marker_start]);
        rest = &rest[marker_start + span_len..];
        actions.push(body.directive);
    }

    cleaned.push_str(rest);
    (cleaned, actions)
}

struct ActionBody {
    directive: ActionDirective,
    span_len: usize,
}

/// Parse `[kind|label|payload]` at the start of the input. Kind from the
/// closed set, label and payload non-empty; the payload is free text running
/// to the closing bracket and may itself contain `|`.
fn parse_action_body(input: &str) -> Option<ActionBody> {
    let inner = input.strip_prefix('[')?;
    let close = inner.find(']')?;
    let body = &inner[..close];

    let mut fields = body.splitn(3, '|');
    let kind = ActionKind::parse(fields.next()?)?;
    let label = fields.next()?.trim();
    let payload = fields.next()?.trim();
    if label.is_empty() || payload.is_empty() {
        return None;
    }

    Some(ActionBody {
        directive: ActionDirective {
            kind,
            label: label.to_string(),
            payload: payload.to_string(),
        },
        span_len: 1 + close + 1,
    })
}
