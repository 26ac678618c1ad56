use std::sync::{Arc, Once};
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;

use crate::ai::mock::{MockBehavior, MockProvider};
use crate::chat::actor::{ActorState, SessionContext};
use crate::chat::events::{ChatEvent, EventSender, MessageSender};
use crate::chat::turn::{run_turn_at, HISTORY_WINDOW};
use crate::chat::{directive::ActionKind, turn};
use crate::leads::LeadCatalog;
use crate::reminders::store::{append, MemoryReminderStore, ReminderStore};
use crate::reminders::ReminderDraft;
use crate::settings::SettingsManager;

static TRACING_INIT: Once = Once::new();

fn setup_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 28).unwrap()
}

struct TestFixture {
    state: ActorState,
    provider: MockProvider,
    reminders: MemoryReminderStore,
    event_rx: tokio::sync::mpsc::UnboundedReceiver<ChatEvent>,
    _settings_dir: tempfile::TempDir,
}

impl TestFixture {
    fn new(mock_behavior: MockBehavior) -> Self {
        setup_tracing();

        let settings_dir = tempfile::tempdir().expect("Failed to create settings dir");
        let settings = SettingsManager::from_path(settings_dir.path().join("settings.toml"))
            .expect("Failed to create settings manager");

        let provider = MockProvider::new(mock_behavior);
        let reminders = MemoryReminderStore::new();
        let (event_sender, event_rx) = EventSender::new();

        let state = ActorState {
            event_sender,
            provider: Box::new(provider.clone()),
            catalog: LeadCatalog::builtin(),
            reminders: Arc::new(reminders.clone()),
            settings,
            session: SessionContext::default(),
            typing_delay: Duration::ZERO,
        };

        TestFixture {
            state,
            provider,
            reminders,
            event_rx,
            _settings_dir: settings_dir,
        }
    }

    fn last_assistant_text(&mut self) -> String {
        let mut latest = None;
        while let Ok(event) = self.event_rx.try_recv() {
            if let ChatEvent::MessageAdded(message) = event {
                if message.sender == MessageSender::Assistant {
                    latest = Some(message.content);
                }
            }
        }
        latest.expect("no assistant message emitted")
    }
}

#[tokio::test]
async fn lead_context_carries_across_turns() -> Result<()> {
    let mut fixture = TestFixture::new(MockBehavior::Reply {
        text: "On it.".to_string(),
    });

    run_turn_at(&mut fixture.state, "what's up with L013?".to_string(), today()).await?;
    assert_eq!(fixture.state.session.current_lead.as_deref(), Some("L013"));

    run_turn_at(&mut fixture.state, "call them".to_string(), today()).await?;
    assert_eq!(fixture.state.session.current_lead.as_deref(), Some("L013"));

    let request = fixture.provider.get_last_captured_request().unwrap();
    assert!(request
        .trailing_user_content
        .contains("User is currently discussing lead: L013"));

    Ok(())
}

#[tokio::test]
async fn focus_query_injects_todays_reminders_only() -> Result<()> {
    let fixture_date = today();
    let mut fixture = TestFixture::new(MockBehavior::Reply {
        text: "Here's your day.".to_string(),
    });

    let due_today = ReminderDraft {
        lead_id: "L004".to_string(),
        actor: "Sneha Reddy".to_string(),
        actor_phone: "+91 98765 43213".to_string(),
        commitment: "Send salary slips".to_string(),
        due_date: fixture_date,
    };
    let due_tomorrow = ReminderDraft {
        lead_id: "L013".to_string(),
        actor: "Sanjay Patel".to_string(),
        actor_phone: "+91 98765 43222".to_string(),
        commitment: "Accept sanction letter".to_string(),
        due_date: fixture_date + chrono::Duration::days(1),
    };
    append(&fixture.reminders, due_today, fixture_date)?;
    append(&fixture.reminders, due_tomorrow, fixture_date)?;

    run_turn_at(
        &mut fixture.state,
        "What should I focus on today?".to_string(),
        fixture_date,
    )
    .await?;

    let request = fixture.provider.get_last_captured_request().unwrap();
    assert!(request.trailing_user_content.contains("REMINDERS FOR TODAY:"));
    assert!(request.trailing_user_content.contains("Send salary slips"));
    assert!(!request.trailing_user_content.contains("Accept sanction letter"));

    Ok(())
}

#[tokio::test]
async fn reminder_directive_is_persisted_and_stripped() -> Result<()> {
    let mut fixture = TestFixture::new(MockBehavior::Reply {
        text: "Got it! I'll remind you tomorrow to follow up with Sneha on the salary slips.\n\
               REMINDER_SET: {\"leadId\":\"L004\",\"actor\":\"Sneha Reddy\",\
               \"actorPhone\":\"+91 98765 43213\",\"commitment\":\"Send salary slips\",\
               \"dueDate\":\"2025-12-29\"}\n\
               ACTION: [call|Call Sneha|+91 98765 43213]"
            .to_string(),
    });

    run_turn_at(
        &mut fixture.state,
        "Remind me to follow up with Sneha tomorrow on the salary slips".to_string(),
        today(),
    )
    .await?;

    let stored = fixture.reminders.get_all()?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].lead_id, "L004");
    assert_eq!(stored[0].created_date, today());
    assert_eq!(
        stored[0].due_date,
        NaiveDate::from_ymd_opt(2025, 12, 29).unwrap()
    );

    let text = fixture.last_assistant_text();
    assert!(!text.contains("REMINDER_SET"));
    assert!(!text.contains("ACTION:"));
    assert!(text.contains("Got it!"));

    let assistant = fixture.state.session.log.last().unwrap();
    assert_eq!(assistant.actions.len(), 1);
    assert_eq!(assistant.actions[0].kind, ActionKind::Call);

    Ok(())
}

#[tokio::test]
async fn unavailable_backend_renders_fallback_text() -> Result<()> {
    let mut fixture = TestFixture::new(MockBehavior::AlwaysUnavailable);

    run_turn_at(&mut fixture.state, "status of L004".to_string(), today()).await?;

    let text = fixture.last_assistant_text();
    assert_eq!(
        text,
        "Oops, I'm having some connection issues. Please try again in a moment."
    );

    Ok(())
}

#[tokio::test]
async fn backend_error_surfaces_short_message() -> Result<()> {
    let mut fixture = TestFixture::new(MockBehavior::AlwaysBackendError);

    run_turn_at(&mut fixture.state, "status of L004".to_string(), today()).await?;

    let text = fixture.last_assistant_text();
    assert_eq!(
        text,
        "Sorry, I encountered an error: Mock backend error. Please try again."
    );

    Ok(())
}

#[tokio::test]
async fn history_sent_to_backend_is_capped() -> Result<()> {
    let mut fixture = TestFixture::new(MockBehavior::Reply {
        text: "Sure.".to_string(),
    });

    for i in 0..5 {
        run_turn_at(&mut fixture.state, format!("question {i}"), today()).await?;
    }

    let request = fixture.provider.get_last_captured_request().unwrap();
    assert_eq!(request.history.len(), HISTORY_WINDOW);
    // The window is captured before the turn's own message is appended.
    assert!(request
        .history
        .iter()
        .all(|m| m.content != "question 4"));
    assert!(request.trailing_user_content.contains("question 4"));

    Ok(())
}

#[tokio::test]
async fn turn_marks_pending_only_while_in_flight() -> Result<()> {
    let mut fixture = TestFixture::new(MockBehavior::Reply {
        text: "Done.".to_string(),
    });

    assert!(!fixture.state.session.pending_turn);
    turn::run_turn_at(&mut fixture.state, "hello".to_string(), today()).await?;
    assert!(!fixture.state.session.pending_turn);
    assert_eq!(fixture.state.session.log.len(), 2);

    Ok(())
}
