use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use tokio::sync::mpsc;

use leadtrack_core::chat::actor::ChatActor;
use leadtrack_core::chat::directive::{ActionDirective, ActionKind};
use leadtrack_core::chat::events::{ChatEvent, MessageSender};
use leadtrack_core::leads::LeadCatalog;
use leadtrack_core::reminders::store::FileReminderStore;
use leadtrack_core::settings::SettingsManager;

use crate::autocomplete::LeadHelper;

pub struct InteractiveApp {
    chat_actor: ChatActor,
    event_rx: mpsc::UnboundedReceiver<ChatEvent>,
    /// Action buttons from the most recent assistant message, selectable by
    /// number.
    pending_actions: Vec<ActionDirective>,
}

impl InteractiveApp {
    pub async fn new(settings_path: Option<PathBuf>) -> Result<Self> {
        let settings_manager = match settings_path {
            Some(path) => SettingsManager::from_path(path)?,
            None => SettingsManager::new()?,
        };

        let reminders = Arc::new(FileReminderStore::new()?);
        let (chat_actor, event_rx) = ChatActor::launch(settings_manager, reminders);

        println!("Type a message, # to look up a lead, a button number to act, /quit to exit");

        Ok(Self {
            chat_actor,
            event_rx,
            pending_actions: Vec::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let config = Config::builder().auto_add_history(true).build();
        let mut rl = Editor::with_config(config)?;
        rl.set_helper(Some(LeadHelper::new(LeadCatalog::builtin())));

        // Handshake so startup messages (greeting, configuration errors) are
        // printed before the first prompt
        self.chat_actor.get_settings()?;
        self.await_turn().await?;

        loop {
            let line = match rl.readline("\x1b[35m>\x1b[0m ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(_) => break,
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            match input {
                "/quit" | "/exit" => break,
                "/settings" => {
                    self.chat_actor.get_settings()?;
                    self.await_turn().await?;
                    continue;
                }
                "/help" => {
                    println!("  /settings  show current settings");
                    println!("  /quit      exit");
                    println!("  #          lead lookup (tab to complete)");
                    println!("  1-9        press an action button from the last reply");
                    continue;
                }
                _ => {}
            }

            if let Ok(index) = input.parse::<usize>() {
                if index >= 1 && index <= self.pending_actions.len() {
                    let action = self.pending_actions[index - 1].clone();
                    self.handle_action(action).await?;
                    continue;
                }
            }

            self.chat_actor.send_message(input.to_string())?;
            self.await_turn().await?;
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// What pressing a button does. Call shows the number to dial; draft
    /// turns into a follow-up generation request; confirm and nudge print a
    /// canned acknowledgement.
    async fn handle_action(&mut self, action: ActionDirective) -> Result<()> {
        match action.kind {
            ActionKind::Call => {
                println!("Dial {}", action.payload);
            }
            ActionKind::Draft => {
                let message_type = match action.payload.as_str() {
                    "doc_request" => "document request",
                    "query_response" => "query response",
                    "sanction_script" => "acceptance script",
                    "negotiation" => "negotiation points",
                    "followup" => "follow-up message",
                    "intro" => "introduction message",
                    "resanction" => "re-sanction plan",
                    _ => "message",
                };
                self.chat_actor
                    .send_message(format!("Can you draft a {message_type} for this lead?"))?;
                self.await_turn().await?;
            }
            ActionKind::Confirm => {
                let message = match action.payload.as_str() {
                    "docs_received" => {
                        "Great! Documents received. Now upload them and submit in Sales Central."
                    }
                    "customer_accepted" => {
                        "Awesome! Customer accepted. Move to LD Pending in Sales Central."
                    }
                    "decision_received" => {
                        "Got it! Decision recorded. Update the status in Sales Central."
                    }
                    "docs_signed" => {
                        "Perfect! Documents signed. Should move to disbursal soon!"
                    }
                    _ => "Action marked! Update in Sales Central to proceed.",
                };
                println!("{message}");
            }
            ActionKind::Nudge => {
                let message = match action.payload.as_str() {
                    "resolve_query" => {
                        "Open Sales Central to upload documents and resolve the query."
                    }
                    "start_application" => "Open Sales Central to start the application.",
                    "submit_application" => "Open Sales Central to submit the application.",
                    "upload_docs" => "Open Sales Central to upload the documents.",
                    "complete_application" => "Open Sales Central to complete the application.",
                    _ => "Open Sales Central to complete this action.",
                };
                println!("{message}");
            }
        }
        Ok(())
    }

    /// Render events until the actor reports it has gone idle.
    async fn await_turn(&mut self) -> Result<()> {
        while let Some(event) = self.event_rx.recv().await {
            match event {
                ChatEvent::MessageAdded(message) => match message.sender {
                    MessageSender::Assistant => {
                        println!("\x1b[36m{}\x1b[0m", message.content);
                        self.pending_actions = message.actions;
                        for (i, action) in self.pending_actions.iter().enumerate() {
                            println!("  [{}] {}", i + 1, action.label);
                        }
                    }
                    MessageSender::System => println!("\x1b[2m{}\x1b[0m", message.content),
                    MessageSender::Error => eprintln!("\x1b[31m{}\x1b[0m", message.content),
                    MessageSender::User => {}
                },
                ChatEvent::Settings(settings) => {
                    println!("{}", serde_json::to_string_pretty(&settings)?);
                }
                ChatEvent::Error(e) => eprintln!("\x1b[31m{e}\x1b[0m"),
                ChatEvent::TypingStatusChanged(typing) => {
                    if !typing {
                        break;
                    }
                }
            }
        }

        Ok(())
    }
}
