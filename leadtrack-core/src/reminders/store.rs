use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::reminders::{Reminder, ReminderDraft};

/// How far past its due date a reminder survives before the startup
/// housekeeping pass deletes it.
const RETENTION_DAYS: i64 = 3;

/// Persistence boundary for reminders. The core always reads all, filters
/// in memory, and writes all back; no partial-update contract is assumed.
pub trait ReminderStore: Send + Sync {
    fn get_all(&self) -> Result<Vec<Reminder>>;
    fn save_all(&self, reminders: &[Reminder]) -> Result<()>;
}

/// Mint an id and creation date for the draft and append it to the store.
pub fn append(
    store: &dyn ReminderStore,
    draft: ReminderDraft,
    today: NaiveDate,
) -> Result<Reminder> {
    let reminder = Reminder {
        id: Uuid::new_v4().to_string(),
        lead_id: draft.lead_id,
        actor: draft.actor,
        actor_phone: draft.actor_phone,
        commitment: draft.commitment,
        due_date: draft.due_date,
        created_date: today,
    };

    let mut reminders = store.get_all()?;
    reminders.push(reminder.clone());
    store.save_all(&reminders)?;

    Ok(reminder)
}

/// Reminders due on exactly the given date. A store read failure degrades to
/// an empty list so the turn proceeds without reminders.
pub fn due_on(store: &dyn ReminderStore, date: NaiveDate) -> Vec<Reminder> {
    match store.get_all() {
        Ok(reminders) => reminders.into_iter().filter(|r| r.due_date == date).collect(),
        Err(e) => {
            tracing::warn!(error = ?e, "failed to read reminders; treating as none for this turn");
            Vec::new()
        }
    }
}

/// Session-start housekeeping: delete every reminder whose due date is more
/// than `RETENTION_DAYS` calendar days in the past. Returns the number
/// deleted.
pub fn prune_expired(store: &dyn ReminderStore, today: NaiveDate) -> Result<usize> {
    let cutoff = today - Duration::days(RETENTION_DAYS);
    let reminders = store.get_all()?;
    let kept: Vec<Reminder> = reminders
        .iter()
        .filter(|r| r.due_date >= cutoff)
        .cloned()
        .collect();

    let pruned = reminders.len() - kept.len();
    if pruned > 0 {
        store.save_all(&kept)?;
    }
    Ok(pruned)
}

/// Reminders persisted as a single JSON file under the user's data
/// directory.
pub struct FileReminderStore {
    path: PathBuf,
}

impl FileReminderStore {
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().context("failed to get home directory")?;
        Ok(Self::from_path(home.join(".leadtrack").join("reminders.json")))
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ReminderStore for FileReminderStore {
    fn get_all(&self) -> Result<Vec<Reminder>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read reminders from {:?}", self.path))?;

        match serde_json::from_str(&json) {
            Ok(reminders) => Ok(reminders),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "reminder file is unparseable; starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, reminders: &[Reminder]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }

        let json = serde_json::to_string_pretty(reminders).context("failed to serialize reminders")?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write reminders to {:?}", self.path))?;

        Ok(())
    }
}

/// In-memory store used by tests and by sessions that opt out of
/// persistence.
#[derive(Clone, Default)]
pub struct MemoryReminderStore {
    inner: Arc<Mutex<Vec<Reminder>>>,
}

impl MemoryReminderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReminderStore for MemoryReminderStore {
    fn get_all(&self) -> Result<Vec<Reminder>> {
        Ok(self.inner.lock().unwrap().clone())
    }

    fn save_all(&self, reminders: &[Reminder]) -> Result<()> {
        *self.inner.lock().unwrap() = reminders.to_vec();
        Ok(())
    }
}
