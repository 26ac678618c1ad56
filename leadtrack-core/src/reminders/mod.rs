use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod store;

pub use store::{FileReminderStore, MemoryReminderStore, ReminderStore};

/// An off-system commitment the RM asked to be reminded about. Created only
/// from a parsed `REMINDER_SET` directive; write-once, delete-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub lead_id: String,
    pub actor: String,
    pub actor_phone: String,
    pub commitment: String,
    pub due_date: NaiveDate,
    pub created_date: NaiveDate,
}

/// The five fields carried by the `REMINDER_SET` wire format. `id` and
/// `created_date` are filled in when the draft is appended to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDraft {
    pub lead_id: String,
    pub actor: String,
    pub actor_phone: String,
    pub commitment: String,
    pub due_date: NaiveDate,
}
