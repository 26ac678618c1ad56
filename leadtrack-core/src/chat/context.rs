use chrono::{Duration, NaiveDate};

use crate::leads::LeadCatalog;
use crate::reminders::store::{self, ReminderStore};

/// Whether the user text asks about reminders or daily focus. Only these
/// turns get reminder data injected into the payload.
pub fn is_reminder_intent(text: &str) -> bool {
    let lower = text.to_lowercase();
    if lower.contains("remind") || lower.contains("focus") {
        return true;
    }
    match lower.find("follow") {
        Some(i) => lower[i..].contains("up"),
        None => false,
    }
}

/// Which date a reminder query targets. "Tomorrow" is the only recognized
/// offset; every other phrasing means today.
pub fn reminder_target_date(text: &str, today: NaiveDate) -> NaiveDate {
    if text.to_lowercase().contains("tomorrow") {
        today + Duration::days(1)
    } else {
        today
    }
}

/// Build the situational payload for one turn: portfolio counts, the lead
/// under discussion, reminders when asked for, and the full catalog so the
/// backend stays fact-grounded. The catalog is never summarized or
/// truncated; only conversation history is bounded, and that happens in the
/// turn driver.
pub fn assemble(
    user_text: &str,
    current_lead: Option<&str>,
    catalog: &LeadCatalog,
    reminders: &dyn ReminderStore,
    today: NaiveDate,
) -> String {
    let total = catalog.len();
    let action_needed = catalog.rm_action_count();

    let mut context = format!(
        "CURRENT CONTEXT:\n\
         - RM has {total} active leads\n\
         - {action_needed} require RM action\n\
         - {} are with other teams",
        total - action_needed
    );

    if let Some(lead) = current_lead.and_then(|id| catalog.get(id)) {
        context.push_str(&format!(
            "\n- User is currently discussing lead: {} ({})",
            lead.id, lead.name
        ));
    }

    if is_reminder_intent(user_text) {
        let target = reminder_target_date(user_text, today);
        let due = store::due_on(reminders, target);

        if !due.is_empty() {
            let day_word = if target == today { "TODAY" } else { "TOMORROW" };
            let json = serde_json::to_string_pretty(&due)
                .unwrap_or_else(|_| "[]".to_string());
            context.push_str(&format!(
                "\n\nREMINDERS FOR {day_word}:\n{json}\n\n\
                 IMPORTANT: Show these reminders FIRST before action-needed leads \
                 when user asks for \"focus\" or \"reminders\"."
            ));
        }
    }

    context.push_str(&format!(
        "\n\nLEAD DATA:\n{}\n\n\
         USER REQUEST: \"{user_text}\"\n\n\
         Respond conversationally and helpfully based on what the RM needs. \
         Keep responses focused and actionable.",
        catalog.to_canonical_json()
    ));

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminders::store::{append, MemoryReminderStore};
    use crate::reminders::ReminderDraft;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(commitment: &str, due_date: NaiveDate) -> ReminderDraft {
        ReminderDraft {
            lead_id: "L004".to_string(),
            actor: "Sneha Reddy".to_string(),
            actor_phone: "+91 98765 43213".to_string(),
            commitment: commitment.to_string(),
            due_date,
        }
    }

    #[test]
    fn detects_reminder_intent() {
        assert!(is_reminder_intent("What should I focus on today?"));
        assert!(is_reminder_intent("Remind me to call Sneha"));
        assert!(is_reminder_intent("any follow ups tomorrow?"));
        assert!(!is_reminder_intent("status of L004"));
    }

    #[test]
    fn tomorrow_shifts_target_date() {
        let today = date(2025, 12, 28);
        assert_eq!(
            reminder_target_date("reminders for tomorrow", today),
            date(2025, 12, 29)
        );
        assert_eq!(reminder_target_date("focus today", today), today);
        assert_eq!(reminder_target_date("what's due?", today), today);
    }

    #[test]
    fn payload_carries_counts_and_catalog() {
        let catalog = LeadCatalog::builtin();
        let store = MemoryReminderStore::new();
        let payload = assemble("status?", None, &catalog, &store, date(2025, 12, 28));

        assert!(payload.contains(&format!("RM has {} active leads", catalog.len())));
        assert!(payload.contains(&format!(
            "{} require RM action",
            catalog.rm_action_count()
        )));
        assert!(payload.contains("LEAD DATA:"));
        assert!(payload.contains("\"L001\""));
        assert!(payload.contains("USER REQUEST: \"status?\""));
        assert!(!payload.contains("currently discussing"));
    }

    #[test]
    fn current_lead_is_annotated() {
        let catalog = LeadCatalog::builtin();
        let store = MemoryReminderStore::new();
        let payload = assemble("call them", Some("L004"), &catalog, &store, date(2025, 12, 28));

        assert!(payload.contains("User is currently discussing lead: L004"));
    }

    #[test]
    fn uncataloged_current_lead_is_skipped() {
        let catalog = LeadCatalog::builtin();
        let store = MemoryReminderStore::new();
        let payload = assemble("call them", Some("L029"), &catalog, &store, date(2025, 12, 28));

        assert!(!payload.contains("currently discussing"));
    }

    #[test]
    fn focus_query_injects_only_todays_reminders() {
        let catalog = LeadCatalog::builtin();
        let store = MemoryReminderStore::new();
        let today = date(2025, 12, 28);
        append(&store, draft("Send salary slips", today), today).unwrap();
        append(&store, draft("Sign loan documents", today + Duration::days(1)), today).unwrap();

        let payload = assemble(
            "What should I focus on today?",
            None,
            &catalog,
            &store,
            today,
        );

        assert!(payload.contains("REMINDERS FOR TODAY:"));
        assert!(payload.contains("Send salary slips"));
        assert!(!payload.contains("Sign loan documents"));
        assert!(payload.contains("Show these reminders FIRST"));
    }

    #[test]
    fn tomorrow_query_targets_tomorrow() {
        let catalog = LeadCatalog::builtin();
        let store = MemoryReminderStore::new();
        let today = date(2025, 12, 28);
        append(&store, draft("Sign loan documents", today + Duration::days(1)), today).unwrap();

        let payload = assemble("reminders for tomorrow", None, &catalog, &store, today);

        assert!(payload.contains("REMINDERS FOR TOMORROW:"));
        assert!(payload.contains("Sign loan documents"));
    }

    #[test]
    fn no_due_reminders_means_no_reminder_block() {
        let catalog = LeadCatalog::builtin();
        let store = MemoryReminderStore::new();
        let payload = assemble(
            "focus today",
            None,
            &catalog,
            &store,
            date(2025, 12, 28),
        );

        assert!(!payload.contains("REMINDERS FOR"));
    }

    #[test]
    fn plain_query_never_touches_reminders() {
        let catalog = LeadCatalog::builtin();
        let store = MemoryReminderStore::new();
        let today = date(2025, 12, 28);
        append(&store, draft("Send salary slips", today), today).unwrap();

        let payload = assemble("status of L004", None, &catalog, &store, today);

        assert!(!payload.contains("REMINDERS FOR"));
        assert!(!payload.contains("Send salary slips"));
    }
}
