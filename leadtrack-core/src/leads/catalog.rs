use serde_json::Value;

use crate::leads::LeadRecord;

const BUILTIN_LEADS: &str = include_str!("leads.json");

/// Static, read-only catalog of lead records. Supports point lookup by id
/// and full enumeration; the enumeration order is the canonical order used
/// for autocomplete ranking ties.
#[derive(Debug, Clone)]
pub struct LeadCatalog {
    leads: Vec<LeadRecord>,
}

impl LeadCatalog {
    pub fn new(leads: Vec<LeadRecord>) -> Self {
        Self { leads }
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> Self {
        let leads: Vec<LeadRecord> =
            serde_json::from_str(BUILTIN_LEADS).expect("embedded lead catalog is valid JSON");
        Self { leads }
    }

    pub fn get(&self, id: &str) -> Option<&LeadRecord> {
        self.leads.iter().find(|lead| lead.id == id)
    }

    pub fn all(&self) -> &[LeadRecord] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    /// Number of leads currently waiting on the RM.
    pub fn rm_action_count(&self) -> usize {
        self.leads.iter().filter(|l| l.needs_rm_action()).count()
    }

    /// Canonical serialized form of the whole catalog, keyed by lead id.
    /// Embedded verbatim in every generation payload to keep the backend
    /// fact-grounded.
    pub fn to_canonical_json(&self) -> String {
        let mut map = serde_json::Map::new();
        for lead in &self.leads {
            let value = serde_json::to_value(lead).expect("lead record serializes");
            map.insert(lead.id.clone(), value);
        }
        serde_json::to_string_pretty(&Value::Object(map)).expect("lead catalog serializes")
    }
}
