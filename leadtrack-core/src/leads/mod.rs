use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod catalog;

pub use catalog::LeadCatalog;

/// A single loan lead as tracked in Sales Central. The record is read-only
/// for the core: the catalog owns the data and the core only queries it.
///
/// Fields beyond the common set are stage-specific and absent for leads in
/// other stages, so they are all optional and skipped when not present. The
/// serialized (camelCase) form is the canonical shape embedded in every
/// generation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub id: String,
    pub name: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_amount: Option<String>,
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substages: Option<Vec<String>>,
    pub progress: u8,
    pub status: String,
    pub days_in_stage: u32,
    pub phone: String,
    pub product_type: String,
    pub action_required: bool,
    pub action_owner: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_contacts: Option<BTreeMap<String, EscalationContact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_details: Option<BTreeMap<String, VerificationDetail>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_docs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_docs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_modules: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_raised_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanctioned_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resanction_possible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resanction_steps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_options: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disbursed_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disbursed_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tat: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LeadRecord {
    /// Whether the RM themselves has to act on this lead, as opposed to the
    /// lead sitting with another team.
    pub fn needs_rm_action(&self) -> bool {
        self.action_required && self.action_owner == "RM"
    }
}

/// Per-substage verification state for composite "Parallel Verifications"
/// leads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDetail {
    pub status: String,
    pub owner: String,
    pub days_in_stage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
    pub action_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationContact {
    pub name: String,
    pub phone: String,
}
