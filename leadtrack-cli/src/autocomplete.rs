use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::Context;
use rustyline_derive::{Helper, Highlighter, Hinter, Validator};

use leadtrack_core::chat::resolver::{self, LOOKUP_MARKER};
use leadtrack_core::leads::LeadCatalog;

/// Rustyline helper that offers lead suggestions when the user types the
/// lookup marker. Selecting a suggestion replaces everything from the marker
/// to the cursor with the canonical lead identifier.
#[derive(Helper, Highlighter, Hinter, Validator)]
pub struct LeadHelper {
    catalog: LeadCatalog,
}

impl LeadHelper {
    pub fn new(catalog: LeadCatalog) -> Self {
        Self { catalog }
    }
}

impl Completer for LeadHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Self::Candidate>), ReadlineError> {
        let prefix = &line[..pos];
        let Some(marker) = prefix.rfind(LOOKUP_MARKER) else {
            return Ok((0, Vec::new()));
        };

        let pairs = resolver::suggest(prefix, &self.catalog)
            .into_iter()
            .map(|lead| {
                let flag = if lead.needs_rm_action() {
                    " (action needed)"
                } else {
                    ""
                };
                Pair {
                    display: format!("{} - {} [{}]{}", lead.id, lead.name, lead.stage, flag),
                    replacement: lead.id.clone(),
                }
            })
            .collect();

        Ok((marker, pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::DefaultHistory;

    #[test]
    fn completes_from_last_marker() {
        let helper = LeadHelper::new(LeadCatalog::builtin());
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);

        let line = "status of #roh";
        let (start, pairs) = helper.complete(line, line.len(), &ctx).unwrap();

        assert_eq!(start, line.rfind('#').unwrap());
        assert!(!pairs.is_empty());
        assert!(pairs.iter().all(|p| p.replacement.starts_with('L')));
    }

    #[test]
    fn no_marker_means_no_candidates() {
        let helper = LeadHelper::new(LeadCatalog::builtin());
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);

        let (_, pairs) = helper.complete("status of rohan", 15, &ctx).unwrap();
        assert!(pairs.is_empty());
    }
}
