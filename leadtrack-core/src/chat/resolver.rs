use crate::leads::{LeadCatalog, LeadRecord};

/// Autocomplete never returns more suggestions than fit one keystroke menu.
pub const MAX_SUGGESTIONS: usize = 6;

/// The character that flips user input into lead-lookup mode.
pub const LOOKUP_MARKER: char = '#';

/// Determine which lead this turn concerns.
///
/// Scans the user text for a lead identifier token and, when one names a
/// cataloged lead, returns it (uppercased), overwriting prior context.
/// Otherwise the prior context propagates unchanged: neither the absence of
/// a reference nor a token unknown to the catalog ever clears an
/// established context.
pub fn resolve(
    user_text: &str,
    prior_context: Option<&str>,
    catalog: &LeadCatalog,
) -> Option<String> {
    if let Some(token) = find_lead_token(user_text) {
        if catalog.get(&token).is_some() {
            return Some(token);
        }
    }

    prior_context.map(|s| s.to_string())
}

/// First identifier-shaped token in the text: `L0`, a digit 0-2, then any
/// digit, case-insensitive, not embedded inside a longer alphanumeric run.
fn find_lead_token(text: &str) -> Option<String> {
    let bytes = text.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        if b != b'L' && b != b'l' {
            continue;
        }
        if i + 4 > bytes.len() {
            break;
        }
        if bytes[i + 1] != b'0'
            || !(b'0'..=b'2').contains(&bytes[i + 2])
            || !bytes[i + 3].is_ascii_digit()
        {
            continue;
        }

        let preceded = i > 0 && bytes[i - 1].is_ascii_alphanumeric();
        let followed = i + 4 < bytes.len() && bytes[i + 4].is_ascii_alphanumeric();
        if preceded || followed {
            continue;
        }

        let token: String = text[i..i + 4].to_uppercase();
        return Some(token);
    }

    None
}

/// Incremental autocomplete over the catalog.
///
/// The query is the substring after the last lookup marker, matched
/// case-insensitively against identifier, borrower name, and stage. Leads
/// waiting on the relationship manager rank first; ties keep catalog order.
/// Without a marker in the input there is nothing to suggest.
pub fn suggest<'a>(input: &str, catalog: &'a LeadCatalog) -> Vec<&'a LeadRecord> {
    let Some(marker) = input.rfind(LOOKUP_MARKER) else {
        return Vec::new();
    };
    let query = input[marker + LOOKUP_MARKER.len_utf8()..].to_lowercase();

    let mut matches: Vec<&LeadRecord> = catalog
        .all()
        .iter()
        .filter(|lead| {
            query.is_empty()
                || lead.id.to_lowercase().contains(&query)
                || lead.name.to_lowercase().contains(&query)
                || lead.stage.to_lowercase().contains(&query)
        })
        .collect();

    matches.sort_by_key(|lead| !lead.needs_rm_action());
    matches.truncate(MAX_SUGGESTIONS);
    matches
}
