// Form-field matching engine
// Resolution order per detected field, first hit wins:
// 1. Direct key match against the stored vocabulary (case-insensitive)
// 2. Label match, same lookup with the field's caption
// 3. Keyword fallback: fixed, ordered trigger tokens mapped to canonical fields
// 4. No hit: the field is left out of the result

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::profile::{ProfileField, UserData};

/// One input element found during a page/form scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedField {
    pub field_name: String,
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub required: bool,
}

/// Mapping from lowercased field name to the value to fill
pub type FieldMatches = BTreeMap<String, String>;

/// Keyword-fallback triggers, evaluated in this order. A token hit on
/// either the field name or the label selects the paired canonical field;
/// evaluation stops at the first rule that hits.
const TRIGGER_RULES: &[(&[&str], ProfileField)] = &[
    (&["name"], ProfileField::FullName),
    (&["email", "mail"], ProfileField::Email),
    (&["phone", "mobile"], ProfileField::Phone),
    (&["address"], ProfileField::Address),
    (&["birth", "dob"], ProfileField::DateOfBirth),
];

/// Match detected form fields against stored personal data.
///
/// Pure function of its two inputs: no I/O, no mutation, deterministic.
/// Result entries are keyed by the lowercased field name; duplicate names
/// collapse to one entry, last in input order. Unmatched fields are omitted
/// from the result, except that a trigger-rule hit always writes an entry,
/// empty when the canonical source field holds no value.
pub fn match_fields(detected: &[DetectedField], data: &UserData) -> FieldMatches {
    let mut matches = FieldMatches::new();

    for field in detected {
        let key = field.field_name.to_lowercase();
        let label_key = field
            .label
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        if let Some(value) = data.lookup(&key) {
            matches.insert(key, value.to_string());
        } else if let Some(value) = data.lookup(&label_key) {
            matches.insert(key, value.to_string());
        } else if let Some(source) = keyword_fallback(&key, &label_key) {
            // Rule hit always writes, even when the source field is blank
            let value = data.get(source).unwrap_or_default();
            matches.insert(key, value.to_string());
        }
    }

    matches
}

/// First trigger rule whose tokens appear in the field name or label
fn keyword_fallback(key: &str, label_key: &str) -> Option<ProfileField> {
    for (tokens, source) in TRIGGER_RULES {
        if tokens.iter().any(|t| key.contains(t) || label_key.contains(t)) {
            return Some(*source);
        }
    }
    None
}

#[cfg(test)]
mod tests;
