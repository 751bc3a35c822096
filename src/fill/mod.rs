// Autofill orchestration: detect -> load -> match -> record
// The matcher itself is pure; everything with I/O lives here.

use rusqlite::Connection;
use serde::Serialize;

use crate::db::schema::{self, NewFillEvent};
use crate::error::Result;
use crate::history;
use crate::matcher::{self, DetectedField, FieldMatches};

/// Caller context for one autofill run
#[derive(Debug, Clone)]
pub struct FillRequest {
    pub website_url: String,
    pub form_title: Option<String>,
    /// Match only; do not write history
    pub dry_run: bool,
}

/// Result of one autofill run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillReport {
    pub detected: usize,
    pub matched: usize,
    pub recorded: usize,
    pub matches: FieldMatches,
    /// Required detected fields that ended up without a match entry
    pub unmatched_required: Vec<String>,
}

/// Match detected fields against the stored profile and record one history
/// row per matched field (unless dry-run).
pub fn run_fill(
    conn: &Connection,
    fields: &[DetectedField],
    request: &FillRequest,
) -> Result<FillReport> {
    let data = schema::load_user_data(conn)?;
    if data.is_empty() {
        log::warn!("No personal data stored; only keyword rules can produce entries");
    }

    let matches = matcher::match_fields(fields, &data);

    let mut recorded = 0;
    if !request.dry_run {
        for field in fields {
            let key = field.field_name.to_lowercase();
            if let Some(value) = matches.get(&key) {
                history::record_fill_event(conn, &NewFillEvent {
                    website_url: request.website_url.clone(),
                    field_name: key,
                    field_value: value.clone(),
                    field_type: field.field_type.clone(),
                    form_title: request.form_title.clone(),
                })?;
                recorded += 1;
            }
        }
    }

    let unmatched_required = fields
        .iter()
        .filter(|f| f.required && !matches.contains_key(&f.field_name.to_lowercase()))
        .map(|f| f.field_name.clone())
        .collect();

    Ok(FillReport {
        detected: fields.len(),
        matched: matches.len(),
        recorded,
        matches,
        unmatched_required,
    })
}
