// Fill-event audit log
// One record per filled field: website, field name/value/type, form title.

use std::fs;
use std::path::Path;
use rusqlite::Connection;

use crate::db::schema::{self, FillEvent, NewFillEvent};
use crate::error::Result;

/// Record one successful fill event
pub fn record_fill_event(conn: &Connection, event: &NewFillEvent) -> Result<i64> {
    let id = schema::insert_fill_event(conn, event)?;
    log::debug!(
        "Recorded fill event {} for field '{}' on {}",
        id,
        event.field_name,
        event.website_url
    );
    Ok(id)
}

/// Fetch history, newest first. With a search term, matches website, field
/// name, and field value case-insensitively.
pub fn query(conn: &Connection, search: Option<&str>, limit: i64) -> Result<Vec<FillEvent>> {
    match search {
        Some(term) if !term.is_empty() => schema::search_fill_events(conn, term, limit),
        _ => schema::list_fill_events(conn, limit),
    }
}

/// Export history to a JSON file, newest first. Returns the event count.
pub fn export_json(conn: &Connection, dest: &Path, search: Option<&str>, limit: i64) -> Result<usize> {
    let events = query(conn, search, limit)?;
    let json = serde_json::to_string_pretty(&events)?;
    fs::write(dest, json)?;
    Ok(events.len())
}
