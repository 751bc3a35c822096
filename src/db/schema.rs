// Database schema types and query helpers

use rusqlite::{Connection, params, OptionalExtension};
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::profile::{ProfileField, UserData};

// ----- Profile -----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileValue {
    pub field: ProfileField,
    pub value: String,
    pub updated_at: String,
}

pub fn upsert_profile_value(conn: &Connection, field: ProfileField, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO profile_fields (field, value, updated_at) VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(field) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
        params![field.key(), value],
    )?;
    Ok(())
}

pub fn get_profile_value(conn: &Connection, field: ProfileField) -> Result<Option<String>> {
    let result = conn
        .query_row(
            "SELECT value FROM profile_fields WHERE field = ?1",
            params![field.key()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(result)
}

pub fn delete_profile_value(conn: &Connection, field: ProfileField) -> Result<bool> {
    let affected = conn.execute(
        "DELETE FROM profile_fields WHERE field = ?1",
        params![field.key()],
    )?;
    Ok(affected > 0)
}

pub fn list_profile_values(conn: &Connection) -> Result<Vec<ProfileValue>> {
    let mut stmt = conn.prepare(
        "SELECT field, value, updated_at FROM profile_fields ORDER BY field",
    )?;

    let rows = stmt
        .query_map([], |row| {
            let key: String = row.get(0)?;
            let value: String = row.get(1)?;
            let updated_at: String = row.get(2)?;
            Ok((key, value, updated_at))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut values = Vec::new();
    for (key, value, updated_at) in rows {
        match ProfileField::from_key(&key) {
            Some(field) => values.push(ProfileValue { field, value, updated_at }),
            None => log::warn!("Skipping unknown profile field in database: {}", key),
        }
    }

    Ok(values)
}

/// Load the full personal-data snapshot used by the matcher
pub fn load_user_data(conn: &Connection) -> Result<UserData> {
    let mut data = UserData::new();
    for entry in list_profile_values(conn)? {
        data.set(entry.field, entry.value);
    }
    Ok(data)
}

// ----- Documents -----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub uuid: String,
    pub name: String,
    pub doc_type: String,
    pub path: String,
    pub size_bytes: i64,
    pub hash_full: Option<String>,
    pub added_at: String,
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub uuid: String,
    pub name: String,
    pub doc_type: String,
    pub path: String,
    pub size_bytes: i64,
    pub hash_full: Option<String>,
}

pub fn insert_document(conn: &Connection, doc: &NewDocument) -> Result<i64> {
    conn.execute(
        "INSERT INTO documents (uuid, name, doc_type, path, size_bytes, hash_full)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            doc.uuid,
            doc.name,
            doc.doc_type,
            doc.path,
            doc.size_bytes,
            doc.hash_full,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn document_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        uuid: row.get(1)?,
        name: row.get(2)?,
        doc_type: row.get(3)?,
        path: row.get(4)?,
        size_bytes: row.get(5)?,
        hash_full: row.get(6)?,
        added_at: row.get(7)?,
    })
}

pub fn get_document(conn: &Connection, id: i64) -> Result<Option<Document>> {
    let result = conn
        .query_row(
            "SELECT id, uuid, name, doc_type, path, size_bytes, hash_full, added_at
             FROM documents WHERE id = ?1",
            params![id],
            document_from_row,
        )
        .optional()?;
    Ok(result)
}

pub fn find_document_by_hash(conn: &Connection, hash_full: &str) -> Result<Option<Document>> {
    let result = conn
        .query_row(
            "SELECT id, uuid, name, doc_type, path, size_bytes, hash_full, added_at
             FROM documents WHERE hash_full = ?1",
            params![hash_full],
            document_from_row,
        )
        .optional()?;
    Ok(result)
}

pub fn list_documents(conn: &Connection, limit: i64) -> Result<Vec<Document>> {
    let mut stmt = conn.prepare(
        "SELECT id, uuid, name, doc_type, path, size_bytes, hash_full, added_at
         FROM documents ORDER BY added_at DESC, id DESC LIMIT ?1",
    )?;

    let docs = stmt
        .query_map(params![limit], document_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(docs)
}

pub fn count_documents(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
    Ok(count)
}

pub fn delete_document(conn: &Connection, id: i64) -> Result<bool> {
    let affected = conn.execute("DELETE FROM documents WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

// ----- Form history -----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillEvent {
    pub id: i64,
    pub website_url: String,
    pub field_name: String,
    pub field_value: String,
    pub field_type: String,
    pub form_title: Option<String>,
    pub date_filled: String,
}

#[derive(Debug, Clone)]
pub struct NewFillEvent {
    pub website_url: String,
    pub field_name: String,
    pub field_value: String,
    pub field_type: String,
    pub form_title: Option<String>,
}

pub fn insert_fill_event(conn: &Connection, event: &NewFillEvent) -> Result<i64> {
    conn.execute(
        "INSERT INTO form_history (website_url, field_name, field_value, field_type, form_title)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            event.website_url,
            event.field_name,
            event.field_value,
            event.field_type,
            event.form_title,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn fill_event_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FillEvent> {
    Ok(FillEvent {
        id: row.get(0)?,
        website_url: row.get(1)?,
        field_name: row.get(2)?,
        field_value: row.get(3)?,
        field_type: row.get(4)?,
        form_title: row.get(5)?,
        date_filled: row.get(6)?,
    })
}

pub fn list_fill_events(conn: &Connection, limit: i64) -> Result<Vec<FillEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, website_url, field_name, field_value, field_type, form_title, date_filled
         FROM form_history ORDER BY date_filled DESC, id DESC LIMIT ?1",
    )?;

    let events = stmt
        .query_map(params![limit], fill_event_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(events)
}

/// Case-insensitive search over website, field name, and field value
pub fn search_fill_events(conn: &Connection, query: &str, limit: i64) -> Result<Vec<FillEvent>> {
    let pattern = format!("%{}%", query.to_lowercase());

    let mut stmt = conn.prepare(
        "SELECT id, website_url, field_name, field_value, field_type, form_title, date_filled
         FROM form_history
         WHERE lower(website_url) LIKE ?1
            OR lower(field_name) LIKE ?1
            OR lower(field_value) LIKE ?1
         ORDER BY date_filled DESC, id DESC LIMIT ?2",
    )?;

    let events = stmt
        .query_map(params![pattern, limit], fill_event_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(events)
}

pub fn count_fill_events(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM form_history", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_profile_upsert_overwrites() {
        let conn = setup_test_db();

        upsert_profile_value(&conn, ProfileField::Email, "old@example.com").unwrap();
        upsert_profile_value(&conn, ProfileField::Email, "new@example.com").unwrap();

        let value = get_profile_value(&conn, ProfileField::Email).unwrap();
        assert_eq!(value.as_deref(), Some("new@example.com"));

        let values = list_profile_values(&conn).unwrap();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_load_user_data_round_trip() {
        let conn = setup_test_db();

        upsert_profile_value(&conn, ProfileField::FullName, "Jane Doe").unwrap();
        upsert_profile_value(&conn, ProfileField::Phone, "555-1234").unwrap();

        let data = load_user_data(&conn).unwrap();
        assert_eq!(data.get(ProfileField::FullName), Some("Jane Doe"));
        assert_eq!(data.get(ProfileField::Phone), Some("555-1234"));
        assert_eq!(data.get(ProfileField::Email), None);
    }

    #[test]
    fn test_delete_profile_value() {
        let conn = setup_test_db();

        upsert_profile_value(&conn, ProfileField::City, "Springfield").unwrap();
        assert!(delete_profile_value(&conn, ProfileField::City).unwrap());
        assert!(!delete_profile_value(&conn, ProfileField::City).unwrap());
        assert_eq!(get_profile_value(&conn, ProfileField::City).unwrap(), None);
    }

    #[test]
    fn test_document_insert_and_hash_lookup() {
        let conn = setup_test_db();

        let doc = NewDocument {
            uuid: "u-1".to_string(),
            name: "passport.pdf".to_string(),
            doc_type: "identity".to_string(),
            path: ".formvault/documents/passport.pdf".to_string(),
            size_bytes: 1024,
            hash_full: Some("blake3:full:abc".to_string()),
        };

        let id = insert_document(&conn, &doc).unwrap();
        let found = find_document_by_hash(&conn, "blake3:full:abc").unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.name, "passport.pdf");

        assert!(find_document_by_hash(&conn, "blake3:full:other").unwrap().is_none());

        assert!(delete_document(&conn, id).unwrap());
        assert_eq!(count_documents(&conn).unwrap(), 0);
    }

    #[test]
    fn test_fill_event_search_is_case_insensitive() {
        let conn = setup_test_db();

        insert_fill_event(&conn, &NewFillEvent {
            website_url: "https://jobs.example.com/apply".to_string(),
            field_name: "email".to_string(),
            field_value: "jane@example.com".to_string(),
            field_type: "email".to_string(),
            form_title: Some("Job Application".to_string()),
        }).unwrap();

        insert_fill_event(&conn, &NewFillEvent {
            website_url: "https://other.example.com".to_string(),
            field_name: "phone".to_string(),
            field_value: "555-1234".to_string(),
            field_type: "tel".to_string(),
            form_title: None,
        }).unwrap();

        let hits = search_fill_events(&conn, "JOBS", 50).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].field_name, "email");

        let hits = search_fill_events(&conn, "555", 50).unwrap();
        assert_eq!(hits.len(), 1);

        assert_eq!(count_fill_events(&conn).unwrap(), 2);
    }
}
