// Document storage for the vault
// Stored copies live under .formvault/documents/, organized by the source
// file's modification date. Duplicate content is detected by full hash and
// skipped.

use std::fs;
use std::path::{Path, PathBuf};
use chrono::{Datelike, Utc};
use rusqlite::Connection;
use walkdir::WalkDir;

use crate::constants::DOCUMENT_EXTENSIONS;
use crate::db::get_documents_path;
use crate::db::schema::{self, Document, NewDocument};
use crate::error::{FormVaultError, Result};
use crate::hash;

/// Outcome of one add run
#[derive(Debug, Default)]
pub struct AddReport {
    pub total_files: usize,
    pub added: usize,
    pub skipped: usize,
    pub failed: usize,
    pub documents: Vec<i64>,
}

/// A stored copy that no longer matches its recorded state
#[derive(Debug, Clone)]
pub struct VerifyIssue {
    pub id: i64,
    pub name: String,
    pub problem: String,
}

/// Discover all document files in a path (single file or directory walk)
pub fn discover_documents(source: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if source.is_file() {
        if is_document_file(source) {
            files.push(source.to_path_buf());
        }
    } else if source.is_dir() {
        for entry in WalkDir::new(source)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_document_file(path) {
                files.push(path.to_path_buf());
            }
        }
    }

    // Sort by path for consistent ordering
    files.sort();

    Ok(files)
}

/// Check if a file is an accepted document based on extension
pub fn is_document_file(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(e) => e.to_lowercase(),
        None => return false,
    };
    DOCUMENT_EXTENSIONS.contains(&ext.as_str())
}

/// Add all documents under a source path to the vault
pub fn add_documents(
    conn: &Connection,
    vault_root: &Path,
    source: &Path,
    doc_type: &str,
) -> Result<AddReport> {
    let files = discover_documents(source)?;

    let mut report = AddReport {
        total_files: files.len(),
        ..Default::default()
    };

    for file in &files {
        match add_one(conn, vault_root, file, doc_type) {
            Ok(Some(id)) => {
                report.added += 1;
                report.documents.push(id);
            }
            Ok(None) => report.skipped += 1,
            Err(e) => {
                log::warn!("Failed to add {}: {}", file.display(), e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

/// Add a single file. Returns None when the content is already stored.
fn add_one(
    conn: &Connection,
    vault_root: &Path,
    file: &Path,
    doc_type: &str,
) -> Result<Option<i64>> {
    let hash_full = hash::compute_full_hash(file)?;

    if let Some(existing) = schema::find_document_by_hash(conn, &hash_full)? {
        log::info!(
            "Skipping {}: content already stored as document {}",
            file.display(),
            existing.id
        );
        return Ok(None);
    }

    let size_bytes = fs::metadata(file)?.len() as i64;
    let rel_path = copy_into_vault(file, vault_root)?;

    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| FormVaultError::InvalidPath("No filename".to_string()))?
        .to_string();

    let id = schema::insert_document(conn, &NewDocument {
        uuid: uuid::Uuid::new_v4().to_string(),
        name,
        doc_type: doc_type.to_string(),
        path: rel_path.to_string_lossy().to_string(),
        size_bytes,
        hash_full: Some(hash_full),
    })?;

    Ok(Some(id))
}

/// Copy a file into the vault documents folder with date-based organization.
/// Returns the stored path relative to the vault root.
fn copy_into_vault(source: &Path, vault_root: &Path) -> Result<PathBuf> {
    let documents_dir = get_documents_path(vault_root);

    // Organize by file modified date
    let modified = fs::metadata(source).and_then(|m| m.modified()).ok();

    let date_folder = if let Some(modified) = modified {
        let datetime: chrono::DateTime<Utc> = modified.into();
        format!("{}/{:02}", datetime.year(), datetime.month())
    } else {
        "unknown".to_string()
    };

    let dest_dir = documents_dir.join(&date_folder);
    fs::create_dir_all(&dest_dir)?;

    let filename = source
        .file_name()
        .ok_or_else(|| FormVaultError::InvalidPath("No filename".to_string()))?;

    let mut dest_path = dest_dir.join(filename);

    // Handle filename conflicts
    if dest_path.exists() {
        dest_path = generate_unique_path(&dest_path)?;
    }

    fs::copy(source, &dest_path)?;

    // Preserve the source modification time on the stored copy
    if let Some(modified) = modified {
        let _ = filetime::set_file_mtime(&dest_path, filetime::FileTime::from_system_time(modified));
    }

    let relative = dest_path
        .strip_prefix(vault_root)
        .unwrap_or(&dest_path)
        .to_path_buf();

    Ok(relative)
}

/// Generate a unique path by appending a number
fn generate_unique_path(path: &Path) -> Result<PathBuf> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    for i in 1..10_000 {
        let candidate = if ext.is_empty() {
            parent.join(format!("{}_{}", stem, i))
        } else {
            parent.join(format!("{}_{}.{}", stem, i, ext))
        };
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(FormVaultError::InvalidPath(format!(
        "Could not find a free name for {}",
        path.display()
    )))
}

/// Delete a document row and its stored copy
pub fn remove_document(conn: &Connection, vault_root: &Path, id: i64) -> Result<Document> {
    let doc = schema::get_document(conn, id)?
        .ok_or(FormVaultError::DocumentNotFound(id))?;

    schema::delete_document(conn, id)?;

    let stored = vault_root.join(&doc.path);
    if stored.exists() {
        fs::remove_file(&stored)?;
    } else {
        log::warn!("Stored copy already missing: {}", stored.display());
    }

    Ok(doc)
}

/// Re-hash all stored copies and report missing or modified files
pub fn verify_documents(conn: &Connection, vault_root: &Path) -> Result<Vec<VerifyIssue>> {
    let total = schema::count_documents(conn)?;
    let docs = schema::list_documents(conn, total.max(1))?;

    let mut issues = Vec::new();
    for doc in docs {
        let stored = vault_root.join(&doc.path);

        if !stored.exists() {
            issues.push(VerifyIssue {
                id: doc.id,
                name: doc.name,
                problem: "stored copy missing".to_string(),
            });
            continue;
        }

        if let Some(ref expected) = doc.hash_full {
            if !hash::verify_full_hash(&stored, expected)? {
                issues.push(VerifyIssue {
                    id: doc.id,
                    name: doc.name,
                    problem: "content does not match recorded hash".to_string(),
                });
            }
        }
    }

    Ok(issues)
}
