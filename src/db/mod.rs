// Database module

pub mod migrations;
pub mod schema;

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use anyhow::Result;

use crate::constants::{VAULT_FOLDER, DB_FILENAME, DOCUMENTS_FOLDER};

/// Open or create a database at the given path
pub fn open_db(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;

    // Enable foreign keys (must be done per connection)
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // Enable WAL mode for better concurrency
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;

    // Run migrations
    migrations::run_migrations(&conn)?;

    Ok(conn)
}

/// Get the database path for a vault root
pub fn get_db_path(vault_root: &Path) -> PathBuf {
    vault_root.join(VAULT_FOLDER).join(DB_FILENAME)
}

/// Get the .formvault folder path for a vault root
pub fn get_vault_path(vault_root: &Path) -> PathBuf {
    vault_root.join(VAULT_FOLDER)
}

/// Get the stored-documents folder path for a vault root
pub fn get_documents_path(vault_root: &Path) -> PathBuf {
    vault_root.join(VAULT_FOLDER).join(DOCUMENTS_FOLDER)
}

/// Initialize vault folder structure
pub fn init_vault_folders(vault_root: &Path) -> Result<()> {
    let vault = vault_root.join(VAULT_FOLDER);
    std::fs::create_dir_all(&vault)?;
    std::fs::create_dir_all(vault.join(DOCUMENTS_FOLDER))?;

    Ok(())
}

/// Default vault location in the user's home directory: ~/FormVault
pub fn default_vault_root() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join("FormVault"))
}
