// FormVault CLI binary

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod constants;
mod error;
mod db;
mod hash;
mod profile;
mod matcher;
mod detect;
mod documents;
mod history;
mod fill;

use constants::DOCUMENT_EXTENSIONS;
use db::{open_db, get_db_path, init_vault_folders, default_vault_root};
use db::schema;
use detect::{FieldDetector, StubDetector};
use error::FormVaultError;
use matcher::DetectedField;
use profile::ProfileField;

#[derive(Parser)]
#[command(name = "formvault")]
#[command(about = "FormVault - A personal data vault and form autofill assistant", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new vault
    Init {
        /// Vault root path
        path: PathBuf,
    },

    /// Store a personal data value
    Set {
        /// Field key (e.g. fullName, email, phone)
        field: String,
        /// Value to store
        value: String,
        /// Vault root (defaults to current directory)
        #[arg(short, long)]
        vault: Option<PathBuf>,
    },

    /// Remove a stored personal data value
    Unset {
        /// Field key
        field: String,
        /// Vault root (defaults to current directory)
        #[arg(short, long)]
        vault: Option<PathBuf>,
    },

    /// Show stored personal data
    Show {
        /// Vault root (defaults to current directory)
        #[arg(short, long)]
        vault: Option<PathBuf>,
    },

    /// Add documents (file or directory) to the vault
    AddDoc {
        /// Source path
        path: PathBuf,
        /// Document category
        #[arg(long, default_value = "general")]
        doc_type: String,
        /// Vault root (defaults to current directory)
        #[arg(short, long)]
        vault: Option<PathBuf>,
    },

    /// List stored documents
    Docs {
        /// Vault root (defaults to current directory)
        #[arg(short, long)]
        vault: Option<PathBuf>,
        /// Re-hash stored copies and report problems
        #[arg(long)]
        verify: bool,
        /// Maximum documents to show
        #[arg(long, default_value = "100")]
        limit: i64,
    },

    /// Remove a stored document
    RemoveDoc {
        /// Document ID
        id: i64,
        /// Vault root (defaults to current directory)
        #[arg(short, long)]
        vault: Option<PathBuf>,
    },

    /// Detect form fields and match them against stored data
    Fill {
        /// Screenshot handed to the field-detection provider
        #[arg(long, conflicts_with = "fields")]
        screenshot: Option<PathBuf>,
        /// JSON file with detected field descriptors
        #[arg(long)]
        fields: Option<PathBuf>,
        /// Website URL recorded with each fill event
        #[arg(long, default_value = "unknown")]
        url: String,
        /// Form title recorded with each fill event
        #[arg(long)]
        title: Option<String>,
        /// Match only; do not record history
        #[arg(long)]
        dry_run: bool,
        /// Vault root (defaults to current directory)
        #[arg(short, long)]
        vault: Option<PathBuf>,
    },

    /// Show fill history
    History {
        /// Vault root (defaults to current directory)
        #[arg(short, long)]
        vault: Option<PathBuf>,
        /// Maximum events to show
        #[arg(long, default_value = "50")]
        limit: i64,
        /// Filter by website, field name, or value
        #[arg(long)]
        search: Option<String>,
        /// Write matching events to a JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => cmd_init(path),
        Commands::Set { field, value, vault } => cmd_set(field, value, vault),
        Commands::Unset { field, vault } => cmd_unset(field, vault),
        Commands::Show { vault } => cmd_show(vault),
        Commands::AddDoc { path, doc_type, vault } => cmd_add_doc(path, doc_type, vault),
        Commands::Docs { vault, verify, limit } => cmd_docs(vault, verify, limit),
        Commands::RemoveDoc { id, vault } => cmd_remove_doc(id, vault),
        Commands::Fill { screenshot, fields, url, title, dry_run, vault } => {
            cmd_fill(screenshot, fields, url, title, dry_run, vault)
        }
        Commands::History { vault, limit, search, export } => {
            cmd_history(vault, limit, search, export)
        }
    }
}

fn cmd_init(path: PathBuf) -> Result<()> {
    let vault_root = path.canonicalize().unwrap_or(path.clone());

    // Check if vault already exists
    let db_path = get_db_path(&vault_root);
    if db_path.exists() {
        anyhow::bail!("Vault already exists at {}", vault_root.display());
    }

    // Create folder structure
    init_vault_folders(&vault_root)?;

    // Open/create database
    let _conn = open_db(&db_path)?;

    println!("Initialized vault at {}", vault_root.display());
    println!("Structure created:");
    println!("  .formvault/formvault.db  - Database");
    println!("  .formvault/documents/    - Stored documents");

    Ok(())
}

fn cmd_set(field: String, value: String, vault: Option<PathBuf>) -> Result<()> {
    let vault_root = resolve_vault_root(vault)?;
    let conn = open_db(&get_db_path(&vault_root))?;

    let field = parse_field(&field)?;
    schema::upsert_profile_value(&conn, field, &value)?;

    println!("Stored {} ({})", field.key(), field.label());
    Ok(())
}

fn cmd_unset(field: String, vault: Option<PathBuf>) -> Result<()> {
    let vault_root = resolve_vault_root(vault)?;
    let conn = open_db(&get_db_path(&vault_root))?;

    let field = parse_field(&field)?;
    if schema::delete_profile_value(&conn, field)? {
        println!("Removed {}", field.key());
    } else {
        println!("No value stored for {}", field.key());
    }

    Ok(())
}

fn cmd_show(vault: Option<PathBuf>) -> Result<()> {
    let vault_root = resolve_vault_root(vault)?;
    let conn = open_db(&get_db_path(&vault_root))?;

    let stored: std::collections::HashMap<ProfileField, String> =
        schema::list_profile_values(&conn)?
            .into_iter()
            .map(|v| (v.field, v.value))
            .collect();

    println!("Vault: {}", vault_root.display());
    println!();
    println!("{:<16}  {:<18}  {}", "Field", "Label", "Value");
    println!("{}", "-".repeat(60));

    for field in ProfileField::ALL {
        let value = stored.get(&field).map(String::as_str).unwrap_or("-");
        println!("{:<16}  {:<18}  {}", field.key(), field.label(), value);
    }

    Ok(())
}

fn cmd_add_doc(path: PathBuf, doc_type: String, vault: Option<PathBuf>) -> Result<()> {
    let vault_root = resolve_vault_root(vault)?;
    let conn = open_db(&get_db_path(&vault_root))?;

    let source = path.canonicalize()
        .map_err(|_| anyhow::anyhow!("Source path does not exist: {}", path.display()))?;

    println!("Adding documents from {}", source.display());

    let report = documents::add_documents(&conn, &vault_root, &source, &doc_type)?;

    println!();
    println!("Add complete:");
    println!("  Total files:  {}", report.total_files);
    println!("  Added:        {}", report.added);
    println!("  Skipped:      {}", report.skipped);
    println!("  Failed:       {}", report.failed);

    if report.total_files == 0 {
        println!();
        println!("No document files found. Accepted extensions: {}", DOCUMENT_EXTENSIONS.join(", "));
    }

    Ok(())
}

fn cmd_docs(vault: Option<PathBuf>, verify: bool, limit: i64) -> Result<()> {
    let vault_root = resolve_vault_root(vault)?;
    let conn = open_db(&get_db_path(&vault_root))?;

    let docs = schema::list_documents(&conn, limit)?;
    let total = schema::count_documents(&conn)?;

    println!("Documents: {} total", total);
    println!();

    if docs.is_empty() {
        println!("No documents stored. Use 'formvault add-doc <path>' to add one.");
        return Ok(());
    }

    println!("{:>5}  {:>10}  {:>10}  {:>12}  {}", "ID", "Type", "Size", "Added", "Name");
    println!("{}", "-".repeat(70));

    for doc in &docs {
        let added = doc.added_at.split(' ').next().unwrap_or(&doc.added_at);

        let name = if doc.name.len() > 30 {
            format!("{}...", &doc.name[..27])
        } else {
            doc.name.clone()
        };

        println!("{:>5}  {:>10}  {:>10}  {:>12}  {}",
            doc.id,
            doc.doc_type,
            format_size(doc.size_bytes),
            added,
            name
        );
    }

    if total > limit {
        println!();
        println!("Showing {} of {} documents. Use --limit to see more.", limit, total);
    }

    if verify {
        println!();
        let issues = documents::verify_documents(&conn, &vault_root)?;
        if issues.is_empty() {
            println!("All stored copies verified.");
        } else {
            println!("Problems found:");
            for issue in issues {
                println!("  #{} {}: {}", issue.id, issue.name, issue.problem);
            }
        }
    }

    Ok(())
}

fn cmd_remove_doc(id: i64, vault: Option<PathBuf>) -> Result<()> {
    let vault_root = resolve_vault_root(vault)?;
    let conn = open_db(&get_db_path(&vault_root))?;

    let doc = documents::remove_document(&conn, &vault_root, id)?;
    println!("Removed document #{} ({})", id, doc.name);

    Ok(())
}

fn cmd_fill(
    screenshot: Option<PathBuf>,
    fields: Option<PathBuf>,
    url: String,
    title: Option<String>,
    dry_run: bool,
    vault: Option<PathBuf>,
) -> Result<()> {
    let vault_root = resolve_vault_root(vault)?;
    let conn = open_db(&get_db_path(&vault_root))?;

    let detected: Vec<DetectedField> = if let Some(fields_path) = fields {
        let content = std::fs::read_to_string(&fields_path)
            .map_err(|_| anyhow::anyhow!("Cannot read fields file: {}", fields_path.display()))?;
        serde_json::from_str(&content)?
    } else if let Some(shot) = screenshot {
        StubDetector.detect_fields(&shot)?
    } else {
        anyhow::bail!("Provide a form via --screenshot <image> or --fields <json>");
    };

    println!("Detected {} fields", detected.len());

    let report = fill::run_fill(&conn, &detected, &fill::FillRequest {
        website_url: url,
        form_title: title,
        dry_run,
    })?;

    println!();
    if report.matches.is_empty() {
        println!("No fields matched the stored data.");
    } else {
        println!("{:<20}  {}", "Field", "Value");
        println!("{}", "-".repeat(50));
        for (field, value) in &report.matches {
            let shown = if value.is_empty() { "(blank)" } else { value.as_str() };
            println!("{:<20}  {}", field, shown);
        }
    }

    println!();
    println!("Matched {} of {} detected fields", report.matched, report.detected);

    if !report.unmatched_required.is_empty() {
        println!("Required fields without a match: {}", report.unmatched_required.join(", "));
    }

    if dry_run {
        println!("Dry run: no history recorded.");
    } else if report.recorded > 0 {
        println!("Recorded {} fill events", report.recorded);
    }

    Ok(())
}

fn cmd_history(
    vault: Option<PathBuf>,
    limit: i64,
    search: Option<String>,
    export: Option<PathBuf>,
) -> Result<()> {
    let vault_root = resolve_vault_root(vault)?;
    let conn = open_db(&get_db_path(&vault_root))?;

    if let Some(dest) = export {
        let count = history::export_json(&conn, &dest, search.as_deref(), limit)?;
        println!("Exported {} events to {}", count, dest.display());
        return Ok(());
    }

    let events = history::query(&conn, search.as_deref(), limit)?;
    let total = schema::count_fill_events(&conn)?;

    if events.is_empty() {
        println!("No fill history found.");
        return Ok(());
    }

    println!("{:>5}  {:>12}  {:<28}  {:<16}  {}", "ID", "Date", "Website", "Field", "Value");
    println!("{}", "-".repeat(90));

    for event in &events {
        let date = event.date_filled.split(' ').next().unwrap_or(&event.date_filled);

        let website = if event.website_url.len() > 28 {
            format!("{}...", &event.website_url[..25])
        } else {
            event.website_url.clone()
        };

        let value = if event.field_value.len() > 20 {
            format!("{}...", &event.field_value[..17])
        } else {
            event.field_value.clone()
        };

        println!("{:>5}  {:>12}  {:<28}  {:<16}  {}",
            event.id,
            date,
            website,
            event.field_name,
            value
        );
    }

    if search.is_none() && total > limit {
        println!();
        println!("Showing {} of {} events. Use --limit to see more.", events.len(), total);
    }

    Ok(())
}

// --- Helper Functions ---

fn resolve_vault_root(vault: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = vault {
        let path = path.canonicalize().unwrap_or(path);
        if !get_db_path(&path).exists() {
            return Err(FormVaultError::VaultNotFound(format!(
                "{}. Use 'formvault init <path>' to create one.",
                path.display()
            ))
            .into());
        }
        return Ok(path);
    }

    // Current directory first, then the home-directory default
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if get_db_path(&cwd).exists() {
        return Ok(cwd);
    }

    if let Some(home_vault) = default_vault_root() {
        if get_db_path(&home_vault).exists() {
            return Ok(home_vault);
        }
    }

    Err(FormVaultError::VaultNotFound(
        "no vault in the current directory or home. Use 'formvault init <path>' to create one."
            .to_string(),
    )
    .into())
}

fn parse_field(key: &str) -> Result<ProfileField> {
    match ProfileField::from_key(key) {
        Some(field) => Ok(field),
        None => {
            let known: Vec<&str> = ProfileField::ALL.iter().map(|f| f.key()).collect();
            Err(FormVaultError::UnknownField(format!(
                "{} (known fields: {})",
                key,
                known.join(", ")
            ))
            .into())
        }
    }
}

fn format_size(bytes: i64) -> String {
    const KB: i64 = 1024;
    const MB: i64 = KB * 1024;
    const GB: i64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
