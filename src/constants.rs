// FormVault Constants
// Shared values for the vault layout, document store, and hashing.

// Paths
pub const VAULT_FOLDER: &str = ".formvault";
pub const DB_FILENAME: &str = "formvault.db";
pub const DOCUMENTS_FOLDER: &str = "documents";

// Hashing
pub const HASH_ALGORITHM: &str = "blake3";
pub const HASH_CHUNK_SIZE: usize = 1_048_576; // 1MB

// Document extensions (files accepted into the vault)
pub const DOCUMENT_EXTENSIONS: [&str; 10] = [
    "pdf", "jpg", "jpeg", "png", "gif", "bmp", "tiff", "doc", "docx", "txt",
];
