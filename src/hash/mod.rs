// Hashing module using BLAKE3

use std::fs::File;
use std::io::Read;
use std::path::Path;
use crate::constants::{HASH_ALGORITHM, HASH_CHUNK_SIZE};
use crate::error::{FormVaultError, Result};

/// Compute full BLAKE3 hash of a file
/// Format: "blake3:full:<hash>"
pub fn compute_full_hash(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .map_err(|e| FormVaultError::Hash(format!("Failed to open file: {}", e)))?;

    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let read = file
            .read(&mut buffer)
            .map_err(|e| FormVaultError::Hash(format!("Failed to read file: {}", e)))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{}:full:{}", HASH_ALGORITHM, hasher.finalize().to_hex()))
}

/// Check a stored digest against the file's current contents
pub fn verify_full_hash(path: &Path, stored: &str) -> Result<bool> {
    let current = compute_full_hash(path)?;
    Ok(current == stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_full_hash_is_stable_and_prefixed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.txt");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"vault content").unwrap();

        let first = compute_full_hash(&path).unwrap();
        let second = compute_full_hash(&path).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("blake3:full:"));
    }

    #[test]
    fn test_verify_detects_modification() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.txt");
        std::fs::write(&path, b"original").unwrap();

        let stored = compute_full_hash(&path).unwrap();
        assert!(verify_full_hash(&path, &stored).unwrap());

        std::fs::write(&path, b"tampered").unwrap();
        assert!(!verify_full_hash(&path, &stored).unwrap());
    }

    #[test]
    fn test_missing_file_is_a_hash_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.pdf");
        assert!(matches!(
            compute_full_hash(&missing),
            Err(FormVaultError::Hash(_))
        ));
    }
}
