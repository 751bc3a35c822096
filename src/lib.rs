// FormVault - Library Entry Point

pub mod constants;
pub mod error;
pub mod db;
pub mod hash;
pub mod profile;
pub mod matcher;
pub mod detect;
pub mod documents;
pub mod history;
pub mod fill;

pub use error::{FormVaultError, Result};
pub use matcher::{match_fields, DetectedField, FieldMatches};
pub use profile::{ProfileField, UserData};
