// Field-detection provider boundary
//
// Real vision/NLP detection is out of scope. The shipped detector returns
// a fixed set of common form fields; the trait is the seam a real provider
// plugs into.

use std::path::Path;
use crate::error::{FormVaultError, Result};
use crate::matcher::DetectedField;

/// Supplies detected form fields for a page screenshot
pub trait FieldDetector {
    /// Produce zero or more detected field descriptors
    fn detect_fields(&self, screenshot: &Path) -> Result<Vec<DetectedField>>;
}

/// Stub detector returning the fixed demo fields
pub struct StubDetector;

impl FieldDetector for StubDetector {
    fn detect_fields(&self, screenshot: &Path) -> Result<Vec<DetectedField>> {
        let meta = std::fs::metadata(screenshot)
            .map_err(|_| FormVaultError::FileNotFound(screenshot.display().to_string()))?;

        if meta.len() == 0 {
            return Err(FormVaultError::Detect(format!(
                "Screenshot is empty: {}",
                screenshot.display()
            )));
        }

        log::debug!("Stub detection for {}", screenshot.display());
        Ok(demo_fields())
    }
}

fn demo_fields() -> Vec<DetectedField> {
    fn field(name: &str, field_type: &str, label: &str, required: bool) -> DetectedField {
        DetectedField {
            field_name: name.to_string(),
            field_type: field_type.to_string(),
            label: Some(label.to_string()),
            required,
        }
    }

    vec![
        field("fullName", "text", "Full Name", true),
        field("email", "email", "Email Address", true),
        field("phone", "tel", "Phone Number", false),
        field("dateOfBirth", "date", "Date of Birth", true),
        field("address", "text", "Address", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stub_returns_fixed_fields() {
        let tmp = TempDir::new().unwrap();
        let shot = tmp.path().join("form.png");
        std::fs::write(&shot, b"not really a png").unwrap();

        let fields = StubDetector.detect_fields(&shot).unwrap();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0].field_name, "fullName");
        assert_eq!(fields[2].field_type, "tel");
        assert!(!fields[2].required);
    }

    #[test]
    fn test_missing_screenshot_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let result = StubDetector.detect_fields(&tmp.path().join("missing.png"));
        assert!(matches!(result, Err(FormVaultError::FileNotFound(_))));
    }

    #[test]
    fn test_empty_screenshot_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let shot = tmp.path().join("empty.png");
        std::fs::write(&shot, b"").unwrap();

        let result = StubDetector.detect_fields(&shot);
        assert!(matches!(result, Err(FormVaultError::Detect(_))));
    }
}
