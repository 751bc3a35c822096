// Personal-data vocabulary and typed value store

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// The closed set of personal-data fields the vault stores.
/// Keys follow the original camelCase vocabulary on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    FullName,
    FatherName,
    MotherName,
    DateOfBirth,
    Gender,
    Email,
    Phone,
    Address,
    City,
    State,
    Country,
    PostalCode,
    School,
    College,
    Degree,
    GraduationYear,
    Gpa,
}

impl ProfileField {
    pub const ALL: [ProfileField; 17] = [
        ProfileField::FullName,
        ProfileField::FatherName,
        ProfileField::MotherName,
        ProfileField::DateOfBirth,
        ProfileField::Gender,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Address,
        ProfileField::City,
        ProfileField::State,
        ProfileField::Country,
        ProfileField::PostalCode,
        ProfileField::School,
        ProfileField::College,
        ProfileField::Degree,
        ProfileField::GraduationYear,
        ProfileField::Gpa,
    ];

    /// Canonical storage key
    pub fn key(&self) -> &'static str {
        match self {
            ProfileField::FullName => "fullName",
            ProfileField::FatherName => "fatherName",
            ProfileField::MotherName => "motherName",
            ProfileField::DateOfBirth => "dateOfBirth",
            ProfileField::Gender => "gender",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::Address => "address",
            ProfileField::City => "city",
            ProfileField::State => "state",
            ProfileField::Country => "country",
            ProfileField::PostalCode => "postalCode",
            ProfileField::School => "school",
            ProfileField::College => "college",
            ProfileField::Degree => "degree",
            ProfileField::GraduationYear => "graduationYear",
            ProfileField::Gpa => "gpa",
        }
    }

    /// Human-readable caption for display
    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::FullName => "Full Name",
            ProfileField::FatherName => "Father's Name",
            ProfileField::MotherName => "Mother's Name",
            ProfileField::DateOfBirth => "Date of Birth",
            ProfileField::Gender => "Gender",
            ProfileField::Email => "Email Address",
            ProfileField::Phone => "Phone Number",
            ProfileField::Address => "Address",
            ProfileField::City => "City",
            ProfileField::State => "State",
            ProfileField::Country => "Country",
            ProfileField::PostalCode => "Postal Code",
            ProfileField::School => "School",
            ProfileField::College => "College",
            ProfileField::Degree => "Degree",
            ProfileField::GraduationYear => "Graduation Year",
            ProfileField::Gpa => "GPA",
        }
    }

    /// Resolve a key case-insensitively ("fullname" and "FullName" both hit FullName)
    pub fn from_key(key: &str) -> Option<ProfileField> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(key))
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Snapshot of stored personal data.
/// A blank value behaves as absent: `get` and `lookup` only report a field
/// present when it holds a non-empty string. This matches how the matcher's
/// direct and label lookups treat stored-but-empty entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserData {
    values: HashMap<ProfileField, String>,
}

impl UserData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Stored value for a field, or None when missing or blank
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.values
            .get(&field)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Lookup by key name, case-insensitive. Unknown keys resolve to None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        ProfileField::from_key(key).and_then(|field| self.get(field))
    }

    /// True when no field holds a non-empty value
    pub fn is_empty(&self) -> bool {
        !ProfileField::ALL.iter().any(|f| self.get(*f).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_is_case_insensitive() {
        assert_eq!(ProfileField::from_key("fullname"), Some(ProfileField::FullName));
        assert_eq!(ProfileField::from_key("FULLNAME"), Some(ProfileField::FullName));
        assert_eq!(ProfileField::from_key("dateofbirth"), Some(ProfileField::DateOfBirth));
        assert_eq!(ProfileField::from_key("favoriteColor"), None);
        assert_eq!(ProfileField::from_key(""), None);
    }

    #[test]
    fn test_blank_values_behave_as_absent() {
        let mut data = UserData::new();
        data.set(ProfileField::Email, "");
        assert_eq!(data.get(ProfileField::Email), None);
        assert_eq!(data.lookup("email"), None);
        assert!(data.is_empty());

        data.set(ProfileField::Email, "a@b.com");
        assert_eq!(data.get(ProfileField::Email), Some("a@b.com"));
        assert_eq!(data.lookup("EMAIL"), Some("a@b.com"));
        assert!(!data.is_empty());
    }

    #[test]
    fn test_serde_uses_camel_case_keys() {
        let mut data = UserData::new();
        data.set(ProfileField::PostalCode, "12345");
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("postalCode"));
    }
}
