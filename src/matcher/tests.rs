use super::*;

fn field(name: &str, field_type: &str, label: Option<&str>, required: bool) -> DetectedField {
    DetectedField {
        field_name: name.to_string(),
        field_type: field_type.to_string(),
        label: label.map(|l| l.to_string()),
        required,
    }
}

fn sample_data() -> UserData {
    let mut data = UserData::new();
    data.set(ProfileField::FullName, "Jane Doe");
    data.set(ProfileField::Email, "jane@example.com");
    data.set(ProfileField::Phone, "555-1234");
    data.set(ProfileField::Address, "1 Main St");
    data.set(ProfileField::DateOfBirth, "1990-01-01");
    data
}

// ---------------------------------------------------------------
// Direct and label matches
// ---------------------------------------------------------------

#[test]
fn test_direct_match_is_case_insensitive() {
    let data = sample_data();

    let result = match_fields(&[field("Email", "email", None, true)], &data);
    assert_eq!(result.get("email").map(String::as_str), Some("jane@example.com"));

    // Result keys are the lowercased field name, never the original case
    assert!(result.get("Email").is_none());

    let result = match_fields(&[field("FULLNAME", "text", None, true)], &data);
    assert_eq!(result.get("fullname").map(String::as_str), Some("Jane Doe"));
}

#[test]
fn test_label_match_when_name_misses() {
    let data = sample_data();

    // "input_3" is not a stored key, but the label is
    let result = match_fields(&[field("input_3", "tel", Some("phone"), false)], &data);
    assert_eq!(result.get("input_3").map(String::as_str), Some("555-1234"));
}

#[test]
fn test_direct_match_wins_over_fallback() {
    let mut data = sample_data();
    data.set(ProfileField::Email, "direct@example.com");

    // "email" is both a stored key and a trigger token; the key wins
    let result = match_fields(&[field("email", "email", Some("Full Name"), true)], &data);
    assert_eq!(result.get("email").map(String::as_str), Some("direct@example.com"));
}

// ---------------------------------------------------------------
// Keyword fallback
// ---------------------------------------------------------------

#[test]
fn test_fallback_matches_name_substring() {
    let data = sample_data();

    let result = match_fields(&[field("contactPhone", "tel", None, false)], &data);
    assert_eq!(result.get("contactphone").map(String::as_str), Some("555-1234"));
}

#[test]
fn test_fallback_matches_label_substring() {
    let data = sample_data();

    let result = match_fields(&[field("field_7", "date", Some("Date of Birth"), true)], &data);
    assert_eq!(result.get("field_7").map(String::as_str), Some("1990-01-01"));
}

#[test]
fn test_trigger_order_phone_beats_birth() {
    let data = sample_data();

    // "birthday_mobile" carries both a phone trigger (mobile) and a birth
    // trigger (birth); the phone rule is evaluated first and must win.
    let result = match_fields(&[field("birthday_mobile", "text", None, false)], &data);
    assert_eq!(result.get("birthday_mobile").map(String::as_str), Some("555-1234"));
}

#[test]
fn test_trigger_order_email_beats_address() {
    let data = sample_data();

    // "email_address" carries both mail and address triggers; mail is first
    let result = match_fields(&[field("email_address", "email", None, true)], &data);
    assert_eq!(result.get("email_address").map(String::as_str), Some("jane@example.com"));
}

#[test]
fn test_rule_hit_with_blank_source_writes_empty_string() {
    // "nickname" contains "name" so the rule fires, but no fullName is
    // stored. The entry is still written, as an empty string.
    let result = match_fields(&[field("nickname", "text", None, false)], &UserData::new());
    assert_eq!(result.get("nickname").map(String::as_str), Some(""));
}

#[test]
fn test_unmatched_field_is_omitted() {
    let data = sample_data();

    let result = match_fields(&[field("favoriteColor", "text", None, false)], &data);
    assert!(result.is_empty());
}

// ---------------------------------------------------------------
// Shape and determinism
// ---------------------------------------------------------------

#[test]
fn test_empty_inputs() {
    assert!(match_fields(&[], &sample_data()).is_empty());

    // Empty user data: direct/label lookups miss, triggers still write
    let result = match_fields(&[field("email", "email", None, true)], &UserData::new());
    assert_eq!(result.get("email").map(String::as_str), Some(""));
}

#[test]
fn test_duplicate_field_names_last_write_wins() {
    let data = sample_data();

    let fields = [
        field("Contact", "text", Some("email"), false),
        field("CONTACT", "text", Some("phone"), false),
    ];

    let result = match_fields(&fields, &data);
    assert_eq!(result.len(), 1);
    assert_eq!(result.get("contact").map(String::as_str), Some("555-1234"));
}

#[test]
fn test_matching_is_deterministic() {
    let data = sample_data();
    let fields = [
        field("fullName", "text", Some("Full Name"), true),
        field("email", "email", Some("Email Address"), true),
        field("phone", "tel", Some("Phone Number"), false),
        field("favoriteColor", "text", None, false),
    ];

    let first = match_fields(&fields, &data);
    let second = match_fields(&fields, &data);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_detected_field_wire_shape() {
    let json = r#"{"fieldName":"email","fieldType":"email","label":"Email Address","required":true}"#;
    let parsed: DetectedField = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.field_name, "email");
    assert_eq!(parsed.label.as_deref(), Some("Email Address"));
    assert!(parsed.required);

    // label is optional on the wire
    let json = r#"{"fieldName":"x","fieldType":"text","required":false}"#;
    let parsed: DetectedField = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.label, None);
}
