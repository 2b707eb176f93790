//! Integration tests for named character reference lookup.

use wren_html::tokenizer::named_character_references::{
    entity_count, is_base_named_entity, is_named_entity, lookup_entity,
};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("lt"), Some("<"));
    assert_eq!(lookup_entity("gt"), Some(">"));
    assert_eq!(lookup_entity("quot"), Some("\""));
    assert_eq!(lookup_entity("nbsp"), Some("\u{00A0}"));
    assert_eq!(lookup_entity("hellip"), Some("\u{2026}"));
}

#[test]
fn test_lookup_two_code_point_entity() {
    assert_eq!(lookup_entity("NotEqualTilde"), Some("\u{2242}\u{0338}"));
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert!(is_named_entity("Aacute"));
    assert!(is_named_entity("aacute"));
    assert_ne!(lookup_entity("Aacute"), lookup_entity("aacute"));
    assert!(!is_named_entity("AMp"));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity"), None);
    assert_eq!(lookup_entity(""), None);
    // Names are stored without the terminating semicolon.
    assert_eq!(lookup_entity("amp;"), None);
}

#[test]
fn test_legacy_entities() {
    assert!(is_base_named_entity("amp"));
    assert!(is_base_named_entity("copy"));
    assert!(is_base_named_entity("not"));
    assert!(is_base_named_entity("yuml"));
    assert!(!is_base_named_entity("hellip"));
    assert!(!is_base_named_entity("notin"));
}

#[test]
fn test_entity_count() {
    assert!(entity_count() > 2000);
}
