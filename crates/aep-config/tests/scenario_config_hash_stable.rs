//! Config hash stability
//!
//! GREEN when:
//! - the same inputs hash identically
//! - key order within YAML does not change the hash
//! - different values produce different hashes
//! - overlays take effect and merged layers hash stably

use aep_config::load_layered_yaml_from_strings;

const BASE_YAML: &str = r#"
device:
  name: "Work phone"
  model: "Pixel 8"
  caps:
    memory_tagging: true
    extended_va_space: true
defaults:
  - setting: restrict_memory_dyn_code_loading_by_default
    value: false
"#;

const BASE_YAML_REORDERED: &str = r#"
defaults:
  - value: false
    setting: restrict_memory_dyn_code_loading_by_default
device:
  caps:
    extended_va_space: true
    memory_tagging: true
  model: "Pixel 8"
  name: "Work phone"
"#;

const OVERLAY_YAML: &str = r#"
device:
  caps:
    memory_tagging: false
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let original = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let reordered = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();

    assert_eq!(
        original.config_hash, reordered.config_hash,
        "reordering keys in YAML must not change the hash"
    );
}

#[test]
fn different_values_produce_different_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();

    assert_ne!(a.config_hash, b.config_hash);
}

#[test]
fn overlay_overrides_only_named_leaves() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();

    let memtag = a
        .config_json
        .pointer("/device/caps/memory_tagging")
        .and_then(|v| v.as_bool())
        .unwrap();
    assert!(!memtag, "overlay should override base memory_tagging");

    let va = a
        .config_json
        .pointer("/device/caps/extended_va_space")
        .and_then(|v| v.as_bool())
        .unwrap();
    assert!(va, "sibling leaf must survive the merge");

    let model = a
        .config_json
        .pointer("/device/model")
        .and_then(|v| v.as_str())
        .unwrap();
    assert_eq!(model, "Pixel 8");
}

#[test]
fn hash_is_64_hex_chars() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(loaded.config_hash.len(), 64);
    assert!(loaded.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn invalid_yaml_is_an_error() {
    let err = load_layered_yaml_from_strings(&["device: [unclosed"]).unwrap_err();
    assert!(err.to_string().contains("invalid yaml"));
}
