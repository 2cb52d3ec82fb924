//! Config hash stability
//!
//! GREEN when:
//! - the same inputs always hash identically
//! - key order inside YAML does not change the hash
//! - different values produce different hashes
//! - overlay layers override base values and change the hash

use csm_config::{load_layered_yaml, load_layered_yaml_from_strings};

const BASE_YAML: &str = r#"
operator:
  name: "Ivan Ivanov"
  email: "ivan@company.example"
display:
  style: "plain"
  currency: "RUB"
export:
  dir: "exports"
"#;

const BASE_YAML_REORDERED: &str = r#"
export:
  dir: "exports"
display:
  currency: "RUB"
  style: "plain"
operator:
  email: "ivan@company.example"
  name: "Ivan Ivanov"
"#;

const OVERLAY_YAML: &str = r#"
display:
  style: "ansi"
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
    assert_eq!(a.config_hash.len(), 64, "sha256 hex digest");
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
fn overlay_overrides_base_and_changes_hash() {
    let base = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let layered = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();

    assert_ne!(base.config_hash, layered.config_hash);
    assert_eq!(
        layered.config_json.pointer("/display/style").and_then(|v| v.as_str()),
        Some("ansi")
    );
    // untouched siblings survive the merge
    assert_eq!(
        layered.config_json.pointer("/display/currency").and_then(|v| v.as_str()),
        Some("RUB")
    );
}

#[test]
fn empty_overlay_is_a_no_op() {
    let base = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let with_empty = load_layered_yaml_from_strings(&[BASE_YAML, ""]).unwrap();
    assert_eq!(base.config_hash, with_empty.config_hash);
}

#[test]
fn file_layers_match_string_layers() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = dir.path().join("base.yaml");
    let overlay_path = dir.path().join("local.yaml");
    std::fs::write(&base_path, BASE_YAML).unwrap();
    std::fs::write(&overlay_path, OVERLAY_YAML).unwrap();

    let base_s = base_path.to_string_lossy().to_string();
    let overlay_s = overlay_path.to_string_lossy().to_string();

    let from_files = load_layered_yaml(&[base_s.as_str(), overlay_s.as_str()]).unwrap();
    let from_strings = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    assert_eq!(from_files.config_hash, from_strings.config_hash);
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = load_layered_yaml(&["/definitely/not/here.yaml"]).unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.yaml"));
}
