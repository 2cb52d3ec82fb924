use csm_config::{load_layered_yaml_from_strings, report_unused_keys, UnusedKeyPolicy};

/// scenario_unused_keys_warn_or_fail
///
/// Validates:
/// 1) Unused keys are detected in WARN mode but do not error.
/// 2) Unused keys cause failure in FAIL mode.
/// 3) Keys read by the console are not flagged.
/// 4) Deterministic ordering of unused pointers.

#[test]
fn warn_mode_reports_unused_keys_without_error() {
    let yaml = r#"
display:
  style: ansi
  theme: dark

legacy:
  autosave: true
  language: ru
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)
        .expect("warn mode must not error");

    assert!(!report.is_clean());
    for expected in ["/display/theme", "/legacy/autosave", "/legacy/language"] {
        assert!(
            report.unused_leaf_pointers.contains(&expected.to_string()),
            "missing unused pointer {expected}"
        );
    }
    assert!(!report
        .unused_leaf_pointers
        .contains(&"/display/style".to_string()));
}

#[test]
fn fail_mode_errors_on_unused_keys() {
    let yaml = r#"
notifications:
  enabled: true
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let result = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail);

    let msg = format!("{:?}", result.expect_err("fail policy must error"));
    assert!(msg.contains("CONFIG_UNUSED_KEYS"));
}

#[test]
fn full_console_config_is_clean() {
    let yaml = r#"
operator:
  name: "Ivan Ivanov"
  email: "ivan@company.example"
display:
  style: icons
  currency: RUB
export:
  dir: exports
  extended_columns: true
data:
  seed_path: data/portfolio.json
logging:
  level: debug
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail)
        .expect("every key is consumed");
    assert!(report.is_clean());
}

#[test]
fn deterministic_unused_pointer_ordering() {
    let yaml = r#"
unused:
  b: 2
  a: 1
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)
        .expect("warn mode must not error");

    assert_eq!(
        report.unused_leaf_pointers,
        vec!["/unused/a".to_string(), "/unused/b".to_string()]
    );
}
