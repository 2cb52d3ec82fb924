use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

/// Env var holding comma-separated config layer paths (base first).
pub const ENV_CONFIG_PATHS: &str = "CSM_CONFIG";

/// Credential prefixes for the services a CSM desk config might be tempted to
/// reference: CRM and mail-provider API keys, the export bucket, Slack alerts.
/// If any leaf string value in the effective config starts with one of these,
/// loading aborts with CONFIG_SECRET_DETECTED. Config carries operator identity
/// and paths, never credentials.
const SECRET_PREFIXES: &[&str] = &[
    "sk-",        // CRM / API keys
    "sk_live",    // billing live key
    "SG.",        // SendGrid mail API key
    "AKIA",       // AWS access key ID (export bucket)
    "-----BEGIN", // PEM private keys
    "xoxb-",      // Slack bot token
    "xoxp-",      // Slack user token
];

/// JSON-pointer prefixes the console actually reads (see [`DeskConfig::from_json`]).
///
/// A leaf under any of these prefixes is "consumed"; anything else is reported
/// by [`report_unused_keys`]. Keep in sync with `DeskConfig::from_json`.
pub const CONSUMED_POINTERS: &[&str] = &[
    "/operator/name",
    "/operator/email",
    "/display/style",
    "/display/currency",
    "/export/dir",
    "/export/extended_columns",
    "/data/seed_path",
    "/logging/level",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Consumed JSON-pointer prefixes used for this analysis (sorted, unique)
    pub consumed_prefixes: Vec<String>,
    /// Unused leaf pointers (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Produce an unused-key report.
/// `Fail` returns an error when unused keys exist; `Warn` always returns the report.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<String> = CONSUMED_POINTERS
        .iter()
        .map(|p| normalize_pointer(p))
        .collect();
    let consumed_prefixes: Vec<String> = consumed.iter().cloned().collect();

    let mut leaves: Vec<String> = Vec::new();
    collect_leaf_pointers(config_json, "", &mut leaves);

    let mut unused: Vec<String> = Vec::new();
    'leaf: for lp in leaves {
        for cp in &consumed_prefixes {
            if is_prefix_pointer(cp, &lp) {
                continue 'leaf;
            }
        }
        unused.push(lp);
    }

    unused.sort();
    unused.dedup();

    let report = UnusedKeyReport {
        consumed_prefixes,
        unused_leaf_pointers: unused,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused config leaf key(s) detected. \
            Remove them or update the consumed registry. First few: {}",
            report.unused_leaf_pointers.len(),
            preview_list(&report.unused_leaf_pointers, 12)
        );
    }

    Ok(report)
}

/// Normalize JSON pointer: leading "/", no trailing "/" unless it's just "/".
fn normalize_pointer(p: &str) -> String {
    let mut s = p.trim().to_string();
    if s.is_empty() {
        return "/".to_string();
    }
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    while s.ends_with('/') && s.len() > 1 {
        s.pop();
    }
    s
}

/// "/a/b" consumes "/a/b" and "/a/b/c" but NOT "/a/bc". "/" consumes everything.
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if prefix == "/" || leaf == prefix {
        return true;
    }
    if leaf.starts_with(prefix) {
        return leaf
            .get(prefix.len()..prefix.len() + 1)
            .map(|c| c == "/")
            .unwrap_or(false);
    }
    false
}

fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) => {
            for (k, vv) in map.iter() {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        Value::Array(arr) => {
            for (i, vv) in arr.iter().enumerate() {
                let next = format!("{}/{}", prefix, i);
                collect_leaf_pointers(vv, &next, out);
            }
        }
        _ => {
            let p = if prefix.is_empty() {
                "/".to_string()
            } else {
                prefix.to_string()
            };
            out.push(p);
        }
    }
}

fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

fn preview_list(items: &[String], n: usize) -> String {
    let take = items.iter().take(n).cloned().collect::<Vec<_>>();
    format!("{:?}", take)
}

// ---------------------------------------------------------------------------
// Layered loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    // Earlier docs are base, later docs override.
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        // An empty YAML document parses as null; treat it as "no overrides".
        if v_json.is_null() {
            continue;
        }
        merged = deep_merge(merged, v_json);
    }

    enforce_no_secret_literals(&merged)?;

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Layer paths from [`ENV_CONFIG_PATHS`], empty when unset.
pub fn config_paths_from_env() -> Vec<String> {
    std::env::var(ENV_CONFIG_PATHS)
        .map(|v| {
            v.split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

fn canonicalize_json(v: &Value) -> Result<String> {
    // serde_json's default Map is ordered by key, so compact serialization is canonical.
    let s = serde_json::to_string(v).context("canonical json serialize failed")?;
    Ok(s)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let out = hasher.finalize();
    hex::encode(out)
}

fn enforce_no_secret_literals(v: &Value) -> Result<()> {
    let mut leaves = Vec::new();
    collect_leaf_pointers(v, "", &mut leaves);

    for ptr in leaves {
        if let Some(val) = v.pointer(&ptr) {
            if let Some(s) = val.as_str() {
                if looks_like_secret(s) {
                    bail!("CONFIG_SECRET_DETECTED leaf={} value=REDACTED", ptr);
                }
            }
        }
    }
    Ok(())
}

fn looks_like_secret(s: &str) -> bool {
    let t = s.trim();
    if t.len() < 8 {
        return false;
    }
    SECRET_PREFIXES.iter().any(|p| t.starts_with(p))
}

// ---------------------------------------------------------------------------
// Typed view
// ---------------------------------------------------------------------------

/// How the console renders its views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    #[default]
    Plain,
    Ansi,
    Icons,
    Emoji,
}

impl RenderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStyle::Plain => "plain",
            RenderStyle::Ansi => "ansi",
            RenderStyle::Icons => "icons",
            RenderStyle::Emoji => "emoji",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(RenderStyle::Plain),
            "ansi" | "color" | "colour" => Ok(RenderStyle::Ansi),
            "icons" | "icon" => Ok(RenderStyle::Icons),
            "emoji" => Ok(RenderStyle::Emoji),
            other => bail!(
                "invalid display style '{}'. expected one of: plain | ansi | icons | emoji",
                other
            ),
        }
    }
}

/// Settings the console reads, with defaults for every missing key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeskConfig {
    pub operator_name: String,
    pub operator_email: String,
    pub style: RenderStyle,
    pub currency: String,
    pub export_dir: PathBuf,
    pub extended_columns: bool,
    pub seed_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            operator_name: "Ivan Ivanov".to_string(),
            operator_email: "ivan@company.example".to_string(),
            style: RenderStyle::Plain,
            currency: "RUB".to_string(),
            export_dir: PathBuf::from("exports"),
            extended_columns: false,
            seed_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl DeskConfig {
    /// Extract the typed settings from a merged config tree.
    ///
    /// Missing keys fall back to [`DeskConfig::default`]; present keys with the
    /// wrong type are errors.
    pub fn from_json(v: &Value) -> Result<Self> {
        let d = Self::default();
        Ok(Self {
            operator_name: str_at(v, "/operator/name")?.unwrap_or(d.operator_name),
            operator_email: str_at(v, "/operator/email")?.unwrap_or(d.operator_email),
            style: match str_at(v, "/display/style")? {
                Some(s) => RenderStyle::parse(&s)?,
                None => d.style,
            },
            currency: str_at(v, "/display/currency")?.unwrap_or(d.currency),
            export_dir: str_at(v, "/export/dir")?
                .map(PathBuf::from)
                .unwrap_or(d.export_dir),
            extended_columns: bool_at(v, "/export/extended_columns")?
                .unwrap_or(d.extended_columns),
            seed_path: str_at(v, "/data/seed_path")?.map(PathBuf::from),
            log_level: str_at(v, "/logging/level")?.unwrap_or(d.log_level),
        })
    }

    pub fn from_loaded(loaded: &LoadedConfig) -> Result<Self> {
        Self::from_json(&loaded.config_json)
    }
}

fn str_at(v: &Value, ptr: &str) -> Result<Option<String>> {
    match v.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => bail!("config key {} must be a string, got {}", ptr, other),
    }
}

fn bool_at(v: &Value, ptr: &str) -> Result<Option<bool>> {
    match v.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => bail!("config key {} must be a boolean, got {}", ptr, other),
    }
}
