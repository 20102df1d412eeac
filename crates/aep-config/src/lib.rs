//! aep-config
//!
//! Layered YAML device profiles.
//!
//! - Documents merge in order: earlier docs are base, later docs override.
//! - The merged tree is canonicalized (sorted keys) and hashed with SHA-256,
//!   so the same profile always yields the same `config_hash`.
//! - `report_unused_keys` flags leaves nothing in the workspace reads.
//! - `DeviceProfile` is the typed view consumed by the CLI and tests.

mod profile;

pub use profile::{AppEntry, DefaultEntry, DeviceInfo, DeviceProfile, OverrideEntry, ProfileStores};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;

/// JSON-pointer prefixes read by `DeviceProfile::from_config_json`.
///
/// A leaf under any of these prefixes is consumed; any other leaf is unused.
/// A `*` token matches any single token, so list elements are checked field
/// by field. Keep this in sync with `profile.rs`: only list what is actually
/// read.
pub const CONSUMED_POINTERS: &[&str] = &[
    "/device/name",
    "/device/model",
    "/device/dev_mode_enabled",
    "/device/setupwizard_theme",
    "/device/caps/memory_tagging",
    "/device/caps/extended_va_space",
    "/defaults/*/setting",
    "/defaults/*/user",
    "/defaults/*/value",
    "/apps/*/package_name",
    "/apps/*/is_system_app",
    "/apps/*/has_native_code",
    "/apps/*/native_code_is_64_bit",
    "/apps/*/is_debuggable",
    "/apps/*/memtag_manifest_opt_in",
    "/apps/*/installed",
    "/apps/*/users",
    "/overrides/*/package",
    "/overrides/*/user",
    "/overrides/*/switches",
    "/overrides/*/suppressed_notifications",
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

/// Produce an unused-key report for a profile.
/// If `policy == Fail`, returns an error when unused keys exist.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<String> = CONSUMED_POINTERS
        .iter()
        .map(|p| normalize_pointer(p))
        .collect();
    let consumed_prefixes: Vec<String> = consumed.into_iter().collect();

    let mut leaves: Vec<String> = Vec::new();
    collect_leaf_pointers(config_json, "", &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|lp| !consumed_prefixes.iter().any(|cp| is_prefix_pointer(cp, lp)))
        .collect();
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

/// Normalize JSON pointer:
/// - must begin with "/"
/// - no trailing "/" unless it's just "/"
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

/// "/a/b" consumes "/a/b" and "/a/b/c" but NOT "/a/bc"; "/" consumes everything.
/// "/a/*/c" consumes "/a/0/c" and "/a/1/c/d".
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if prefix == "/" || leaf == prefix {
        return true;
    }
    let mut leaf_tokens = leaf.split('/').skip(1);
    for want in prefix.split('/').skip(1) {
        match leaf_tokens.next() {
            Some(got) if want == "*" || want == got => {}
            _ => return false,
        }
    }
    true
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
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        merged = deep_merge(merged, v_json);
    }

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Maps merge key-by-key; anything else (including lists) is replaced.
/// An empty document (`null`) leaves the base untouched.
fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (a_other, Value::Null) => a_other,
        (_, b_other) => b_other,
    }
}

fn canonicalize_json(v: &Value) -> Result<String> {
    let sorted = sort_keys(v);
    serde_json::to_string(&sorted).context("canonical json serialize failed")
}

fn sort_keys(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = serde_json::Map::new();
            for k in keys {
                out.insert(k.clone(), sort_keys(&map[k]));
            }
            Value::Object(out)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_pointer_respects_boundaries() {
        assert!(is_prefix_pointer("/device/name", "/device/name"));
        assert!(is_prefix_pointer("/apps", "/apps/0/package_name"));
        assert!(!is_prefix_pointer("/apps", "/appsx/0"));
        assert!(is_prefix_pointer("/", "/anything"));
    }

    #[test]
    fn wildcard_matches_one_token() {
        assert!(is_prefix_pointer("/apps/*/users", "/apps/3/users/0"));
        assert!(is_prefix_pointer("/apps/*/installed", "/apps/0/installed"));
        assert!(!is_prefix_pointer("/apps/*/installed", "/apps/0/is_sytem_app"));
        assert!(!is_prefix_pointer("/apps/*/users", "/apps/0"));
    }

    #[test]
    fn normalize_pointer_adds_slash_and_trims() {
        assert_eq!(normalize_pointer("device/"), "/device");
        assert_eq!(normalize_pointer(""), "/");
    }

    #[test]
    fn null_overlay_keeps_base() {
        let merged = deep_merge(serde_json::json!({"a": 1}), Value::Null);
        assert_eq!(merged, serde_json::json!({"a": 1}));
    }
}
