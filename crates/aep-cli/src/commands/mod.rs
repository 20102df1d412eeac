//! Command handler modules for aep-cli.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod resolve;
pub mod screens;

use aep_config::{load_layered_yaml, DeviceProfile, LoadedConfig};
use aep_settings::{ListFilter, SettingsContext};
use aep_switch::{SwitchKind, UserId};
use anyhow::{Context, Result};
use tracing::debug;

pub const ENV_CONFIG: &str = "AEP_CONFIG";

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Parse a CLI `--switch` id.
pub fn parse_switch(s: &str) -> Result<SwitchKind> {
    SwitchKind::parse(s).with_context(|| {
        let ids: Vec<&str> = SwitchKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("invalid --switch '{}'. expected one of: {}", s, ids.join(" | "))
    })
}

/// Parse a CLI `--state` string.
pub fn parse_state(s: &str) -> Result<ListFilter> {
    ListFilter::parse(s)
        .with_context(|| format!("invalid --state '{}'. expected one of: on | off", s))
}

/// `--config` paths if given, else the comma-separated `AEP_CONFIG`.
pub fn config_paths(cli_paths: &[String]) -> Result<Vec<String>> {
    if !cli_paths.is_empty() {
        return Ok(cli_paths.to_vec());
    }
    let raw = std::env::var(ENV_CONFIG)
        .with_context(|| format!("no config: pass --config <path> or set {ENV_CONFIG}"))?;
    let paths: Vec<String> = raw
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if paths.is_empty() {
        anyhow::bail!("no config: {ENV_CONFIG} is empty");
    }
    Ok(paths)
}

pub fn load_config(cli_paths: &[String]) -> Result<LoadedConfig> {
    let paths = config_paths(cli_paths)?;
    let refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_layered_yaml(&refs)?;
    debug!(config_hash = %loaded.config_hash, layers = refs.len(), "config loaded");
    Ok(loaded)
}

pub fn load_profile(cli_paths: &[String]) -> Result<DeviceProfile> {
    let loaded = load_config(cli_paths)?;
    DeviceProfile::from_config_json(&loaded.config_json)
}

pub fn settings_context(profile: &DeviceProfile, user: u32) -> SettingsContext {
    SettingsContext::new(UserId(user), profile.device.caps)
        .with_dev_mode(profile.device.dev_mode_enabled)
}
