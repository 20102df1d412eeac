//! Typed device profile.
//!
//! A profile describes one device as the switch layer sees it: hardware
//! capabilities, stored default settings, installed apps per user, and the
//! per-app package states. It is the only input the CLI needs.

use aep_switch::{
    AppInfo, DefaultSettingId, DefaultStore, DeviceCaps, InMemoryDefaultStore,
    InMemoryOverrideStore, OverrideState, OverrideStore, SettingScope, SwitchKind, UserId,
};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// User-visible device name (Settings > About). Empty => model.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub dev_mode_enabled: bool,

    /// `setupwizard.theme` system property. Empty => built-in default.
    #[serde(default)]
    pub setupwizard_theme: String,

    #[serde(default = "default_caps")]
    pub caps: DeviceCaps,
}

fn default_caps() -> DeviceCaps {
    DeviceCaps::without_memory_tagging()
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            model: String::new(),
            dev_mode_enabled: false,
            setupwizard_theme: String::new(),
            caps: default_caps(),
        }
    }
}

/// One stored default setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultEntry {
    pub setting: DefaultSettingId,
    /// Required for per-user settings other than the owner's; must be
    /// absent or 0 for global settings.
    #[serde(default)]
    pub user: Option<UserId>,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    #[serde(flatten)]
    pub app: AppInfo,

    /// Users the app is installed for.
    #[serde(default = "owner_only")]
    pub users: Vec<UserId>,
}

fn owner_only() -> Vec<UserId> {
    vec![UserId::SYSTEM]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub package: String,

    #[serde(default)]
    pub user: UserId,

    #[serde(default)]
    pub switches: BTreeMap<SwitchKind, OverrideState>,

    #[serde(default)]
    pub suppressed_notifications: BTreeSet<SwitchKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    #[serde(default)]
    pub device: DeviceInfo,

    #[serde(default)]
    pub defaults: Vec<DefaultEntry>,

    #[serde(default)]
    pub apps: Vec<AppEntry>,

    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,
}

/// In-memory stores built from a profile.
#[derive(Debug, Clone)]
pub struct ProfileStores {
    pub caps: DeviceCaps,
    pub defaults: InMemoryDefaultStore,
    pub overrides: InMemoryOverrideStore,
}

impl DeviceProfile {
    /// Decode from the merged config tree (produced by `load_layered_yaml*`).
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let profile: DeviceProfile =
            serde_json::from_value(cfg.clone()).context("invalid device profile")?;
        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> Result<()> {
        for d in &self.defaults {
            if d.setting.scope() == SettingScope::Global {
                if let Some(u) = d.user {
                    if !u.is_system() {
                        bail!(
                            "defaults: global setting '{}' can only be set by the owner user (got user {})",
                            d.setting.key(),
                            u.0
                        );
                    }
                }
            }
        }

        let mut seen = BTreeSet::new();
        for a in &self.apps {
            if a.app.package_name.trim().is_empty() {
                bail!("apps: package_name must not be empty");
            }
            if !seen.insert(a.app.package_name.as_str()) {
                bail!("apps: duplicate package '{}'", a.app.package_name);
            }
        }

        for o in &self.overrides {
            if !seen.contains(o.package.as_str()) {
                bail!("overrides: unknown package '{}'", o.package);
            }
        }
        Ok(())
    }

    /// Apps installed for `user`, in profile order.
    pub fn apps_for_user(&self, user: UserId) -> Vec<AppInfo> {
        self.apps
            .iter()
            .filter(|a| a.users.contains(&user))
            .map(|a| a.app.clone())
            .collect()
    }

    /// Look up one installed app for `user`.
    pub fn app(&self, package: &str, user: UserId) -> Result<AppInfo> {
        self.apps
            .iter()
            .find(|a| a.app.package_name == package)
            .filter(|a| a.users.contains(&user))
            .map(|a| a.app.clone())
            .with_context(|| format!("package '{package}' is not installed for user {}", user.0))
    }

    pub fn users(&self) -> BTreeSet<UserId> {
        let mut out: BTreeSet<UserId> = self
            .apps
            .iter()
            .flat_map(|a| a.users.iter().copied())
            .collect();
        out.insert(UserId::SYSTEM);
        out
    }

    pub fn build_stores(&self) -> ProfileStores {
        let mut defaults = InMemoryDefaultStore::new();
        for d in &self.defaults {
            defaults.set(d.setting, d.user.unwrap_or(UserId::SYSTEM), d.value);
        }

        let mut overrides = InMemoryOverrideStore::new();
        for o in &self.overrides {
            overrides.edit(&o.package, o.user, &mut |ps| {
                for (kind, st) in &o.switches {
                    ps.set_override(*kind, *st);
                }
                for kind in &o.suppressed_notifications {
                    ps.set_notification_enabled(*kind, false);
                }
            });
        }

        ProfileStores {
            caps: self.device.caps,
            defaults,
            overrides,
        }
    }
}
