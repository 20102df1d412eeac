use aep_config::{load_layered_yaml_from_strings, DeviceProfile};
use aep_switch::{
    resolve_for_package, AppInfo, DefaultSettingId, DefaultStore, DeviceCaps,
    InMemoryDefaultStore, InMemoryOverrideStore, OverrideState, OverrideStore, SwitchKind,
    SwitchOutcome, UserId,
};
use anyhow::{Context, Result};
use std::io::Write;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// App fixtures
// ---------------------------------------------------------------------------

pub fn third_party_app(package: &str) -> AppInfo {
    AppInfo::new(package)
}

pub fn system_app(package: &str) -> AppInfo {
    AppInfo {
        is_system_app: true,
        ..AppInfo::new(package)
    }
}

pub fn no_native_code_app(package: &str) -> AppInfo {
    AppInfo {
        has_native_code: false,
        ..AppInfo::new(package)
    }
}

pub fn legacy_32_bit_app(package: &str) -> AppInfo {
    AppInfo {
        native_code_is_64_bit: false,
        ..AppInfo::new(package)
    }
}

pub fn debuggable_app(package: &str) -> AppInfo {
    AppInfo {
        is_debuggable: true,
        ..AppInfo::new(package)
    }
}

pub fn memtag_opt_in_app(package: &str) -> AppInfo {
    AppInfo {
        memtag_manifest_opt_in: true,
        ..AppInfo::new(package)
    }
}

pub fn uninstalled_app(package: &str) -> AppInfo {
    AppInfo {
        installed: false,
        ..AppInfo::new(package)
    }
}

// ---------------------------------------------------------------------------
// Fake device
// ---------------------------------------------------------------------------

/// In-memory device: caps, both stores, and an app list shared by all users.
#[derive(Clone, Debug)]
pub struct FakeDevice {
    pub caps: DeviceCaps,
    pub overrides: InMemoryOverrideStore,
    pub defaults: InMemoryDefaultStore,
    pub apps: Vec<AppInfo>,
}

impl FakeDevice {
    pub fn new(caps: DeviceCaps) -> Self {
        Self {
            caps,
            overrides: InMemoryOverrideStore::new(),
            defaults: InMemoryDefaultStore::new(),
            apps: Vec::new(),
        }
    }

    pub fn with_app(mut self, app: AppInfo) -> Self {
        self.apps.push(app);
        self
    }

    pub fn app(&self, package: &str) -> AppInfo {
        self.apps
            .iter()
            .find(|a| a.package_name == package)
            .cloned()
            .unwrap_or_else(|| panic!("fake device has no app {package}"))
    }

    pub fn set_override(
        &mut self,
        package: &str,
        user: UserId,
        kind: SwitchKind,
        state: OverrideState,
    ) {
        self.overrides
            .edit(package, user, &mut |st| st.set_override(kind, state));
    }

    pub fn set_default(&mut self, setting: DefaultSettingId, user: UserId, value: bool) {
        self.defaults.set(setting, user, value);
    }

    pub fn resolve(&self, kind: SwitchKind, user: UserId, package: &str) -> SwitchOutcome {
        let app = self.app(package);
        resolve_for_package(kind, user, &app, &self.overrides, &self.defaults, &self.caps)
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// A small profile exercising every predicate; shared by the CLI and
/// settings scenarios.
pub const SAMPLE_PROFILE_YAML: &str = r#"
device:
  name: ""
  model: "Pixel 8"
  dev_mode_enabled: false
  caps:
    memory_tagging: true
    extended_va_space: true
defaults:
  - setting: restrict_memory_dyn_code_loading_by_default
    value: true
  - setting: allow_native_debug_by_default
    user: 10
    value: false
apps:
  - package_name: com.android.dialer
    is_system_app: true
    has_native_code: true
  - package_name: com.example.browser
    has_native_code: true
    users: [0, 10]
  - package_name: com.example.legacy
    has_native_code: true
    native_code_is_64_bit: false
  - package_name: com.example.notes
    has_native_code: false
  - package_name: com.example.tagged
    has_native_code: true
    memtag_manifest_opt_in: true
overrides:
  - package: com.example.browser
    switches:
      hardened_malloc: off
      memtag: on
    suppressed_notifications: [memtag]
"#;

pub fn sample_profile() -> DeviceProfile {
    load_profile(SAMPLE_PROFILE_YAML).expect("sample profile must decode")
}

pub fn load_profile(yaml: &str) -> Result<DeviceProfile> {
    let loaded = load_layered_yaml_from_strings(&[yaml])?;
    DeviceProfile::from_config_json(&loaded.config_json)
}

/// Write `yaml` to `<tempdir>/<name>`. Keep the `TempDir` alive for as long
/// as the path is used.
pub fn write_profile(name: &str, yaml: &str) -> Result<(TempDir, String)> {
    let dir = tempfile::tempdir().context("create tempdir")?;
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path)
        .with_context(|| format!("create profile: {}", path.display()))?;
    f.write_all(yaml.as_bytes()).context("write profile")?;
    let path = path.to_string_lossy().to_string();
    Ok((dir, path))
}
