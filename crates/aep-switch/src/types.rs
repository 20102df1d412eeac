use crate::DefaultSettingId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The per-app exploit-protection switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SwitchKind {
    #[serde(rename = "ext_va_space")]
    ExtendedVaSpace,
    #[serde(rename = "hardened_malloc")]
    HardenedMalloc,
    #[serde(rename = "memory_dcl")]
    RestrictMemoryDynCodeLoading,
    #[serde(rename = "storage_dcl")]
    RestrictStorageDynCodeLoading,
    #[serde(rename = "webview_dcl")]
    RestrictWebViewDynCodeLoading,
    #[serde(rename = "memtag")]
    MemoryTagging,
    #[serde(rename = "deny_native_debug")]
    DenyNativeDebugging,
}

impl SwitchKind {
    pub const ALL: [SwitchKind; 7] = [
        SwitchKind::ExtendedVaSpace,
        SwitchKind::HardenedMalloc,
        SwitchKind::RestrictMemoryDynCodeLoading,
        SwitchKind::RestrictStorageDynCodeLoading,
        SwitchKind::RestrictWebViewDynCodeLoading,
        SwitchKind::MemoryTagging,
        SwitchKind::DenyNativeDebugging,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchKind::ExtendedVaSpace => "ext_va_space",
            SwitchKind::HardenedMalloc => "hardened_malloc",
            SwitchKind::RestrictMemoryDynCodeLoading => "memory_dcl",
            SwitchKind::RestrictStorageDynCodeLoading => "storage_dcl",
            SwitchKind::RestrictWebViewDynCodeLoading => "webview_dcl",
            SwitchKind::MemoryTagging => "memtag",
            SwitchKind::DenyNativeDebugging => "deny_native_debug",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|k| k.as_str().eq_ignore_ascii_case(s))
    }
}

/// Why a switch cannot be changed for a given app.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImmutabilityReason {
    IsSystemApp,
    NoNativeCode,
    NonSixtyFourBitNativeCode,
    IsDebuggableApp,
    OptedInViaManifest,
    RequiredByHardenedMalloc,
}

impl ImmutabilityReason {
    /// Deterministic code string.
    pub fn code(&self) -> &'static str {
        match self {
            ImmutabilityReason::IsSystemApp => "IR_IS_SYSTEM_APP",
            ImmutabilityReason::NoNativeCode => "IR_NO_NATIVE_CODE",
            ImmutabilityReason::NonSixtyFourBitNativeCode => "IR_NON_64_BIT_NATIVE_CODE",
            ImmutabilityReason::IsDebuggableApp => "IR_IS_DEBUGGABLE_APP",
            ImmutabilityReason::OptedInViaManifest => "IR_OPTED_IN_VIA_MANIFEST",
            ImmutabilityReason::RequiredByHardenedMalloc => "IR_REQUIRED_BY_HARDENED_MALLOC",
        }
    }
}

/// Android user id. User 0 is the owner ("system") user.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl UserId {
    pub const SYSTEM: UserId = UserId(0);

    pub fn is_system(&self) -> bool {
        self.0 == 0
    }
}

/// Manifest / ABI facts about one installed app, as seen by one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub package_name: String,

    /// Preinstalled as part of the OS image.
    #[serde(default)]
    pub is_system_app: bool,

    #[serde(default)]
    pub has_native_code: bool,

    /// Only meaningful when `has_native_code` is true.
    #[serde(default = "default_true")]
    pub native_code_is_64_bit: bool,

    /// `android:debuggable="true"` in the manifest.
    #[serde(default)]
    pub is_debuggable: bool,

    /// `android:memtagMode` requested in the manifest.
    #[serde(default)]
    pub memtag_manifest_opt_in: bool,

    #[serde(default = "default_true")]
    pub installed: bool,
}

fn default_true() -> bool {
    true
}

impl AppInfo {
    /// A plain third-party app with 64-bit native code and no special flags.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            is_system_app: false,
            has_native_code: true,
            native_code_is_64_bit: true,
            is_debuggable: false,
            memtag_manifest_opt_in: false,
            installed: true,
        }
    }

    pub fn has_non_64_bit_native_code(&self) -> bool {
        self.has_native_code && !self.native_code_is_64_bit
    }
}

/// Per-app tri-state override for one switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideState {
    /// Defer to the process-wide default.
    #[default]
    Unset,
    On,
    Off,
}

impl OverrideState {
    pub fn from_value(value: bool) -> Self {
        if value {
            OverrideState::On
        } else {
            OverrideState::Off
        }
    }

    pub fn value(&self) -> Option<bool> {
        match self {
            OverrideState::Unset => None,
            OverrideState::On => Some(true),
            OverrideState::Off => Some(false),
        }
    }
}

/// Package state record for one (package, user) pair.
///
/// Holds the tri-state of every switch plus the per-switch notification
/// preference. Missing entries read as `Unset` / notifications enabled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageState {
    #[serde(default)]
    pub overrides: BTreeMap<SwitchKind, OverrideState>,

    #[serde(default)]
    pub suppressed_notifications: BTreeSet<SwitchKind>,
}

impl PackageState {
    pub fn override_for(&self, kind: SwitchKind) -> OverrideState {
        self.overrides.get(&kind).copied().unwrap_or_default()
    }

    pub fn set_override(&mut self, kind: SwitchKind, state: OverrideState) {
        match state {
            OverrideState::Unset => {
                self.overrides.remove(&kind);
            }
            s => {
                self.overrides.insert(kind, s);
            }
        }
    }

    pub fn is_notification_enabled(&self, kind: SwitchKind) -> bool {
        !self.suppressed_notifications.contains(&kind)
    }

    pub fn set_notification_enabled(&mut self, kind: SwitchKind, enabled: bool) {
        if enabled {
            self.suppressed_notifications.remove(&kind);
        } else {
            self.suppressed_notifications.insert(kind);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.suppressed_notifications.is_empty()
    }
}

/// Hardware / kernel capabilities. Probed once, constant for process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCaps {
    #[serde(default)]
    pub memory_tagging: bool,

    #[serde(default = "default_true")]
    pub extended_va_space: bool,
}

impl DeviceCaps {
    pub fn all() -> Self {
        Self {
            memory_tagging: true,
            extended_va_space: true,
        }
    }

    /// Typical arm64 device without MTE.
    pub fn without_memory_tagging() -> Self {
        Self {
            memory_tagging: false,
            extended_va_space: true,
        }
    }
}

/// Resolver output for a supported switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub value: bool,
    /// True iff the per-app override is unset and no predicate matched.
    pub is_default: bool,
    /// Present iff the user must not be offered a control.
    pub immutability: Option<ImmutabilityReason>,
}

impl Resolution {
    pub fn is_immutable(&self) -> bool {
        self.immutability.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchOutcome {
    /// The feature does not exist on this device. No surface may be shown.
    Unsupported,
    Resolved(Resolution),
}

impl SwitchOutcome {
    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            SwitchOutcome::Unsupported => None,
            SwitchOutcome::Resolved(r) => Some(r),
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, SwitchOutcome::Resolved(_))
    }

    /// Effective value; `None` when unsupported.
    pub fn value(&self) -> Option<bool> {
        self.resolution().map(|r| r.value)
    }
}

/// Where the value of the "Default" choice comes from for one app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultValueReason {
    /// Read from a process-wide default setting (after polarity).
    DefaultSetting(DefaultSettingId),
    /// The switch has no default setting; built-in third-party baseline.
    ThirdPartyBaseline,
    /// The app is pinned; the default is the forced value.
    Immutable(ImmutabilityReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefaultValue {
    pub value: bool,
    pub reason: DefaultValueReason,
}
