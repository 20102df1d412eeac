//! Switch definition tables.
//!
//! Each [`SwitchKind`] maps to one static [`SwitchDef`]. The resolver in
//! `engine.rs` is a single function parameterized by this table; adding a
//! switch means adding a row here, not a new code path.

use crate::{ImmutabilityReason, SwitchKind};
use serde::{Deserialize, Serialize};

/// One immutability rule: if `reason` applies to the app, the switch is
/// pinned to `forced_value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Predicate {
    pub reason: ImmutabilityReason,
    pub forced_value: bool,
}

const fn pin(reason: ImmutabilityReason, forced_value: bool) -> Predicate {
    Predicate {
        reason,
        forced_value,
    }
}

/// Whether the UI-facing boolean is the stored default or its negation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    Direct,
    Inverted,
}

impl Polarity {
    /// Stored default-setting value -> switch value (and back; the mapping
    /// is its own inverse).
    pub fn apply(&self, stored: bool) -> bool {
        match self {
            Polarity::Direct => stored,
            Polarity::Inverted => !stored,
        }
    }
}

/// Device capability a switch requires to exist at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HardwareGate {
    MemoryTagging,
    ExtendedVaSpace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingScope {
    /// One value for the whole device; only the owner user may change it.
    Global,
    PerUser,
}

/// Process-wide default settings consulted when no per-app override exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultSettingId {
    RestrictMemoryDynCodeLoadingByDefault,
    RestrictStorageDynCodeLoadingByDefault,
    RestrictWebviewDynCodeLoadingByDefault,
    ForceAppMemtagByDefault,
    AllowNativeDebugByDefault,
}

impl DefaultSettingId {
    pub const ALL: [DefaultSettingId; 5] = [
        DefaultSettingId::RestrictMemoryDynCodeLoadingByDefault,
        DefaultSettingId::RestrictStorageDynCodeLoadingByDefault,
        DefaultSettingId::RestrictWebviewDynCodeLoadingByDefault,
        DefaultSettingId::ForceAppMemtagByDefault,
        DefaultSettingId::AllowNativeDebugByDefault,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DefaultSettingId::RestrictMemoryDynCodeLoadingByDefault => {
                "restrict_memory_dyn_code_loading_by_default"
            }
            DefaultSettingId::RestrictStorageDynCodeLoadingByDefault => {
                "restrict_storage_dyn_code_loading_by_default"
            }
            DefaultSettingId::RestrictWebviewDynCodeLoadingByDefault => {
                "restrict_webview_dyn_code_loading_by_default"
            }
            DefaultSettingId::ForceAppMemtagByDefault => "force_app_memtag_by_default",
            DefaultSettingId::AllowNativeDebugByDefault => "allow_native_debug_by_default",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|d| d.key().eq_ignore_ascii_case(s))
    }

    pub fn scope(&self) -> SettingScope {
        match self {
            DefaultSettingId::ForceAppMemtagByDefault => SettingScope::Global,
            _ => SettingScope::PerUser,
        }
    }

    /// Value read when the setting was never written.
    pub fn fallback(&self) -> bool {
        match self {
            DefaultSettingId::AllowNativeDebugByDefault => true,
            _ => false,
        }
    }
}

/// Static definition of one switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwitchDef {
    pub kind: SwitchKind,

    /// Priority order: first match wins.
    pub predicates: &'static [Predicate],

    pub polarity: Polarity,

    /// Consulted when the override is unset. `None` => `third_party_default`.
    pub default_setting: Option<DefaultSettingId>,

    /// Value for mutable apps when there is no default setting.
    pub third_party_default: bool,

    pub hardware_gate: Option<HardwareGate>,

    /// The platform can notify the user when this switch blocks something.
    pub has_notification: bool,
}

use ImmutabilityReason::*;

static EXTENDED_VA_SPACE: SwitchDef = SwitchDef {
    kind: SwitchKind::ExtendedVaSpace,
    predicates: &[
        pin(RequiredByHardenedMalloc, true),
        pin(NonSixtyFourBitNativeCode, false),
    ],
    polarity: Polarity::Direct,
    default_setting: None,
    third_party_default: false,
    hardware_gate: Some(HardwareGate::ExtendedVaSpace),
    has_notification: false,
};

static HARDENED_MALLOC: SwitchDef = SwitchDef {
    kind: SwitchKind::HardenedMalloc,
    // System app before no-native-code: a preinstalled app always reports
    // the system-app reason.
    predicates: &[
        pin(IsSystemApp, true),
        pin(NoNativeCode, true),
        pin(NonSixtyFourBitNativeCode, false),
        pin(IsDebuggableApp, false),
    ],
    polarity: Polarity::Direct,
    default_setting: None,
    third_party_default: true,
    hardware_gate: None,
    has_notification: false,
};

static RESTRICT_MEMORY_DCL: SwitchDef = SwitchDef {
    kind: SwitchKind::RestrictMemoryDynCodeLoading,
    predicates: &[pin(IsSystemApp, false)],
    polarity: Polarity::Direct,
    default_setting: Some(DefaultSettingId::RestrictMemoryDynCodeLoadingByDefault),
    third_party_default: false,
    hardware_gate: None,
    has_notification: true,
};

static RESTRICT_STORAGE_DCL: SwitchDef = SwitchDef {
    kind: SwitchKind::RestrictStorageDynCodeLoading,
    predicates: &[pin(IsSystemApp, false)],
    polarity: Polarity::Direct,
    default_setting: Some(DefaultSettingId::RestrictStorageDynCodeLoadingByDefault),
    third_party_default: false,
    hardware_gate: None,
    has_notification: true,
};

static RESTRICT_WEBVIEW_DCL: SwitchDef = SwitchDef {
    kind: SwitchKind::RestrictWebViewDynCodeLoading,
    predicates: &[],
    polarity: Polarity::Direct,
    default_setting: Some(DefaultSettingId::RestrictWebviewDynCodeLoadingByDefault),
    third_party_default: false,
    hardware_gate: None,
    has_notification: false,
};

static MEMORY_TAGGING: SwitchDef = SwitchDef {
    kind: SwitchKind::MemoryTagging,
    predicates: &[
        pin(IsSystemApp, true),
        pin(NoNativeCode, true),
        pin(OptedInViaManifest, true),
    ],
    polarity: Polarity::Direct,
    default_setting: Some(DefaultSettingId::ForceAppMemtagByDefault),
    third_party_default: false,
    hardware_gate: Some(HardwareGate::MemoryTagging),
    has_notification: true,
};

// Stored setting is "allow"; the switch reads "deny".
static DENY_NATIVE_DEBUGGING: SwitchDef = SwitchDef {
    kind: SwitchKind::DenyNativeDebugging,
    predicates: &[pin(IsSystemApp, true)],
    polarity: Polarity::Inverted,
    default_setting: Some(DefaultSettingId::AllowNativeDebugByDefault),
    third_party_default: false,
    hardware_gate: None,
    has_notification: true,
};

pub fn switch_def(kind: SwitchKind) -> &'static SwitchDef {
    match kind {
        SwitchKind::ExtendedVaSpace => &EXTENDED_VA_SPACE,
        SwitchKind::HardenedMalloc => &HARDENED_MALLOC,
        SwitchKind::RestrictMemoryDynCodeLoading => &RESTRICT_MEMORY_DCL,
        SwitchKind::RestrictStorageDynCodeLoading => &RESTRICT_STORAGE_DCL,
        SwitchKind::RestrictWebViewDynCodeLoading => &RESTRICT_WEBVIEW_DCL,
        SwitchKind::MemoryTagging => &MEMORY_TAGGING,
        SwitchKind::DenyNativeDebugging => &DENY_NATIVE_DEBUGGING,
    }
}

/// The switch whose default is stored in `setting`.
pub fn switch_for_setting(setting: DefaultSettingId) -> SwitchKind {
    match setting {
        DefaultSettingId::RestrictMemoryDynCodeLoadingByDefault => {
            SwitchKind::RestrictMemoryDynCodeLoading
        }
        DefaultSettingId::RestrictStorageDynCodeLoadingByDefault => {
            SwitchKind::RestrictStorageDynCodeLoading
        }
        DefaultSettingId::RestrictWebviewDynCodeLoadingByDefault => {
            SwitchKind::RestrictWebViewDynCodeLoading
        }
        DefaultSettingId::ForceAppMemtagByDefault => SwitchKind::MemoryTagging,
        DefaultSettingId::AllowNativeDebugByDefault => SwitchKind::DenyNativeDebugging,
    }
}
