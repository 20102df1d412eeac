//! String resources (English).
//!
//! Surfaces carry `StringKey`s; text is looked up at the edge. `%s` is the
//! only placeholder used.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringKey {
    // Switch titles
    AepHmalloc,
    AepExtVaSpace,
    AepMemoryDcl,
    AepMemoryDclShort,
    AepStorageDcl,
    AepStorageDclShort,
    AepWebviewJit,
    AepMemtag,
    AepNativeDebugTitle,

    // State labels
    AepDefault,
    AepEnabled,
    AepDisabled,
    AepRestricted,
    AepAllowed,
    AepBlocked,

    // Notification toggles
    AepMemtagNotifToggleTitle,
    DclNotifToggleTitle,
    AepNativeDebugNotifToggleTitle,

    // Immutability reasons
    AepHmallocIrPreinstalledApp,
    AepHmallocIrNoNativeCode,
    AepHmallocIr32BitNativeCode,
    AepHmallocIrDebuggableApp,
    AepExtVaSpaceIrHardenedMalloc,
    AepExtVaSpaceIr32BitNativeCode,
    AepMemtagDvrIsSystemApp,
    AepMemtagDvrNoNativeCode,
    AepMemtagDvrManifestOptIn,
    AepMemoryDclDvrIsSystemApp,
    AepStorageDclDvrIsSystemApp,
    AepNativeDebugDvrIsSystemApp,

    // Default value reasons
    AepDvrDefaultSecuritySetting,
    SafetyCenterTitle,
    ExploitProtectionSettings,

    // Footers
    AepHmallocFooter,
    AepExtVaSpaceFooter,
    AepMemtagFooter,
    AepMemoryDclFooter,
    AepStorageDclFooter,
    AepWebviewJitFooter,
    AepNativeDebugFooter,

    // Defaults screens
    AppExploitProtectionDefaultValueWarning,
    AepDefaultDclFooterEnding,
    AepDefaultMemtagFooter,
    AepDefaultMainSwitchRestrictFor3pApps,
    AepDefaultMainSwitchDisableFor3pApps,
    AepDefaultMainSwitchBlockFor3pApps,
    AepDefaultMemtagMainSwitchTitle,
    AepDefaultMemtagMainSwitchSummary,
    AepDefaultSummaryRestricted,
    AepDefaultSummaryAllowedFor3pApps,
    AepDefaultSummaryDisabled,
    AepDefaultSummaryEnabledFor3pApps,
    AepDefaultSummaryBlocked,
    AepDefaultMemtagSummaryOn,
    AepDefaultMemtagSummaryOff,
    DefaultSeeAllAppsTitle,
}

impl StringKey {
    pub fn text(&self) -> &'static str {
        use StringKey::*;
        match self {
            AepHmalloc => "Hardened memory allocator",
            AepExtVaSpace => "Extended virtual address space",
            AepMemoryDcl => "Restrict dynamic code loading via memory",
            AepMemoryDclShort => "Dynamic code loading via memory",
            AepStorageDcl => "Restrict dynamic code loading via storage",
            AepStorageDclShort => "Dynamic code loading via storage",
            AepWebviewJit => "WebView JIT compiler",
            AepMemtag => "Memory tagging",
            AepNativeDebugTitle => "Native code debugging",

            AepDefault => "Default (%s)",
            AepEnabled => "Enabled",
            AepDisabled => "Disabled",
            AepRestricted => "Restricted",
            AepAllowed => "Allowed",
            AepBlocked => "Blocked",

            AepMemtagNotifToggleTitle => "Notify about memory tagging crashes",
            DclNotifToggleTitle => "Notify about blocked dynamic code loading",
            AepNativeDebugNotifToggleTitle => "Notify about blocked native code debugging",

            AepHmallocIrPreinstalledApp => "Always enabled for preinstalled apps",
            AepHmallocIrNoNativeCode => "Always enabled for apps that don’t have native code",
            AepHmallocIr32BitNativeCode => "Not supported for apps that have 32-bit native code",
            AepHmallocIrDebuggableApp => "Always disabled for debuggable apps",
            AepExtVaSpaceIrHardenedMalloc => "Required by hardened memory allocator",
            AepExtVaSpaceIr32BitNativeCode => "Not supported for apps that have 32-bit native code",
            AepMemtagDvrIsSystemApp => "Always enabled for preinstalled apps",
            AepMemtagDvrNoNativeCode => "Always enabled for apps that don’t have native code",
            AepMemtagDvrManifestOptIn => "Enabled by the app itself",
            AepMemoryDclDvrIsSystemApp => {
                "Preinstalled apps are covered by the operating system’s own policy"
            }
            AepStorageDclDvrIsSystemApp => {
                "Preinstalled apps are covered by the operating system’s own policy"
            }
            AepNativeDebugDvrIsSystemApp => "Always blocked for preinstalled apps",

            AepDvrDefaultSecuritySetting => "Default value is set by the “%s” setting",
            SafetyCenterTitle => "Security & privacy",
            ExploitProtectionSettings => "Exploit protection",

            AepHmallocFooter => {
                "Hardened memory allocator provides substantial protection against memory \
                 corruption vulnerabilities in native code."
            }
            AepExtVaSpaceFooter => {
                "Extended virtual address space increases the entropy of address space \
                 layout randomization."
            }
            AepMemtagFooter => {
                "Memory tagging detects memory corruption bugs and stops exploitation of \
                 them in native code."
            }
            AepMemoryDclFooter => {
                "Restricting dynamic code loading via memory prevents the app from \
                 creating executable code at runtime."
            }
            AepStorageDclFooter => {
                "Restricting dynamic code loading via storage prevents the app from \
                 loading code that isn’t part of its installed package."
            }
            AepWebviewJitFooter => {
                "Disabling the WebView JIT compiler reduces attack surface at the cost of \
                 JavaScript performance."
            }
            AepNativeDebugFooter => {
                "Blocking native code debugging prevents the app from being inspected \
                 with ptrace-based debuggers."
            }

            AppExploitProtectionDefaultValueWarning => {
                "This setting applies to apps that don’t have an app-specific value set."
            }
            AepDefaultDclFooterEnding => {
                "Apps that are known to need dynamic code loading may stop working."
            }
            AepDefaultMemtagFooter => {
                "Memory tagging is always enabled for the operating system and for apps \
                 that opt in or don’t have native code."
            }
            AepDefaultMainSwitchRestrictFor3pApps => "Restrict for third-party apps",
            AepDefaultMainSwitchDisableFor3pApps => "Disable for third-party apps",
            AepDefaultMainSwitchBlockFor3pApps => "Block for third-party apps",
            AepDefaultMemtagMainSwitchTitle => "Enable by default for third-party apps",
            AepDefaultMemtagMainSwitchSummary => "Apps that are incompatible can be excluded individually",
            AepDefaultSummaryRestricted => "Restricted",
            AepDefaultSummaryAllowedFor3pApps => "Allowed for third-party apps",
            AepDefaultSummaryDisabled => "Disabled",
            AepDefaultSummaryEnabledFor3pApps => "Enabled for third-party apps",
            AepDefaultSummaryBlocked => "Blocked",
            AepDefaultMemtagSummaryOn => "Enabled for all apps",
            AepDefaultMemtagSummaryOff => "Enabled for compatible apps",
            DefaultSeeAllAppsTitle => "See all apps",
        }
    }

    /// `text()` with the first `%s` replaced by `arg`.
    pub fn format(&self, arg: &str) -> String {
        self.text().replacen("%s", arg, 1)
    }
}

/// `A > B > C` navigation path to a setting.
pub fn setting_path(parts: &[StringKey]) -> String {
    parts
        .iter()
        .map(|p| p.text())
        .collect::<Vec<_>>()
        .join(" > ")
}
