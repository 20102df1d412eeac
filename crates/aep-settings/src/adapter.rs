//! Per-switch presentation table.
//!
//! One [`SwitchAdapter`] row per [`SwitchKind`]: the resolver decides values,
//! the adapter decides how they read.

use crate::availability::{self, Availability, SettingsContext};
use crate::strings::StringKey;
use aep_switch::{
    is_supported, resolve, AppInfo, DefaultStore, ImmutabilityReason, PackageState, Resolution,
    SwitchKind, SwitchOutcome,
};
use serde::Serialize;

pub const EXPLOIT_PROTECTION_CATEGORY: &str = "exploit_protection";

/// Who may open the "all apps" list for a switch from the exploit
/// protection screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListLinkRule {
    Always,
    DevMode,
    /// The owner gets there through the defaults screen.
    SecondaryUserOnly,
}

#[derive(Debug)]
pub struct SwitchAdapter {
    pub kind: SwitchKind,
    pub title: StringKey,
    pub short_title: StringKey,
    pub on_title: StringKey,
    pub off_title: StringKey,
    pub notification_toggle_title: Option<StringKey>,
    pub footer: StringKey,
    pub learn_more_url: Option<&'static str>,
    /// Per-app entries are hidden unless developer options are on.
    pub requires_dev_mode: bool,
    pub list_link: ListLinkRule,
}

// Rows in `SwitchKind` declaration order.
static ADAPTERS: [SwitchAdapter; 7] = [
    SwitchAdapter {
        kind: SwitchKind::ExtendedVaSpace,
        title: StringKey::AepExtVaSpace,
        short_title: StringKey::AepExtVaSpace,
        on_title: StringKey::AepEnabled,
        off_title: StringKey::AepDisabled,
        notification_toggle_title: None,
        footer: StringKey::AepExtVaSpaceFooter,
        learn_more_url: None,
        requires_dev_mode: true,
        list_link: ListLinkRule::DevMode,
    },
    SwitchAdapter {
        kind: SwitchKind::HardenedMalloc,
        title: StringKey::AepHmalloc,
        short_title: StringKey::AepHmalloc,
        on_title: StringKey::AepEnabled,
        off_title: StringKey::AepDisabled,
        notification_toggle_title: None,
        footer: StringKey::AepHmallocFooter,
        learn_more_url: Some("https://grapheneos.org/features#exploit-mitigations"),
        requires_dev_mode: false,
        list_link: ListLinkRule::Always,
    },
    SwitchAdapter {
        kind: SwitchKind::RestrictMemoryDynCodeLoading,
        title: StringKey::AepMemoryDcl,
        short_title: StringKey::AepMemoryDclShort,
        on_title: StringKey::AepRestricted,
        off_title: StringKey::AepAllowed,
        notification_toggle_title: Some(StringKey::DclNotifToggleTitle),
        footer: StringKey::AepMemoryDclFooter,
        learn_more_url: None,
        requires_dev_mode: false,
        list_link: ListLinkRule::SecondaryUserOnly,
    },
    SwitchAdapter {
        kind: SwitchKind::RestrictStorageDynCodeLoading,
        title: StringKey::AepStorageDcl,
        short_title: StringKey::AepStorageDclShort,
        on_title: StringKey::AepRestricted,
        off_title: StringKey::AepAllowed,
        notification_toggle_title: Some(StringKey::DclNotifToggleTitle),
        footer: StringKey::AepStorageDclFooter,
        learn_more_url: None,
        requires_dev_mode: false,
        list_link: ListLinkRule::SecondaryUserOnly,
    },
    // On means the JIT is off.
    SwitchAdapter {
        kind: SwitchKind::RestrictWebViewDynCodeLoading,
        title: StringKey::AepWebviewJit,
        short_title: StringKey::AepWebviewJit,
        on_title: StringKey::AepDisabled,
        off_title: StringKey::AepEnabled,
        notification_toggle_title: None,
        footer: StringKey::AepWebviewJitFooter,
        learn_more_url: None,
        requires_dev_mode: false,
        list_link: ListLinkRule::SecondaryUserOnly,
    },
    SwitchAdapter {
        kind: SwitchKind::MemoryTagging,
        title: StringKey::AepMemtag,
        short_title: StringKey::AepMemtag,
        on_title: StringKey::AepEnabled,
        off_title: StringKey::AepDisabled,
        notification_toggle_title: Some(StringKey::AepMemtagNotifToggleTitle),
        footer: StringKey::AepMemtagFooter,
        learn_more_url: None,
        requires_dev_mode: false,
        list_link: ListLinkRule::SecondaryUserOnly,
    },
    SwitchAdapter {
        kind: SwitchKind::DenyNativeDebugging,
        title: StringKey::AepNativeDebugTitle,
        short_title: StringKey::AepNativeDebugTitle,
        on_title: StringKey::AepBlocked,
        off_title: StringKey::AepAllowed,
        notification_toggle_title: Some(StringKey::AepNativeDebugNotifToggleTitle),
        footer: StringKey::AepNativeDebugFooter,
        learn_more_url: None,
        requires_dev_mode: false,
        list_link: ListLinkRule::SecondaryUserOnly,
    },
];

pub fn adapter(kind: SwitchKind) -> &'static SwitchAdapter {
    &ADAPTERS[kind as usize]
}

/// Summary line of a per-app entry on the app info screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PreferenceModel {
    pub kind: SwitchKind,
    pub title: String,
    pub summary: String,
}

impl SwitchAdapter {
    pub fn state_label(&self, value: bool) -> StringKey {
        if value {
            self.on_title
        } else {
            self.off_title
        }
    }

    /// "Default (Enabled)" style title of the default choice.
    pub fn default_title(&self, default_value: bool) -> String {
        StringKey::AepDefault.format(self.state_label(default_value).text())
    }

    pub fn preference_summary(&self, resolution: &Resolution) -> String {
        if resolution.is_default {
            self.default_title(resolution.value)
        } else {
            self.state_label(resolution.value).text().to_string()
        }
    }

    pub fn immutability_text(&self, reason: ImmutabilityReason) -> Option<StringKey> {
        use ImmutabilityReason::*;
        use SwitchKind::*;
        let key = match (self.kind, reason) {
            (HardenedMalloc, IsSystemApp) => StringKey::AepHmallocIrPreinstalledApp,
            (HardenedMalloc, NoNativeCode) => StringKey::AepHmallocIrNoNativeCode,
            (HardenedMalloc, NonSixtyFourBitNativeCode) => StringKey::AepHmallocIr32BitNativeCode,
            (HardenedMalloc, IsDebuggableApp) => StringKey::AepHmallocIrDebuggableApp,
            (ExtendedVaSpace, RequiredByHardenedMalloc) => StringKey::AepExtVaSpaceIrHardenedMalloc,
            (ExtendedVaSpace, NonSixtyFourBitNativeCode) => {
                StringKey::AepExtVaSpaceIr32BitNativeCode
            }
            (MemoryTagging, IsSystemApp) => StringKey::AepMemtagDvrIsSystemApp,
            (MemoryTagging, NoNativeCode) => StringKey::AepMemtagDvrNoNativeCode,
            (MemoryTagging, OptedInViaManifest) => StringKey::AepMemtagDvrManifestOptIn,
            (RestrictMemoryDynCodeLoading, IsSystemApp) => StringKey::AepMemoryDclDvrIsSystemApp,
            (RestrictStorageDynCodeLoading, IsSystemApp) => StringKey::AepStorageDclDvrIsSystemApp,
            (DenyNativeDebugging, IsSystemApp) => StringKey::AepNativeDebugDvrIsSystemApp,
            _ => return None,
        };
        Some(key)
    }

    /// Text for a reason the resolver produced for this switch.
    ///
    /// Panics on a reason the switch has no predicate for.
    pub fn immutability_summary(&self, reason: ImmutabilityReason) -> &'static str {
        match self.immutability_text(reason) {
            Some(key) => key.text(),
            None => unreachable!(
                "{} never reports immutability reason {}",
                self.kind.as_str(),
                reason.code()
            ),
        }
    }

    /// Entry on the app info screen; `None` hides it.
    pub fn app_preference(
        &self,
        ctx: &SettingsContext,
        app: &AppInfo,
        package_state: Option<&PackageState>,
        defaults: &dyn DefaultStore,
    ) -> Option<PreferenceModel> {
        if !app.installed {
            return None;
        }
        if self.requires_dev_mode && !ctx.dev_mode_enabled {
            return None;
        }
        let resolution = match resolve(self.kind, ctx.user, app, package_state, defaults, &ctx.caps)
        {
            SwitchOutcome::Unsupported => return None,
            SwitchOutcome::Resolved(r) => r,
        };
        Some(PreferenceModel {
            kind: self.kind,
            title: self.title.text().to_string(),
            summary: self.preference_summary(&resolution),
        })
    }

    /// Availability of the "all apps" link on the exploit protection screen.
    pub fn list_link_availability(&self, ctx: &SettingsContext) -> Availability {
        if !is_supported(self.kind, &ctx.caps) {
            return Availability::UnsupportedOnDevice;
        }
        match self.list_link {
            ListLinkRule::Always => Availability::Available,
            ListLinkRule::DevMode => availability::dev_mode(ctx),
            ListLinkRule::SecondaryUserOnly => availability::secondary_user_only(ctx),
        }
    }

    pub fn category(&self) -> &'static str {
        EXPLOIT_PROTECTION_CATEGORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aep_switch::switch_def;

    #[test]
    fn one_row_per_kind() {
        for kind in SwitchKind::ALL {
            assert_eq!(adapter(kind).kind, kind);
        }
    }

    #[test]
    fn every_predicate_has_text() {
        for kind in SwitchKind::ALL {
            let a = adapter(kind);
            for p in switch_def(kind).predicates {
                assert!(
                    a.immutability_text(p.reason).is_some(),
                    "{kind:?} / {:?}",
                    p.reason
                );
            }
        }
    }

    #[test]
    fn webview_labels_are_inverted() {
        let a = adapter(SwitchKind::RestrictWebViewDynCodeLoading);
        assert_eq!(a.state_label(true).text(), "Disabled");
        assert_eq!(a.state_label(false).text(), "Enabled");
    }
}
