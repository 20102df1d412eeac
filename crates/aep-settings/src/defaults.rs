//! Screens for the process-wide default of a switch.
//!
//! The main switch reads and writes the default store directly; the stored
//! value goes through the switch polarity in both directions.

use crate::availability::{self, Availability, SettingsContext};
use crate::strings::StringKey;
use aep_switch::{is_supported, switch_def, DefaultSettingId, DefaultStore, Polarity, SwitchKind};
use anyhow::{bail, Result};
use serde::Serialize;
use tracing::info;

#[derive(Debug)]
pub struct DefaultsScreenDef {
    pub kind: SwitchKind,
    pub title: StringKey,
    pub main_switch_title: StringKey,
    pub main_switch_summary: Option<StringKey>,
    pub summary_checked: StringKey,
    pub summary_unchecked: StringKey,
    /// Paragraphs, joined with a blank line.
    pub footer: &'static [StringKey],
}

static SCREENS: [DefaultsScreenDef; 5] = [
    DefaultsScreenDef {
        kind: SwitchKind::RestrictMemoryDynCodeLoading,
        title: StringKey::AepMemoryDclShort,
        main_switch_title: StringKey::AepDefaultMainSwitchRestrictFor3pApps,
        main_switch_summary: None,
        summary_checked: StringKey::AepDefaultSummaryRestricted,
        summary_unchecked: StringKey::AepDefaultSummaryAllowedFor3pApps,
        footer: &[
            StringKey::AppExploitProtectionDefaultValueWarning,
            StringKey::AepMemoryDclFooter,
            StringKey::AepDefaultDclFooterEnding,
        ],
    },
    DefaultsScreenDef {
        kind: SwitchKind::RestrictStorageDynCodeLoading,
        title: StringKey::AepStorageDclShort,
        main_switch_title: StringKey::AepDefaultMainSwitchRestrictFor3pApps,
        main_switch_summary: None,
        summary_checked: StringKey::AepDefaultSummaryRestricted,
        summary_unchecked: StringKey::AepDefaultSummaryAllowedFor3pApps,
        footer: &[
            StringKey::AppExploitProtectionDefaultValueWarning,
            StringKey::AepStorageDclFooter,
            StringKey::AepDefaultDclFooterEnding,
        ],
    },
    DefaultsScreenDef {
        kind: SwitchKind::RestrictWebViewDynCodeLoading,
        title: StringKey::AepWebviewJit,
        main_switch_title: StringKey::AepDefaultMainSwitchDisableFor3pApps,
        main_switch_summary: None,
        summary_checked: StringKey::AepDefaultSummaryDisabled,
        summary_unchecked: StringKey::AepDefaultSummaryEnabledFor3pApps,
        footer: &[StringKey::AepWebviewJitFooter],
    },
    DefaultsScreenDef {
        kind: SwitchKind::MemoryTagging,
        title: StringKey::AepMemtag,
        main_switch_title: StringKey::AepDefaultMemtagMainSwitchTitle,
        main_switch_summary: Some(StringKey::AepDefaultMemtagMainSwitchSummary),
        summary_checked: StringKey::AepDefaultMemtagSummaryOn,
        summary_unchecked: StringKey::AepDefaultMemtagSummaryOff,
        footer: &[
            StringKey::AepDefaultMemtagFooter,
            StringKey::AppExploitProtectionDefaultValueWarning,
        ],
    },
    DefaultsScreenDef {
        kind: SwitchKind::DenyNativeDebugging,
        title: StringKey::AepNativeDebugTitle,
        main_switch_title: StringKey::AepDefaultMainSwitchBlockFor3pApps,
        main_switch_summary: None,
        summary_checked: StringKey::AepDefaultSummaryBlocked,
        summary_unchecked: StringKey::AepDefaultSummaryAllowedFor3pApps,
        footer: &[
            StringKey::AepNativeDebugFooter,
            StringKey::AppExploitProtectionDefaultValueWarning,
        ],
    },
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DefaultsView {
    pub kind: SwitchKind,
    pub setting: DefaultSettingId,
    pub availability: Availability,
    pub title: String,
    pub main_switch_title: String,
    pub main_switch_summary: Option<String>,
    pub checked: bool,
    /// Summary of the entry on the exploit protection screen.
    pub summary: String,
    pub footer: String,
    /// "See all apps"; absent when the app list page cannot exist.
    pub app_list_link: Option<String>,
}

pub struct DefaultsScreen {
    def: &'static DefaultsScreenDef,
    setting: DefaultSettingId,
    polarity: Polarity,
    ctx: SettingsContext,
}

impl DefaultsScreen {
    /// `None` for switches without a default setting.
    pub fn new(kind: SwitchKind, ctx: SettingsContext) -> Option<Self> {
        let sw = switch_def(kind);
        let setting = sw.default_setting?;
        let def = SCREENS.iter().find(|s| s.kind == kind)?;
        Some(Self {
            def,
            setting,
            polarity: sw.polarity,
            ctx,
        })
    }

    pub fn kind(&self) -> SwitchKind {
        self.def.kind
    }

    pub fn setting(&self) -> DefaultSettingId {
        self.setting
    }

    pub fn availability(&self) -> Availability {
        if !is_supported(self.kind(), &self.ctx.caps) {
            return Availability::UnsupportedOnDevice;
        }
        availability::for_scope(self.setting.scope(), &self.ctx)
    }

    pub fn is_checked(&self, defaults: &dyn DefaultStore) -> bool {
        self.polarity.apply(defaults.get(self.setting, self.ctx.user))
    }

    pub fn set_checked(&self, defaults: &mut dyn DefaultStore, checked: bool) -> Result<()> {
        let availability = self.availability();
        if !availability.is_available() {
            bail!(
                "default for {} is not editable here: {}",
                self.kind().as_str(),
                availability.as_str()
            );
        }
        let stored = self.polarity.apply(checked);
        defaults.set(self.setting, self.ctx.user, stored);
        info!(
            setting = self.setting.key(),
            user = self.ctx.user.0,
            checked,
            stored,
            "default setting updated"
        );
        Ok(())
    }

    pub fn summary(&self, defaults: &dyn DefaultStore) -> &'static str {
        if self.is_checked(defaults) {
            self.def.summary_checked.text()
        } else {
            self.def.summary_unchecked.text()
        }
    }

    pub fn footer(&self) -> String {
        self.def
            .footer
            .iter()
            .map(|k| k.text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn view(&self, defaults: &dyn DefaultStore) -> DefaultsView {
        let supported = is_supported(self.kind(), &self.ctx.caps);
        DefaultsView {
            kind: self.kind(),
            setting: self.setting,
            availability: self.availability(),
            title: self.def.title.text().to_string(),
            main_switch_title: self.def.main_switch_title.text().to_string(),
            main_switch_summary: self.def.main_switch_summary.map(|k| k.text().to_string()),
            checked: self.is_checked(defaults),
            summary: self.summary(defaults).to_string(),
            footer: self.footer(),
            app_list_link: supported.then(|| StringKey::DefaultSeeAllAppsTitle.text().to_string()),
        }
    }
}
