//! Per-app detail page: Default / On / Off radio group plus the optional
//! notification toggle.

use crate::adapter::{adapter, SwitchAdapter};
use crate::availability::SettingsContext;
use crate::strings::{setting_path, StringKey};
use aep_switch::{
    default_value, is_supported, resolve, AppInfo, DefaultStore, DefaultValue, DefaultValueReason,
    OverrideState, OverrideStore, PackageState, Resolution, SwitchKind, SwitchOutcome,
};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DetailEntry {
    Default,
    On,
    Off,
}

impl DetailEntry {
    pub const ALL: [DetailEntry; 3] = [DetailEntry::Default, DetailEntry::On, DetailEntry::Off];

    pub fn override_state(&self) -> OverrideState {
        match self {
            DetailEntry::Default => OverrideState::Unset,
            DetailEntry::On => OverrideState::On,
            DetailEntry::Off => OverrideState::Off,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RadioEntry {
    pub entry: DetailEntry,
    pub title: String,
    pub checked: bool,
    pub enabled: bool,
    pub summary: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToggleModel {
    pub title: String,
    pub checked: bool,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub kind: SwitchKind,
    pub title: String,
    pub entries: Vec<RadioEntry>,
    pub notification_toggle: Option<ToggleModel>,
    /// "See all apps", leading to the app list page of this switch.
    pub app_list_link: String,
    pub footer: String,
    pub learn_more_url: Option<&'static str>,
}

impl DetailView {
    pub fn entry(&self, entry: DetailEntry) -> &RadioEntry {
        &self.entries[entry as usize]
    }

    pub fn checked(&self) -> DetailEntry {
        self.entries
            .iter()
            .find(|e| e.checked)
            .map(|e| e.entry)
            .unwrap_or_else(|| unreachable!("radio group with nothing checked"))
    }
}

pub struct AppDetailPage {
    adapter: &'static SwitchAdapter,
    ctx: SettingsContext,
    app: AppInfo,
}

impl AppDetailPage {
    /// `None` when the page must not exist: switch unsupported on this
    /// device, or the app is not installed for the user.
    pub fn new(kind: SwitchKind, ctx: SettingsContext, app: AppInfo) -> Option<Self> {
        if !is_supported(kind, &ctx.caps) || !app.installed {
            return None;
        }
        Some(Self {
            adapter: adapter(kind),
            ctx,
            app,
        })
    }

    pub fn kind(&self) -> SwitchKind {
        self.adapter.kind
    }

    pub fn app(&self) -> &AppInfo {
        &self.app
    }

    fn package_state(&self, overrides: &dyn OverrideStore) -> Option<PackageState> {
        overrides.get(&self.app.package_name, self.ctx.user)
    }

    fn resolve(&self, ps: Option<&PackageState>, defaults: &dyn DefaultStore) -> Resolution {
        match resolve(self.kind(), self.ctx.user, &self.app, ps, defaults, &self.ctx.caps) {
            SwitchOutcome::Resolved(r) => r,
            SwitchOutcome::Unsupported => unreachable!("detail page for unsupported switch"),
        }
    }

    fn default_value(&self, ps: Option<&PackageState>, defaults: &dyn DefaultStore) -> DefaultValue {
        default_value(self.kind(), self.ctx.user, &self.app, ps, defaults, &self.ctx.caps)
            .unwrap_or_else(|| unreachable!("detail page for unsupported switch"))
    }

    fn default_entry_summary(&self, dv: &DefaultValue) -> Option<String> {
        match dv.reason {
            // The owner can follow the path to the defaults screen.
            DefaultValueReason::DefaultSetting(_) if self.ctx.user.is_system() => {
                let path = setting_path(&[
                    StringKey::SafetyCenterTitle,
                    StringKey::ExploitProtectionSettings,
                ]);
                Some(StringKey::AepDvrDefaultSecuritySetting.format(&path))
            }
            _ => None,
        }
    }

    pub fn view(&self, overrides: &dyn OverrideStore, defaults: &dyn DefaultStore) -> DetailView {
        let ps = self.package_state(overrides);
        let res = self.resolve(ps.as_ref(), defaults);
        let dv = self.default_value(ps.as_ref(), defaults);
        let immutable = res.is_immutable();

        let mut def = RadioEntry {
            entry: DetailEntry::Default,
            title: self.adapter.default_title(dv.value),
            checked: res.is_default,
            enabled: !immutable,
            summary: None,
        };
        if def.enabled {
            def.summary = self.default_entry_summary(&dv);
        }

        let on_checked = !res.is_default && res.value;
        let mut on = RadioEntry {
            entry: DetailEntry::On,
            title: self.adapter.on_title.text().to_string(),
            checked: on_checked,
            enabled: on_checked || !immutable,
            summary: None,
        };

        let off_checked = !res.is_default && !res.value;
        let mut off = RadioEntry {
            entry: DetailEntry::Off,
            title: self.adapter.off_title.text().to_string(),
            checked: off_checked,
            enabled: off_checked || !immutable,
            summary: None,
        };

        if let Some(reason) = res.immutability {
            let text = Some(self.adapter.immutability_summary(reason).to_string());
            if res.value {
                on.summary = text;
            } else {
                off.summary = text;
            }
        }

        let notification_toggle = self.adapter.notification_toggle_title.map(|title| ToggleModel {
            title: title.text().to_string(),
            checked: ps
                .as_ref()
                .map_or(true, |p| p.is_notification_enabled(self.kind())),
            enabled: res.value,
        });

        DetailView {
            kind: self.kind(),
            title: self.adapter.short_title.text().to_string(),
            entries: vec![def, on, off],
            notification_toggle,
            app_list_link: StringKey::DefaultSeeAllAppsTitle.text().to_string(),
            footer: self.adapter.footer.text().to_string(),
            learn_more_url: self.adapter.learn_more_url,
        }
    }

    /// Write the override for `entry`. Returns false (and writes nothing)
    /// when the switch is immutable for this app.
    pub fn select(
        &self,
        entry: DetailEntry,
        overrides: &mut dyn OverrideStore,
        defaults: &dyn DefaultStore,
    ) -> bool {
        let ps = self.package_state(overrides);
        let res = self.resolve(ps.as_ref(), defaults);
        if let Some(reason) = res.immutability {
            warn!(
                switch = self.kind().as_str(),
                package = %self.app.package_name,
                user = self.ctx.user.0,
                reason = reason.code(),
                "ignoring selection for immutable switch"
            );
            return false;
        }

        let kind = self.kind();
        let state = entry.override_state();
        overrides.edit(&self.app.package_name, self.ctx.user, &mut |st| {
            st.set_override(kind, state)
        });
        info!(
            switch = kind.as_str(),
            package = %self.app.package_name,
            user = self.ctx.user.0,
            state = ?state,
            "app switch override updated"
        );
        true
    }

    /// Returns false when there is no toggle or the switch is currently off.
    pub fn set_notification_enabled(
        &self,
        enabled: bool,
        overrides: &mut dyn OverrideStore,
        defaults: &dyn DefaultStore,
    ) -> bool {
        if self.adapter.notification_toggle_title.is_none() {
            return false;
        }
        let ps = self.package_state(overrides);
        if !self.resolve(ps.as_ref(), defaults).value {
            warn!(
                switch = self.kind().as_str(),
                package = %self.app.package_name,
                "notification toggle is disabled while the switch is off"
            );
            return false;
        }

        let kind = self.kind();
        overrides.edit(&self.app.package_name, self.ctx.user, &mut |st| {
            st.set_notification_enabled(kind, enabled)
        });
        info!(
            switch = kind.as_str(),
            package = %self.app.package_name,
            user = self.ctx.user.0,
            enabled,
            "app switch notification updated"
        );
        true
    }
}
