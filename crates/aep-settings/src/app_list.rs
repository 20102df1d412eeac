//! "All apps" page for one switch, filtered by an Off/On spinner.

use crate::adapter::{adapter, SwitchAdapter};
use crate::strings::StringKey;
use aep_switch::{
    is_supported, resolve_for_package, AppInfo, DefaultStore, DeviceCaps, OverrideStore,
    SwitchKind, UserId,
};
use serde::Serialize;
use tracing::debug;

/// Spinner choice. Ids are the spinner positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ListFilter {
    Off = 0,
    On = 1,
}

impl ListFilter {
    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(ListFilter::Off),
            1 => Some(ListFilter::On),
            _ => None,
        }
    }

    pub fn value(&self) -> bool {
        matches!(self, ListFilter::On)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Some(ListFilter::Off),
            "on" => Some(ListFilter::On),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpinnerOption {
    pub filter: ListFilter,
    pub label: String,
}

pub struct AppListPage {
    adapter: &'static SwitchAdapter,
    caps: DeviceCaps,
    user: Option<UserId>,
    source: Vec<AppInfo>,
    /// Installed apps of `source`, sorted by package name.
    apps: Vec<AppInfo>,
    recomputations: u64,
}

impl AppListPage {
    /// Not constructed at all when the switch is unsupported.
    pub fn new(kind: SwitchKind, caps: DeviceCaps) -> Option<Self> {
        if !is_supported(kind, &caps) {
            return None;
        }
        Some(Self {
            adapter: adapter(kind),
            caps,
            user: None,
            source: Vec::new(),
            apps: Vec::new(),
            recomputations: 0,
        })
    }

    pub fn kind(&self) -> SwitchKind {
        self.adapter.kind
    }

    pub fn title(&self) -> &'static str {
        self.adapter.short_title.text()
    }

    pub fn spinner_options(&self) -> Vec<SpinnerOption> {
        [ListFilter::Off, ListFilter::On]
            .into_iter()
            .map(|filter| SpinnerOption {
                filter,
                label: self.adapter.state_label(filter.value()).text().to_string(),
            })
            .collect()
    }

    /// Installed apps, sorted by package name.
    pub fn transform(apps: &[AppInfo]) -> Vec<AppInfo> {
        let mut out: Vec<AppInfo> = apps.iter().filter(|a| a.installed).cloned().collect();
        out.sort_by(|a, b| a.package_name.cmp(&b.package_name));
        out
    }

    /// Feed the current user and installed-app set. The app list is only
    /// rebuilt when either changed; returns whether it was.
    pub fn update(&mut self, user: UserId, apps: &[AppInfo]) -> bool {
        if self.user == Some(user) && self.source.as_slice() == apps {
            return false;
        }
        self.user = Some(user);
        self.source = apps.to_vec();
        self.apps = Self::transform(apps);
        self.recomputations += 1;
        debug!(
            switch = self.kind().as_str(),
            user = user.0,
            apps = self.apps.len(),
            "app list recomputed"
        );
        true
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Apps whose resolved value matches `filter`. Empty before the first
    /// `update`.
    pub fn filter(
        &self,
        filter: ListFilter,
        overrides: &dyn OverrideStore,
        defaults: &dyn DefaultStore,
    ) -> Vec<&AppInfo> {
        let Some(user) = self.user else {
            return Vec::new();
        };
        self.apps
            .iter()
            .filter(|app| {
                resolve_for_package(self.kind(), user, app, overrides, defaults, &self.caps).value()
                    == Some(filter.value())
            })
            .collect()
    }

    pub fn see_all_apps_title() -> &'static str {
        StringKey::DefaultSeeAllAppsTitle.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_ids_are_positions() {
        assert_eq!(ListFilter::Off.id(), 0);
        assert_eq!(ListFilter::On.id(), 1);
        assert_eq!(ListFilter::from_id(1), Some(ListFilter::On));
        assert_eq!(ListFilter::from_id(2), None);
    }

    #[test]
    fn unsupported_switch_has_no_page() {
        assert!(AppListPage::new(SwitchKind::MemoryTagging, DeviceCaps::without_memory_tagging())
            .is_none());
        assert!(AppListPage::new(SwitchKind::MemoryTagging, DeviceCaps::all()).is_some());
    }
}
