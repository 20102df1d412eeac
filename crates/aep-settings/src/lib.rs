//! aep-settings
//!
//! View models for the exploit protection settings: per-app entries, the
//! app detail page, the per-switch app list, the defaults screens, and the
//! setup wizard config provider. No rendering; callers pass the stores in.

mod adapter;
mod app_list;
mod availability;
mod defaults;
mod detail;
mod strings;
mod sud_config;

pub use adapter::{
    adapter, ListLinkRule, PreferenceModel, SwitchAdapter, EXPLOIT_PROTECTION_CATEGORY,
};
pub use app_list::{AppListPage, ListFilter, SpinnerOption};
pub use availability::{
    dev_mode, for_scope, global_setting, secondary_user_only, Availability, SettingsContext,
};
pub use defaults::{DefaultsScreen, DefaultsScreenDef, DefaultsView};
pub use detail::{AppDetailPage, DetailEntry, DetailView, RadioEntry, ToggleModel};
pub use strings::{setting_path, StringKey};
pub use sud_config::{
    Bundle, BundleValue, OverlayResource, SudConfigProvider, DEFAULT_THEME, OVERLAY_RESOURCES,
    SETTINGS_PACKAGE,
};
