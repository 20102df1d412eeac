//! Setup wizard config provider: answers `call(method)` queries with a
//! bundle.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub const SETTINGS_PACKAGE: &str = "com.android.settings";
pub const DEFAULT_THEME: &str = "glif_v4_light";

/// Methods answered with `true`.
const ENABLED_FEATURES: [&str; 7] = [
    "applyGlifThemeControlledTransition",
    "isDynamicColorEnabled",
    "isEmbeddedActivityOnePaneEnabled",
    "isFullDynamicColorEnabled",
    "IsMaterialYouStyleEnabled",
    "isNeutralButtonStyleEnabled",
    "isSuwDayNightEnabled",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayResource {
    pub name: &'static str,
    pub id: i32,
}

/// Resources forwarded through `getOverlayConfig`.
pub const OVERLAY_RESOURCES: [OverlayResource; 7] = [
    OverlayResource {
        name: "setup_design_card_view_intrinsic_height",
        id: 0x7f07_0410,
    },
    OverlayResource {
        name: "setup_design_card_view_intrinsic_width",
        id: 0x7f07_0411,
    },
    OverlayResource {
        name: "setup_compat_light_navigation_bar",
        id: 0x7f05_0031,
    },
    OverlayResource {
        name: "setup_compat_light_status_bar",
        id: 0x7f05_0032,
    },
    OverlayResource {
        name: "setup_compat_footer_primary_button_bg_color",
        id: 0x7f06_0318,
    },
    OverlayResource {
        name: "setup_compat_footer_button_radius",
        id: 0x7f07_03f2,
    },
    OverlayResource {
        name: "setup_compat_footer_button_ripple_alpha",
        id: 0x7f0b_0005,
    },
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BundleValue {
    Str(String),
    Bool(bool),
    Int(i32),
    Bundle(Bundle),
}

pub type Bundle = BTreeMap<String, BundleValue>;

#[derive(Clone, Debug)]
pub struct SudConfigProvider {
    default_theme: String,
    device_name: String,
    model: String,
}

impl SudConfigProvider {
    /// `theme_property` is the `setupwizard.theme` system property; empty
    /// falls back to [`DEFAULT_THEME`].
    pub fn new(theme_property: &str, device_name: &str, model: &str) -> Self {
        let default_theme = if theme_property.is_empty() {
            DEFAULT_THEME.to_string()
        } else {
            theme_property.to_string()
        };
        Self {
            default_theme,
            device_name: device_name.to_string(),
            model: model.to_string(),
        }
    }

    pub fn default_theme(&self) -> &str {
        &self.default_theme
    }

    /// User-set device name, else the model.
    pub fn device_name(&self) -> &str {
        if self.device_name.is_empty() {
            &self.model
        } else {
            &self.device_name
        }
    }

    /// Unknown methods get an empty bundle.
    pub fn call(&self, method: &str, caller: Option<&str>) -> Bundle {
        debug!(method, caller = caller.unwrap_or(""), "sud config call");

        let mut bundle = Bundle::new();
        match method {
            "suwDefaultThemeString" => {
                bundle.insert(method.into(), BundleValue::Str(self.default_theme.clone()));
            }
            m if ENABLED_FEATURES.contains(&m) => {
                bundle.insert(method.into(), BundleValue::Bool(true));
            }
            "getDeviceName" => {
                bundle.insert(method.into(), BundleValue::Str(self.device_name().into()));
            }
            "getOverlayConfig" => fill_overlay_config(&mut bundle),
            _ => {}
        }
        bundle
    }
}

fn fill_overlay_config(bundle: &mut Bundle) {
    for res in OVERLAY_RESOURCES {
        let mut config = Bundle::new();
        config.insert("packageName".into(), BundleValue::Str(SETTINGS_PACKAGE.into()));
        config.insert("resourceName".into(), BundleValue::Str(res.name.into()));
        config.insert("resourceId".into(), BundleValue::Int(res.id));
        bundle.insert(res.name.into(), BundleValue::Bundle(config));
    }
}
