use aep_switch::{DeviceCaps, SettingScope, UserId};
use serde::Serialize;

/// Whether a settings entry point is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Availability {
    Available,
    /// Hidden until some device state changes (developer options).
    ConditionallyUnavailable,
    /// Exists, but not for the current user.
    DisabledForUser,
    /// The feature does not exist on this device.
    UnsupportedOnDevice,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "AVAILABLE",
            Availability::ConditionallyUnavailable => "CONDITIONALLY_UNAVAILABLE",
            Availability::DisabledForUser => "DISABLED_FOR_USER",
            Availability::UnsupportedOnDevice => "UNSUPPORTED_ON_DEVICE",
        }
    }
}

/// Device/user state the surfaces depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettingsContext {
    pub user: UserId,
    pub dev_mode_enabled: bool,
    pub caps: DeviceCaps,
}

impl SettingsContext {
    pub fn new(user: UserId, caps: DeviceCaps) -> Self {
        Self {
            user,
            dev_mode_enabled: false,
            caps,
        }
    }

    pub fn with_dev_mode(mut self, enabled: bool) -> Self {
        self.dev_mode_enabled = enabled;
        self
    }
}

/// Device-wide settings are changed by the owner only.
pub fn global_setting(ctx: &SettingsContext) -> Availability {
    if ctx.user.is_system() {
        Availability::Available
    } else {
        Availability::DisabledForUser
    }
}

/// The owner reaches these through the defaults screens instead.
pub fn secondary_user_only(ctx: &SettingsContext) -> Availability {
    if ctx.user.is_system() {
        Availability::DisabledForUser
    } else {
        Availability::Available
    }
}

pub fn dev_mode(ctx: &SettingsContext) -> Availability {
    if ctx.dev_mode_enabled {
        Availability::Available
    } else {
        Availability::ConditionallyUnavailable
    }
}

pub fn for_scope(scope: SettingScope, ctx: &SettingsContext) -> Availability {
    match scope {
        SettingScope::Global => global_setting(ctx),
        SettingScope::PerUser => Availability::Available,
    }
}
