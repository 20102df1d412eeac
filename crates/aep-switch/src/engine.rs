use crate::{
    switch_def, AppInfo, DefaultStore, DefaultValue, DefaultValueReason, DeviceCaps,
    HardwareGate, ImmutabilityReason, OverrideStore, PackageState, Predicate, Resolution,
    SwitchKind, SwitchOutcome, UserId,
};

// ---------------------------------------------------------------------------
// Capability gate
// ---------------------------------------------------------------------------

/// False when the switch does not exist on this device at all.
pub fn is_supported(kind: SwitchKind, caps: &DeviceCaps) -> bool {
    match switch_def(kind).hardware_gate {
        None => true,
        Some(HardwareGate::MemoryTagging) => caps.memory_tagging,
        Some(HardwareGate::ExtendedVaSpace) => caps.extended_va_space,
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// First predicate of `kind` that applies to `app`, in table priority order.
pub fn find_immutability(
    kind: SwitchKind,
    user: UserId,
    app: &AppInfo,
    package_state: Option<&PackageState>,
    defaults: &dyn DefaultStore,
) -> Option<Predicate> {
    switch_def(kind)
        .predicates
        .iter()
        .find(|p| predicate_matches(p.reason, user, app, package_state, defaults))
        .copied()
}

fn predicate_matches(
    reason: ImmutabilityReason,
    user: UserId,
    app: &AppInfo,
    package_state: Option<&PackageState>,
    defaults: &dyn DefaultStore,
) -> bool {
    match reason {
        ImmutabilityReason::IsSystemApp => app.is_system_app,
        ImmutabilityReason::NoNativeCode => !app.has_native_code,
        ImmutabilityReason::NonSixtyFourBitNativeCode => app.has_non_64_bit_native_code(),
        ImmutabilityReason::IsDebuggableApp => app.is_debuggable,
        ImmutabilityReason::OptedInViaManifest => app.memtag_manifest_opt_in,
        ImmutabilityReason::RequiredByHardenedMalloc => {
            // The allocator is never gated, so the caps passed here are irrelevant.
            let hm = resolve_supported(
                SwitchKind::HardenedMalloc,
                user,
                app,
                package_state,
                defaults,
            );
            hm.value
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve one switch for one app.
///
/// Order:
/// 1. hardware gate (unsupported => no surface at all)
/// 2. immutability predicates, first match wins (before the override)
/// 3. explicit per-app override
/// 4. process-wide default, through the switch polarity
pub fn resolve(
    kind: SwitchKind,
    user: UserId,
    app: &AppInfo,
    package_state: Option<&PackageState>,
    defaults: &dyn DefaultStore,
    caps: &DeviceCaps,
) -> SwitchOutcome {
    if !is_supported(kind, caps) {
        return SwitchOutcome::Unsupported;
    }
    SwitchOutcome::Resolved(resolve_supported(kind, user, app, package_state, defaults))
}

fn resolve_supported(
    kind: SwitchKind,
    user: UserId,
    app: &AppInfo,
    package_state: Option<&PackageState>,
    defaults: &dyn DefaultStore,
) -> Resolution {
    if let Some(p) = find_immutability(kind, user, app, package_state, defaults) {
        return Resolution {
            value: p.forced_value,
            is_default: false,
            immutability: Some(p.reason),
        };
    }

    let ov = package_state
        .map(|ps| ps.override_for(kind))
        .unwrap_or_default();
    if let Some(v) = ov.value() {
        return Resolution {
            value: v,
            is_default: false,
            immutability: None,
        };
    }

    Resolution {
        value: mutable_default(kind, user, defaults).value,
        is_default: true,
        immutability: None,
    }
}

fn mutable_default(kind: SwitchKind, user: UserId, defaults: &dyn DefaultStore) -> DefaultValue {
    let def = switch_def(kind);
    match def.default_setting {
        Some(setting) => DefaultValue {
            value: def.polarity.apply(defaults.get(setting, user)),
            reason: DefaultValueReason::DefaultSetting(setting),
        },
        None => DefaultValue {
            value: def.third_party_default,
            reason: DefaultValueReason::ThirdPartyBaseline,
        },
    }
}

/// What the "Default" choice means for this app, ignoring its own override.
///
/// `None` when the switch is unsupported on this device.
pub fn default_value(
    kind: SwitchKind,
    user: UserId,
    app: &AppInfo,
    package_state: Option<&PackageState>,
    defaults: &dyn DefaultStore,
    caps: &DeviceCaps,
) -> Option<DefaultValue> {
    if !is_supported(kind, caps) {
        return None;
    }
    if let Some(p) = find_immutability(kind, user, app, package_state, defaults) {
        return Some(DefaultValue {
            value: p.forced_value,
            reason: DefaultValueReason::Immutable(p.reason),
        });
    }
    Some(mutable_default(kind, user, defaults))
}

/// [`resolve`] with the package state looked up in `overrides`.
pub fn resolve_for_package(
    kind: SwitchKind,
    user: UserId,
    app: &AppInfo,
    overrides: &dyn OverrideStore,
    defaults: &dyn DefaultStore,
    caps: &DeviceCaps,
) -> SwitchOutcome {
    let ps = overrides.get(&app.package_name, user);
    resolve(kind, user, app, ps.as_ref(), defaults, caps)
}

/// Resolve `kind` for every app. Apps are independent; output is positional.
pub fn resolve_many(
    kind: SwitchKind,
    user: UserId,
    apps: &[AppInfo],
    overrides: &dyn OverrideStore,
    defaults: &dyn DefaultStore,
    caps: &DeviceCaps,
) -> Vec<SwitchOutcome> {
    apps.iter()
        .map(|app| resolve_for_package(kind, user, app, overrides, defaults, caps))
        .collect()
}
