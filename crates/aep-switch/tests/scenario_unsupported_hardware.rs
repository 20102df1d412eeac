use aep_switch::*;

#[test]
fn memtag_unsupported_without_hardware() {
    let defaults = InMemoryDefaultStore::new();
    let caps = DeviceCaps::without_memory_tagging();

    // Even an app whose predicates would pin the switch gets no answer.
    let mut sys = AppInfo::new("com.android.preinstalled");
    sys.is_system_app = true;

    for app in [AppInfo::new("com.example.app"), sys] {
        let out = resolve(SwitchKind::MemoryTagging, UserId(0), &app, None, &defaults, &caps);
        assert_eq!(out, SwitchOutcome::Unsupported);
        assert_eq!(out.value(), None);
        assert_eq!(
            default_value(SwitchKind::MemoryTagging, UserId(0), &app, None, &defaults, &caps),
            None
        );
    }
    assert!(!is_supported(SwitchKind::MemoryTagging, &caps));
}

#[test]
fn other_switches_unaffected_by_missing_memtag() {
    let defaults = InMemoryDefaultStore::new();
    let caps = DeviceCaps::without_memory_tagging();
    let app = AppInfo::new("com.example.app");

    for kind in SwitchKind::ALL {
        if kind == SwitchKind::MemoryTagging {
            continue;
        }
        assert!(resolve(kind, UserId(0), &app, None, &defaults, &caps).is_supported());
    }
}

#[test]
fn extended_va_space_gated_on_kernel_support() {
    let defaults = InMemoryDefaultStore::new();
    let caps = DeviceCaps {
        memory_tagging: true,
        extended_va_space: false,
    };
    let out = resolve(
        SwitchKind::ExtendedVaSpace,
        UserId(0),
        &AppInfo::new("com.example.app"),
        None,
        &defaults,
        &caps,
    );
    assert_eq!(out, SwitchOutcome::Unsupported);
}

#[test]
fn outcome_serializes_for_reports() {
    let out = SwitchOutcome::Resolved(Resolution {
        value: true,
        is_default: false,
        immutability: Some(ImmutabilityReason::IsSystemApp),
    });
    let v = serde_json::to_value(out).unwrap();
    assert_eq!(v["Resolved"]["immutability"], "IsSystemApp");
}
