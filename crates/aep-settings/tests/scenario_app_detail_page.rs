use aep_settings::{AppDetailPage, DetailEntry, SettingsContext};
use aep_switch::{
    DefaultSettingId, DeviceCaps, OverrideState, OverrideStore, SwitchKind, UserId,
};
use aep_testkit::{legacy_32_bit_app, third_party_app, uninstalled_app, FakeDevice};

fn device() -> FakeDevice {
    FakeDevice::new(DeviceCaps::all())
        .with_app(third_party_app("com.example.app"))
        .with_app(legacy_32_bit_app("com.example.legacy"))
}

fn owner() -> SettingsContext {
    SettingsContext::new(UserId::SYSTEM, DeviceCaps::all())
}

#[test]
fn mutable_app_on_default_shows_all_three_entries_enabled() {
    let dev = device();
    let page = AppDetailPage::new(
        SwitchKind::RestrictMemoryDynCodeLoading,
        owner(),
        dev.app("com.example.app"),
    )
    .unwrap();

    let view = page.view(&dev.overrides, &dev.defaults);
    assert_eq!(view.title, "Dynamic code loading via memory");
    assert_eq!(view.app_list_link, "See all apps");
    assert_eq!(view.checked(), DetailEntry::Default);

    let def = view.entry(DetailEntry::Default);
    assert_eq!(def.title, "Default (Allowed)");
    assert!(def.enabled);
    assert_eq!(
        def.summary.as_deref(),
        Some(
            "Default value is set by the “Security & privacy > Exploit protection” setting"
        )
    );

    let on = view.entry(DetailEntry::On);
    assert_eq!(on.title, "Restricted");
    assert!(!on.checked && on.enabled && on.summary.is_none());

    let off = view.entry(DetailEntry::Off);
    assert_eq!(off.title, "Allowed");
    assert!(!off.checked && off.enabled);

    let toggle = view.notification_toggle.unwrap();
    assert_eq!(toggle.title, "Notify about blocked dynamic code loading");
    assert!(toggle.checked);
    assert!(!toggle.enabled, "switch is off");
}

#[test]
fn selecting_entries_writes_and_clears_the_override() {
    let mut dev = device();
    let page = AppDetailPage::new(
        SwitchKind::RestrictMemoryDynCodeLoading,
        owner(),
        dev.app("com.example.app"),
    )
    .unwrap();

    assert!(page.select(DetailEntry::On, &mut dev.overrides, &dev.defaults));
    let ps = dev.overrides.get("com.example.app", UserId::SYSTEM).unwrap();
    assert_eq!(
        ps.override_for(SwitchKind::RestrictMemoryDynCodeLoading),
        OverrideState::On
    );

    let view = page.view(&dev.overrides, &dev.defaults);
    assert_eq!(view.checked(), DetailEntry::On);
    assert!(view.notification_toggle.unwrap().enabled);

    assert!(page.select(DetailEntry::Default, &mut dev.overrides, &dev.defaults));
    assert!(dev.overrides.is_empty());
    let view = page.view(&dev.overrides, &dev.defaults);
    assert_eq!(view.checked(), DetailEntry::Default);
}

#[test]
fn immutable_app_disables_unchecked_entries_and_ignores_selection() {
    let mut dev = device();
    let page = AppDetailPage::new(
        SwitchKind::HardenedMalloc,
        owner(),
        dev.app("com.example.legacy"),
    )
    .unwrap();

    let view = page.view(&dev.overrides, &dev.defaults);
    assert_eq!(view.checked(), DetailEntry::Off);
    assert_eq!(
        view.learn_more_url,
        Some("https://grapheneos.org/features#exploit-mitigations")
    );

    let def = view.entry(DetailEntry::Default);
    assert!(!def.checked && !def.enabled && def.summary.is_none());
    assert_eq!(def.title, "Default (Disabled)");

    let on = view.entry(DetailEntry::On);
    assert!(!on.checked && !on.enabled);

    let off = view.entry(DetailEntry::Off);
    assert!(off.checked && off.enabled);
    assert_eq!(
        off.summary.as_deref(),
        Some("Not supported for apps that have 32-bit native code")
    );

    assert!(!page.select(DetailEntry::On, &mut dev.overrides, &dev.defaults));
    assert!(dev.overrides.is_empty());
}

#[test]
fn default_summary_only_for_owner_and_only_for_default_settings() {
    let dev = device();
    let app = dev.app("com.example.app");

    let secondary = SettingsContext::new(UserId(10), DeviceCaps::all());
    let page =
        AppDetailPage::new(SwitchKind::RestrictMemoryDynCodeLoading, secondary, app.clone())
            .unwrap();
    let view = page.view(&dev.overrides, &dev.defaults);
    assert!(view.entry(DetailEntry::Default).summary.is_none());

    // Built-in baseline: nothing to point at.
    let page = AppDetailPage::new(SwitchKind::HardenedMalloc, owner(), app).unwrap();
    let view = page.view(&dev.overrides, &dev.defaults);
    let def = view.entry(DetailEntry::Default);
    assert_eq!(def.title, "Default (Enabled)");
    assert!(def.summary.is_none());
    assert!(view.notification_toggle.is_none());
}

#[test]
fn native_debugging_default_title_follows_inverted_setting() {
    let mut dev = device();
    let page = AppDetailPage::new(
        SwitchKind::DenyNativeDebugging,
        owner(),
        dev.app("com.example.app"),
    )
    .unwrap();

    let view = page.view(&dev.overrides, &dev.defaults);
    assert_eq!(view.entry(DetailEntry::Default).title, "Default (Allowed)");

    dev.set_default(DefaultSettingId::AllowNativeDebugByDefault, UserId::SYSTEM, false);
    let view = page.view(&dev.overrides, &dev.defaults);
    assert_eq!(view.entry(DetailEntry::Default).title, "Default (Blocked)");
    assert_eq!(view.checked(), DetailEntry::Default);
}

#[test]
fn notification_toggle_writes_package_state_only_while_on() {
    let mut dev = device();
    let app = dev.app("com.example.app");

    let memtag = AppDetailPage::new(SwitchKind::MemoryTagging, owner(), app.clone()).unwrap();
    assert!(!memtag.set_notification_enabled(false, &mut dev.overrides, &dev.defaults));
    assert!(dev.overrides.is_empty());

    assert!(memtag.select(DetailEntry::On, &mut dev.overrides, &dev.defaults));
    assert!(memtag.set_notification_enabled(false, &mut dev.overrides, &dev.defaults));

    let ps = dev.overrides.get("com.example.app", UserId::SYSTEM).unwrap();
    assert!(!ps.is_notification_enabled(SwitchKind::MemoryTagging));
    let toggle = memtag
        .view(&dev.overrides, &dev.defaults)
        .notification_toggle
        .unwrap();
    assert!(!toggle.checked && toggle.enabled);

    let hm = AppDetailPage::new(SwitchKind::HardenedMalloc, owner(), app).unwrap();
    assert!(!hm.set_notification_enabled(false, &mut dev.overrides, &dev.defaults));
}

#[test]
fn page_is_not_built_for_unsupported_switch_or_missing_app() {
    let no_mte = SettingsContext::new(UserId::SYSTEM, DeviceCaps::without_memory_tagging());
    assert!(AppDetailPage::new(
        SwitchKind::MemoryTagging,
        no_mte,
        third_party_app("com.example.app")
    )
    .is_none());
    assert!(AppDetailPage::new(
        SwitchKind::HardenedMalloc,
        owner(),
        uninstalled_app("com.example.gone")
    )
    .is_none());
}

#[test]
fn detail_titles_and_app_list_link() {
    let dev = device();
    let title = |kind: SwitchKind| {
        let page = AppDetailPage::new(kind, owner(), dev.app("com.example.app")).unwrap();
        let view = page.view(&dev.overrides, &dev.defaults);
        assert_eq!(view.app_list_link, "See all apps", "link on {}", kind.as_str());
        view.title
    };

    assert_eq!(
        title(SwitchKind::RestrictStorageDynCodeLoading),
        "Dynamic code loading via storage"
    );
    assert_eq!(title(SwitchKind::RestrictWebViewDynCodeLoading), "WebView JIT compiler");
    assert_eq!(title(SwitchKind::HardenedMalloc), "Hardened memory allocator");
    assert_eq!(title(SwitchKind::DenyNativeDebugging), "Native code debugging");
}
