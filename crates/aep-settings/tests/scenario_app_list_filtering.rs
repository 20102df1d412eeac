use aep_settings::{AppListPage, ListFilter};
use aep_switch::{AppInfo, DeviceCaps, OverrideState, SwitchKind, UserId};
use aep_testkit::{legacy_32_bit_app, system_app, third_party_app, uninstalled_app, FakeDevice};

fn device() -> FakeDevice {
    FakeDevice::new(DeviceCaps::all())
        .with_app(system_app("c.sys"))
        .with_app(third_party_app("b.third"))
        .with_app(legacy_32_bit_app("a.legacy"))
        .with_app(uninstalled_app("d.gone"))
}

fn names(apps: Vec<&AppInfo>) -> Vec<&str> {
    apps.into_iter().map(|a| a.package_name.as_str()).collect()
}

#[test]
fn filters_by_resolved_value_sorted_by_package() {
    let dev = device();
    let mut page = AppListPage::new(SwitchKind::HardenedMalloc, dev.caps).unwrap();
    assert!(page
        .filter(ListFilter::On, &dev.overrides, &dev.defaults)
        .is_empty());

    assert!(page.update(UserId::SYSTEM, &dev.apps));

    assert_eq!(
        names(page.filter(ListFilter::On, &dev.overrides, &dev.defaults)),
        vec!["b.third", "c.sys"]
    );
    assert_eq!(
        names(page.filter(ListFilter::Off, &dev.overrides, &dev.defaults)),
        vec!["a.legacy"]
    );
}

#[test]
fn override_changes_show_up_without_recompute() {
    let mut dev = device();
    let mut page = AppListPage::new(SwitchKind::HardenedMalloc, dev.caps).unwrap();
    page.update(UserId::SYSTEM, &dev.apps);

    dev.set_override(
        "b.third",
        UserId::SYSTEM,
        SwitchKind::HardenedMalloc,
        OverrideState::Off,
    );
    assert_eq!(
        names(page.filter(ListFilter::Off, &dev.overrides, &dev.defaults)),
        vec!["a.legacy", "b.third"]
    );
    assert_eq!(page.recomputations(), 1);
}

#[test]
fn recomputes_only_when_user_or_app_set_changes() {
    let dev = device();
    let mut page = AppListPage::new(SwitchKind::HardenedMalloc, dev.caps).unwrap();

    assert!(page.update(UserId::SYSTEM, &dev.apps));
    assert!(!page.update(UserId::SYSTEM, &dev.apps));
    assert_eq!(page.recomputations(), 1);

    assert!(page.update(UserId(10), &dev.apps));
    assert_eq!(page.recomputations(), 2);

    let mut more = dev.apps.clone();
    more.push(third_party_app("e.new"));
    assert!(page.update(UserId(10), &more));
    assert_eq!(page.recomputations(), 3);
    assert_eq!(
        names(page.filter(ListFilter::On, &dev.overrides, &dev.defaults)),
        vec!["b.third", "c.sys", "e.new"]
    );
}

#[test]
fn spinner_labels_follow_switch_labels() {
    let page = AppListPage::new(SwitchKind::HardenedMalloc, DeviceCaps::all()).unwrap();
    let opts = page.spinner_options();
    assert_eq!(opts.len(), 2);
    assert_eq!((opts[0].filter.id(), opts[0].label.as_str()), (0, "Disabled"));
    assert_eq!((opts[1].filter.id(), opts[1].label.as_str()), (1, "Enabled"));

    let webview =
        AppListPage::new(SwitchKind::RestrictWebViewDynCodeLoading, DeviceCaps::all()).unwrap();
    let opts = webview.spinner_options();
    assert_eq!(opts[0].label, "Enabled");
    assert_eq!(opts[1].label, "Disabled");
}

#[test]
fn memory_tagging_page_is_not_constructed_without_hardware() {
    assert!(AppListPage::new(SwitchKind::MemoryTagging, DeviceCaps::without_memory_tagging())
        .is_none());
}

#[test]
fn page_titles_use_the_short_switch_title() {
    let title = |kind: SwitchKind| AppListPage::new(kind, DeviceCaps::all()).unwrap().title();

    assert_eq!(
        title(SwitchKind::RestrictMemoryDynCodeLoading),
        "Dynamic code loading via memory"
    );
    assert_eq!(
        title(SwitchKind::RestrictStorageDynCodeLoading),
        "Dynamic code loading via storage"
    );
    assert_eq!(title(SwitchKind::HardenedMalloc), "Hardened memory allocator");
}
