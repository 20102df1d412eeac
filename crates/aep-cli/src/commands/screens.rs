//! Device-level commands: defaults screen state, setup wizard config,
//! config checks.

use super::{load_config, load_profile, parse_switch, settings_context};
use aep_config::{report_unused_keys, UnusedKeyPolicy};
use aep_settings::{DefaultsScreen, SudConfigProvider};
use anyhow::{Context, Result};

pub fn run_defaults(config: &[String], switch: &str, user: u32) -> Result<()> {
    let kind = parse_switch(switch)?;
    let profile = load_profile(config)?;
    let stores = profile.build_stores();
    let ctx = settings_context(&profile, user);

    let screen = DefaultsScreen::new(kind, ctx)
        .with_context(|| format!("switch '{}' has no default setting", kind.as_str()))?;
    let view = screen.view(&stores.defaults);

    println!("setting={}", view.setting.key());
    println!("availability={}", view.availability.as_str());
    println!("checked={}", view.checked);
    println!("title=\"{}\"", view.main_switch_title);
    println!("summary=\"{}\"", view.summary);
    println!("app_list_link={}", view.app_list_link.is_some());
    Ok(())
}

pub fn run_sud_config(config: &[String], method: &str, caller: Option<&str>) -> Result<()> {
    let profile = load_profile(config)?;
    let d = &profile.device;
    let provider = SudConfigProvider::new(&d.setupwizard_theme, &d.name, &d.model);

    let bundle = provider.call(method, caller);
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}

pub fn run_check_config(config: &[String], fail_on_unused: bool) -> Result<()> {
    let loaded = load_config(config)?;
    let policy = if fail_on_unused {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = report_unused_keys(&loaded.config_json, policy)?;

    println!("config_hash={}", loaded.config_hash);
    println!("unused_keys={}", report.unused_leaf_pointers.len());
    for p in &report.unused_leaf_pointers {
        println!("unused={p}");
    }
    Ok(())
}
