//! Per-app commands: resolve, summary, list.

use super::{load_profile, parse_state, parse_switch, settings_context};
use aep_settings::{adapter, AppListPage};
use aep_switch::{resolve, OverrideStore, SwitchKind, SwitchOutcome, UserId};
use anyhow::{bail, Result};

pub fn run_resolve(config: &[String], switch: &str, package: &str, user: u32) -> Result<()> {
    let kind = parse_switch(switch)?;
    let profile = load_profile(config)?;
    let stores = profile.build_stores();
    let user = UserId(user);
    let app = profile.app(package, user)?;
    let ps = stores.overrides.get(package, user);

    let out = resolve(kind, user, &app, ps.as_ref(), &stores.defaults, &stores.caps);
    match out {
        SwitchOutcome::Unsupported => {
            println!(
                "switch={} package={} user={} unsupported=true",
                kind.as_str(),
                package,
                user.0
            );
        }
        SwitchOutcome::Resolved(r) => {
            println!(
                "switch={} package={} user={} value={} is_default={} immutability={}",
                kind.as_str(),
                package,
                user.0,
                r.value,
                r.is_default,
                r.immutability.map_or("none", |i| i.code())
            );
        }
    }
    Ok(())
}

pub fn run_summary(config: &[String], package: &str, user: u32) -> Result<()> {
    let profile = load_profile(config)?;
    let stores = profile.build_stores();
    let ctx = settings_context(&profile, user);
    let app = profile.app(package, ctx.user)?;
    let ps = stores.overrides.get(package, ctx.user);

    println!("package={} user={}", package, ctx.user.0);
    for kind in SwitchKind::ALL {
        if let Some(pref) = adapter(kind).app_preference(&ctx, &app, ps.as_ref(), &stores.defaults)
        {
            println!(
                "{} title=\"{}\" summary=\"{}\"",
                kind.as_str(),
                pref.title,
                pref.summary
            );
        }
    }
    Ok(())
}

pub fn run_list(config: &[String], switch: &str, state: &str, user: u32) -> Result<()> {
    let kind = parse_switch(switch)?;
    let filter = parse_state(state)?;
    let profile = load_profile(config)?;
    let stores = profile.build_stores();
    let user = UserId(user);

    let Some(mut page) = AppListPage::new(kind, stores.caps) else {
        bail!("switch '{}' is not supported on this device", kind.as_str());
    };
    page.update(user, &profile.apps_for_user(user));

    let apps = page.filter(filter, &stores.overrides, &stores.defaults);
    for app in &apps {
        println!("{}", app.package_name);
    }
    println!("count={}", apps.len());
    Ok(())
}
