use aep_testkit::{write_profile, SAMPLE_PROFILE_YAML};
use assert_cmd::Command;
use predicates::prelude::*;

fn aep() -> Command {
    let mut cmd = Command::cargo_bin("aep").unwrap();
    cmd.env_remove("AEP_CONFIG").env("RUST_LOG", "warn");
    cmd
}

#[test]
fn config_hash_prints_hash_and_canonical_json() -> anyhow::Result<()> {
    let (_dir, path) = write_profile("profile.yaml", SAMPLE_PROFILE_YAML)?;

    aep()
        .args(["config-hash", &path])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match("config_hash=[0-9a-f]{64}\n")?
                .and(predicate::str::contains("\"model\":\"Pixel 8\"")),
        );
    Ok(())
}

#[test]
fn summary_lists_supported_switches_only() -> anyhow::Result<()> {
    let (_dir, path) = write_profile("profile.yaml", SAMPLE_PROFILE_YAML)?;

    // dev_mode_enabled is false in the sample, so ext_va_space is hidden.
    aep()
        .args(["--config", &path])
        .args(["summary", "--package", "com.example.browser"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("hardened_malloc title=\"Hardened memory allocator\" summary=\"Disabled\"")
                .and(predicate::str::contains("memtag title=\"Memory tagging\" summary=\"Enabled\""))
                .and(predicate::str::contains(
                    "memory_dcl title=\"Restrict dynamic code loading via memory\" summary=\"Default (Restricted)\"",
                ))
                .and(predicate::str::contains("ext_va_space").not()),
        );
    Ok(())
}

#[test]
fn defaults_screen_state_per_user() -> anyhow::Result<()> {
    let (_dir, path) = write_profile("profile.yaml", SAMPLE_PROFILE_YAML)?;

    aep()
        .args(["--config", &path])
        .args(["defaults", "--switch", "deny_native_debug", "--user", "10"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("setting=allow_native_debug_by_default")
                .and(predicate::str::contains("availability=AVAILABLE"))
                .and(predicate::str::contains("checked=true"))
                .and(predicate::str::contains("summary=\"Blocked\"")),
        );

    aep()
        .args(["--config", &path])
        .args(["defaults", "--switch", "memtag", "--user", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("availability=DISABLED_FOR_USER"));

    aep()
        .args(["--config", &path])
        .args(["defaults", "--switch", "hardened_malloc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no default setting"));
    Ok(())
}

#[test]
fn sud_config_answers_from_profile() -> anyhow::Result<()> {
    let (_dir, path) = write_profile("profile.yaml", SAMPLE_PROFILE_YAML)?;

    aep()
        .args(["--config", &path])
        .args(["sud-config", "--method", "getDeviceName"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"getDeviceName\": \"Pixel 8\""));

    aep()
        .args(["--config", &path])
        .args(["sud-config", "--method", "suwDefaultThemeString"])
        .assert()
        .success()
        .stdout(predicate::str::contains("glif_v4_light"));

    aep()
        .args(["--config", &path])
        .args(["sud-config", "--method", "nope", "--caller", "com.example.wizard"])
        .assert()
        .success()
        .stdout(predicate::str::diff("{}\n"));
    Ok(())
}

#[test]
fn check_config_warns_or_fails_on_unused_keys() -> anyhow::Result<()> {
    let yaml = format!("{SAMPLE_PROFILE_YAML}\nextra:\n  key: 1\n");
    let (_dir, path) = write_profile("profile.yaml", &yaml)?;

    aep()
        .args(["--config", &path])
        .arg("check-config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("unused_keys=1").and(predicate::str::contains("unused=/extra/key")),
        );

    aep()
        .args(["--config", &path])
        .args(["check-config", "--fail-on-unused"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_UNUSED_KEYS"));

    let (_clean_dir, clean) = write_profile("clean.yaml", SAMPLE_PROFILE_YAML)?;
    aep()
        .args(["--config", &clean])
        .args(["check-config", "--fail-on-unused"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unused_keys=0"));
    Ok(())
}

#[test]
fn check_config_flags_misspelled_app_field() -> anyhow::Result<()> {
    let yaml = SAMPLE_PROFILE_YAML.replace(
        "  - package_name: com.example.notes\n",
        "  - package_name: com.example.notes\n    is_sytem_app: true\n",
    );
    let (_dir, path) = write_profile("profile.yaml", &yaml)?;

    aep()
        .args(["--config", &path])
        .args(["check-config", "--fail-on-unused"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/apps/3/is_sytem_app"));
    Ok(())
}
