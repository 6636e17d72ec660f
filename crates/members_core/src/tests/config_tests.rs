use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_dir(prefix: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("{prefix}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    dir
}

#[test]
fn defaults_match_list_behaviour() {
    let settings = Settings::default();
    assert_eq!(settings.load_more_threshold, 40.0);
    assert_eq!(settings.command_queue_capacity, 64);
    assert_eq!(settings.strings.members_title, "Members");
}

#[test]
fn env_overrides_replace_parsed_values_only() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("MEMBERS__LOAD_MORE_THRESHOLD", "120.5"),
        ("MEMBERS__COMMAND_QUEUE_CAPACITY", "not-a-number"),
    ]);
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.load_more_threshold, 120.5);
    assert_eq!(settings.command_queue_capacity, 64);

    let zero = HashMap::from([("MEMBERS__COMMAND_QUEUE_CAPACITY", "0")]);
    apply_env_overrides(&mut settings, |key| zero.get(key).map(|v| v.to_string()));
    assert_eq!(settings.command_queue_capacity, 1);
}

#[test]
fn settings_file_overrides_defaults_and_strings() {
    let dir = temp_dir("members_settings_test");
    let path = dir.join("members.toml");
    fs::write(
        &path,
        "command_queue_capacity = 8\n\n[strings]\nmembers_title = \"Abonnés\"\n",
    )
    .expect("write settings");

    let settings = load_settings_from(&path).expect("settings");
    assert_eq!(settings.command_queue_capacity, 8);
    assert_eq!(settings.load_more_threshold, 40.0);
    assert_eq!(settings.strings.members_title, "Abonnés");
    assert_eq!(settings.strings.edit, "Edit");

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn missing_or_malformed_explicit_file_is_an_error() {
    let dir = temp_dir("members_settings_bad_test");
    let missing = dir.join("absent.toml");
    let err = load_settings_from(&missing).expect_err("missing");
    assert!(err.to_string().contains("failed to read settings file"));

    let bad = dir.join("bad.toml");
    fs::write(&bad, "load_more_threshold = [").expect("write");
    let err = load_settings_from(&bad).expect_err("malformed");
    assert!(err.to_string().contains("invalid settings file"));

    fs::remove_dir_all(dir).expect("cleanup");
}
