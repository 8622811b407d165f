use super::*;
use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

fn all_vars() -> Vec<(&'static str, &'static str)> {
    vec![
        (PRACTICUM_TOKEN_VAR, "y0_practicum"),
        (TELEGRAM_TOKEN_VAR, "123456:telegram"),
        (TELEGRAM_CHAT_ID_VAR, "987654321"),
    ]
}

#[test]
fn test_check_tokens_all_present() {
    let secrets = Secrets::from_lookup(lookup(&all_vars()));
    assert!(check_tokens(&secrets));
    assert!(secrets.missing().is_empty());
}

#[test]
fn test_check_tokens_any_subset_missing() {
    let vars = all_vars();
    // Every proper subset of the three variables must fail the gate.
    for mask in 0u8..7 {
        let present: Vec<_> = vars
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .map(|(_, kv)| *kv)
            .collect();
        let secrets = Secrets::from_lookup(lookup(&present));
        assert!(!check_tokens(&secrets), "mask {mask:03b} should fail");
        assert_eq!(secrets.missing().len(), 3 - present.len());
    }
}

#[test]
fn test_check_tokens_empty_value_counts_as_missing() {
    let secrets = Secrets::from_lookup(lookup(&[
        (PRACTICUM_TOKEN_VAR, "y0_practicum"),
        (TELEGRAM_TOKEN_VAR, ""),
        (TELEGRAM_CHAT_ID_VAR, "987654321"),
    ]));
    assert!(!check_tokens(&secrets));
    assert_eq!(secrets.missing(), vec![TELEGRAM_TOKEN_VAR]);
}

#[test]
fn test_into_credentials() {
    let creds = Secrets::from_lookup(lookup(&all_vars()))
        .into_credentials()
        .unwrap();
    assert_eq!(creds.practicum_token, "y0_practicum");
    assert_eq!(creds.telegram_token, "123456:telegram");
    assert_eq!(creds.telegram_chat_id, "987654321");
}

#[test]
fn test_into_credentials_names_missing_var() {
    let err = Secrets::from_lookup(lookup(&[(PRACTICUM_TOKEN_VAR, "y0_practicum")]))
        .into_credentials()
        .unwrap_err();
    assert!(matches!(err, HwError::Config(_)));
    assert!(err.to_string().contains(TELEGRAM_TOKEN_VAR));
}

#[test]
fn test_debug_does_not_leak_secrets() {
    let secrets = Secrets::from_lookup(lookup(&all_vars()));
    let shown = format!("{secrets:?}");
    assert!(!shown.contains("y0_practicum"));
    assert!(!shown.contains("123456:telegram"));
    assert!(shown.contains("<set>"));

    let creds = secrets.into_credentials().unwrap();
    let shown = format!("{creds:?}");
    assert!(!shown.contains("y0_practicum"));
    assert!(!shown.contains("123456:telegram"));
}

#[test]
fn test_settings_defaults() {
    let s = Settings::default();
    assert_eq!(s.poller.retry_period_secs, 600);
    assert_eq!(
        s.poller.endpoint,
        "https://practicum.yandex.ru/api/user_api/homework_statuses/"
    );
    assert_eq!(s.telegram.api_base, "https://api.telegram.org");
    assert_eq!(s.logging.level, "debug");
    assert!(s.logging.file.is_empty());
}

#[test]
fn test_settings_partial_toml() {
    let toml_str = r#"
        [poller]
        retry_period_secs = 60

        [logging]
        level = "info"
    "#;
    let s: Settings = toml::from_str(toml_str).unwrap();
    assert_eq!(s.poller.retry_period_secs, 60);
    assert_eq!(s.poller.request_timeout_secs, 30);
    assert_eq!(s.logging.level, "info");
    assert_eq!(s.telegram.api_base, "https://api.telegram.org");
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let path = std::env::temp_dir().join("__hwbot_test_no_such_settings__.toml");
    let _ = std::fs::remove_file(&path);
    let s = load(path.to_str().unwrap()).unwrap();
    assert_eq!(s.poller.retry_period_secs, 600);
    assert!(s.source.is_none(), "defaults must not claim a source file");
}

#[test]
fn test_load_from_file() {
    let tmp = std::env::temp_dir().join(format!("__hwbot_test_load_{}__", std::process::id()));
    let _ = std::fs::create_dir_all(&tmp);
    let path = tmp.join("hwbot.toml");
    std::fs::write(
        &path,
        "[poller]\nretry_period_secs = 120\nendpoint = \"http://localhost:8080/hw\"\n",
    )
    .unwrap();

    let s = load(path.to_str().unwrap()).unwrap();
    assert_eq!(s.poller.retry_period_secs, 120);
    assert_eq!(s.poller.endpoint, "http://localhost:8080/hw");
    assert_eq!(s.source.as_deref(), Some(path.as_path()));

    let _ = std::fs::remove_dir_all(&tmp);
}

#[test]
fn test_load_rejects_bad_toml_and_zero_period() {
    let tmp = std::env::temp_dir().join(format!("__hwbot_test_bad_{}__", std::process::id()));
    let _ = std::fs::create_dir_all(&tmp);

    let bad = tmp.join("bad.toml");
    std::fs::write(&bad, "[poller\nretry_period_secs = ").unwrap();
    let err = load(bad.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, HwError::Config(_)));

    let zero = tmp.join("zero.toml");
    std::fs::write(&zero, "[poller]\nretry_period_secs = 0\n").unwrap();
    let err = load(zero.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("retry_period_secs"));

    let _ = std::fs::remove_dir_all(&tmp);
}
