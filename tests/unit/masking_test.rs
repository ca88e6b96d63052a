use orasql::masking::{format_secret, scrub, REDACTED};
use secrecy::SecretString;

#[test]
fn test_secret_masked_by_default() {
    let secret = SecretString::from("my-super-secret-password".to_string());
    let output = format_secret(&secret, false);
    assert_eq!(output, REDACTED);
    assert!(!output.contains("my-super-secret-password"));
}

#[test]
fn test_secret_exposed_with_show_secrets() {
    let secret = SecretString::from("my-super-secret-password".to_string());
    assert_eq!(format_secret(&secret, true), "my-super-secret-password");
}

#[test]
fn test_secret_debug_is_redacted() {
    let secret = SecretString::from("password123".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(!debug_output.contains("password123"), "Debug should not expose secret: {}", debug_output);
}

#[test]
fn test_scrub_removes_every_occurrence() {
    let secret = SecretString::from("tiger".to_string());
    let message = "ORA-01017: invalid username/password scott/tiger (tiger)";
    assert_eq!(
        scrub(message, &secret, false),
        "ORA-01017: invalid username/password scott/**** (****)"
    );
}

#[test]
fn test_scrub_keeps_message_with_show_secrets() {
    let secret = SecretString::from("tiger".to_string());
    assert_eq!(scrub("scott/tiger", &secret, true), "scott/tiger");
}

#[test]
fn test_scrub_ignores_empty_secret() {
    let secret = SecretString::from(String::new());
    assert_eq!(scrub("nothing to hide", &secret, false), "nothing to hide");
}
