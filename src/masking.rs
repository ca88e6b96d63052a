use secrecy::{ExposeSecret, SecretString};

/// Placeholder printed instead of a password.
pub const REDACTED: &str = "****";

/// Format a secret value, respecting the show_secrets flag.
pub fn format_secret(secret: &SecretString, show_secrets: bool) -> String {
    if show_secrets {
        secret.expose_secret().to_string()
    } else {
        REDACTED.to_string()
    }
}

/// Scrub every occurrence of the secret from a free-form message, such as a
/// driver error that echoes the connect descriptor.
pub fn scrub(message: &str, secret: &SecretString, show_secrets: bool) -> String {
    let raw = secret.expose_secret();
    if show_secrets || raw.is_empty() {
        message.to_string()
    } else {
        message.replace(raw, REDACTED)
    }
}
