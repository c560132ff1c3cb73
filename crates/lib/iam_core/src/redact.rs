//! Redaction helpers for values that end up in logs.

const REDACTED: &str = "[REDACTED]";

/// Mask the local part of an email, keeping its first character and the domain.
///
/// `john@example.com` becomes `j***@example.com`.
pub fn redact_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return REDACTED.to_string();
    };
    match local.chars().next() {
        Some(first) => format!("{first}***@{domain}"),
        None => format!("***@{domain}"),
    }
}

/// Mask everything but the first and last two characters.
pub fn redact_sensitive(data: &str) -> String {
    let chars: Vec<char> = data.chars().collect();
    if chars.len() <= 4 {
        return REDACTED.to_string();
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}***{tail}")
}
