//! Masking helpers for log output

/// Mask an email address for logging.
///
/// Keeps the first character of the local part and the full domain:
/// `student@campus.edu` becomes `s******@campus.edu`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let mut chars = local.chars();
            let first = chars.next().unwrap_or('*');
            let hidden = "*".repeat(chars.count().max(1));
            format!("{}{}@{}", first, hidden, domain)
        }
        _ => "****".to_string(),
    }
}
