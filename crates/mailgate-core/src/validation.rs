/// Input validation utilities
///
/// The checks here are deliberately minimal: the vendor performs full
/// address verification, so the proxy only rejects obviously broken
/// input before spending a vendor call on it.

/// Normalize an email field: trim surrounding whitespace and lowercase.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Shape check for subscription contacts: must contain `@` and `.`
pub fn is_valid_contact_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

/// Shape check for transactional recipients: must contain `@`
pub fn is_valid_recipient_email(email: &str) -> bool {
    email.contains('@')
}
