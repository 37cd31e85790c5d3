//! Identity normalization for guest matching.
//!
//! Organizers type guest contact details by hand, so stored identifiers
//! carry stray whitespace, mixed case, and punctuation. Normalization
//! reduces both sides of a comparison to a canonical key.
//!
//! All functions here are total: malformed input degrades to `None` /
//! [`IdentifierKind::Unknown`] instead of failing, and normalization is
//! idempotent (`normalize(normalize(x)) == normalize(x)`).

use std::sync::OnceLock;

use regex::Regex;

/// Classification of a raw identifier string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Email,
    Phone,
    Unknown,
}

/// Canonicalize an email address for comparison.
///
/// Trims surrounding whitespace and lower-cases. Empty (or
/// whitespace-only) input yields `None`.
pub fn normalize_email(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Canonicalize a phone number for comparison.
///
/// Strips whitespace, hyphens, and parentheses; a leading `+` is kept.
/// Input with nothing left after stripping yields `None`.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        out.push('+');
    }
    out.extend(
        trimmed
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')' | '+')),
    );

    if out.is_empty() || out == "+" {
        return None;
    }
    Some(out)
}

/// Pattern for phone-shaped strings: optional `+`, then at least ten
/// digits/spaces/hyphens/parentheses.
static PHONE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Guess whether a raw string is an email, a phone number, or neither.
///
/// Anything containing `@` counts as an email; phone detection requires
/// a plausibly long digit sequence so short numeric strings (house
/// numbers, years) stay `Unknown`.
pub fn classify_identifier(raw: &str) -> IdentifierKind {
    let trimmed = raw.trim();
    if trimmed.contains('@') {
        return IdentifierKind::Email;
    }

    let pattern = PHONE_PATTERN
        .get_or_init(|| Regex::new(r"^\+?[\d\s\-()]{10,}$").expect("phone pattern is valid"));
    if pattern.is_match(trimmed) {
        IdentifierKind::Phone
    } else {
        IdentifierKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_trims_and_lowercases() {
        assert_eq!(
            normalize_email(" Jane@Example.COM "),
            Some("jane@example.com".to_string())
        );
    }

    #[test]
    fn email_comparison_is_case_insensitive() {
        assert_eq!(normalize_email("Bob@X.com"), normalize_email("bob@x.com"));
    }

    #[test]
    fn email_empty_input_is_none() {
        assert_eq!(normalize_email(""), None);
        assert_eq!(normalize_email("   "), None);
    }

    #[test]
    fn email_normalization_is_idempotent() {
        let once = normalize_email(" MiXeD@Case.Org ").unwrap();
        assert_eq!(normalize_email(&once), Some(once.clone()));
    }

    #[test]
    fn phone_strips_punctuation_and_keeps_plus() {
        assert_eq!(
            normalize_phone("+1 (555) 123-4567"),
            Some("+15551234567".to_string())
        );
    }

    #[test]
    fn phone_without_plus() {
        assert_eq!(normalize_phone("555 123 4567"), Some("5551234567".to_string()));
    }

    #[test]
    fn phone_empty_and_degenerate_input_is_none() {
        assert_eq!(normalize_phone(""), None);
        assert_eq!(normalize_phone("  "), None);
        assert_eq!(normalize_phone("+"), None);
        assert_eq!(normalize_phone(" - () "), None);
    }

    #[test]
    fn phone_normalization_is_idempotent() {
        let once = normalize_phone("+49 (0) 171-123 45 67").unwrap();
        assert_eq!(normalize_phone(&once), Some(once.clone()));
    }

    #[test]
    fn phone_interior_plus_is_dropped() {
        assert_eq!(normalize_phone("+12+34567890"), Some("+1234567890".to_string()));
    }

    #[test]
    fn classify_email() {
        assert_eq!(classify_identifier("jane@example.com"), IdentifierKind::Email);
        assert_eq!(classify_identifier(" a@b "), IdentifierKind::Email);
    }

    #[test]
    fn classify_phone() {
        assert_eq!(
            classify_identifier("+1 (555) 123-4567"),
            IdentifierKind::Phone
        );
        assert_eq!(classify_identifier("0171 1234567"), IdentifierKind::Phone);
    }

    #[test]
    fn classify_short_number_is_unknown() {
        assert_eq!(classify_identifier("1234"), IdentifierKind::Unknown);
    }

    #[test]
    fn classify_garbage_is_unknown() {
        assert_eq!(classify_identifier("hello"), IdentifierKind::Unknown);
        assert_eq!(classify_identifier(""), IdentifierKind::Unknown);
    }
}
