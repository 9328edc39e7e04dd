//! Destination address validation
//!
//! Prompt validators return `Ok(normalized)` or `Err(message)`; the message
//! is shown inline and the prompt stays open.

use regex::Regex;
use std::sync::OnceLock;

/// Validator outcome: normalized value or an inline error message
pub type Validation = std::result::Result<String, String>;

pub const PHONE_MISSING: &str = "Informe um número.";
pub const PHONE_INVALID: &str = "Inclua DDI (ex.: +55...) e apenas números.";
pub const EMAIL_INVALID: &str = "Informe um e-mail válido.";

/// Country calling code assumed for bare 11-digit numbers
const DOMESTIC_CALLING_CODE: &str = "55";

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

/// `local@domain.tld` shape check, nothing more.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(email))
}

/// Validator wrapper around [`is_valid_email`]
pub fn validate_email(raw: &str) -> Validation {
    if is_valid_email(raw) {
        Ok(raw.to_string())
    } else {
        Err(EMAIL_INVALID.to_string())
    }
}

/// Normalize a phone number for WhatsApp deep links.
///
/// Non-digits are stripped. Without a leading `+`, exactly 11 digits are
/// taken as a domestic number and prefixed with `55`. The result must have
/// 12 to 15 digits.
pub fn normalize_phone_for_whatsapp(raw: &str) -> Validation {
    let has_plus = raw.trim_start().starts_with('+');
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Err(PHONE_MISSING.to_string());
    }

    let normalized = if !has_plus && digits.len() == 11 {
        format!("{}{}", DOMESTIC_CALLING_CODE, digits)
    } else {
        digits
    };

    if !(12..=15).contains(&normalized.len()) {
        return Err(PHONE_INVALID.to_string());
    }

    Ok(normalized)
}

/// Same rules as WhatsApp, rendered as E.164 (`+<digits>`) for SMS relay.
pub fn normalize_phone_for_sms(raw: &str) -> Validation {
    normalize_phone_for_whatsapp(raw).map(|digits| format!("+{}", digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domestic_number_gets_country_code() {
        assert_eq!(
            normalize_phone_for_whatsapp("11999999999"),
            Ok("5511999999999".to_string())
        );
        assert_eq!(
            normalize_phone_for_whatsapp("(11) 99999-9999"),
            Ok("5511999999999".to_string())
        );
    }

    #[test]
    fn test_plus_prefix_keeps_digits() {
        assert_eq!(
            normalize_phone_for_whatsapp("  +55 11 99999-9999"),
            Ok("5511999999999".to_string())
        );
        // 11 digits with '+' is not treated as domestic, so it is too short
        assert_eq!(
            normalize_phone_for_whatsapp("+11999999999"),
            Err(PHONE_INVALID.to_string())
        );
    }

    #[test]
    fn test_short_and_long_numbers_rejected() {
        assert_eq!(
            normalize_phone_for_whatsapp("+1234"),
            Err(PHONE_INVALID.to_string())
        );
        assert_eq!(
            normalize_phone_for_whatsapp("1234567890123456"),
            Err(PHONE_INVALID.to_string())
        );
        assert!(normalize_phone_for_whatsapp("123456789012345").is_ok());
    }

    #[test]
    fn test_missing_number() {
        assert_eq!(
            normalize_phone_for_whatsapp("abc"),
            Err(PHONE_MISSING.to_string())
        );
        assert_eq!(normalize_phone_for_whatsapp(""), Err(PHONE_MISSING.to_string()));
    }

    #[test]
    fn test_sms_number_is_e164() {
        assert_eq!(
            normalize_phone_for_sms("11999999999"),
            Ok("+5511999999999".to_string())
        );
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("nome.sobrenome@empresa.com.br"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email("a@b.com"), Ok("a@b.com".to_string()));
        assert_eq!(validate_email("a@b"), Err(EMAIL_INVALID.to_string()));
    }
}
