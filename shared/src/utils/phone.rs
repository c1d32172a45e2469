//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Accepted login phone format: '+' then 10 to 15 digits
static LOGIN_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[0-9]{10,15}$").unwrap()
});

static BARE_NATIONAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{10}$").unwrap()
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '\t'))
        .collect()
}

/// Normalize and prepend `default_country_code` to a bare 10-digit number.
///
/// Anything that is not a bare 10-digit number is returned normalized but
/// otherwise untouched, so the caller's format check still decides.
pub fn with_default_country_code(phone: &str, default_country_code: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if BARE_NATIONAL_REGEX.is_match(&normalized) {
        format!("{}{}", default_country_code, normalized)
    } else {
        normalized
    }
}

/// Check if a phone number is in the accepted `+` and 10-15 digits format
pub fn is_valid_login_phone(phone: &str) -> bool {
    LOGIN_PHONE_REGEX.is_match(phone)
}

/// Check that a code is exactly `length` ASCII digits
pub fn is_valid_otp_code(code: &str, length: usize) -> bool {
    code.len() == length && code.chars().all(|c| c.is_ascii_digit())
}

/// Mask a phone number for logs (e.g., +91****3210)
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = normalize_phone_number(phone).chars().collect();
    if chars.len() >= 7 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}****{}", head, tail)
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("+91 98765-43210"), "+919876543210");
        assert_eq!(normalize_phone_number("(987) 654-3210"), "9876543210");
    }

    #[test]
    fn test_default_country_code() {
        assert_eq!(with_default_country_code("9876543210", "+91"), "+919876543210");
        assert_eq!(with_default_country_code("+14155550100", "+91"), "+14155550100");
        assert_eq!(with_default_country_code("12345", "+91"), "12345");
    }

    #[test]
    fn test_login_phone_validation() {
        assert!(is_valid_login_phone("+919876543210"));
        assert!(is_valid_login_phone("+123456789012345"));
        assert!(!is_valid_login_phone("+123456789"));
        assert!(!is_valid_login_phone("+1234567890123456"));
        assert!(!is_valid_login_phone("919876543210"));
        assert!(!is_valid_login_phone("+91987654321a"));
    }

    #[test]
    fn test_otp_code_validation() {
        assert!(is_valid_otp_code("012345", 6));
        assert!(!is_valid_otp_code("12345", 6));
        assert!(!is_valid_otp_code("12345a", 6));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+919876543210"), "+91****3210");
        assert_eq!(mask_phone_number("123"), "****");
    }

    #[test]
    fn test_mask_phone_number_counts_characters() {
        assert_eq!(mask_phone_number("12é4567890"), "12é****7890");
        assert_eq!(mask_phone_number("١٢٣٤٥٦٧٨٩٠"), "١٢٣****٧٨٩٠");
        assert_eq!(mask_phone_number("+9198"), "****");
    }

    #[test]
    fn test_only_ascii_digits_are_accepted() {
        assert!(!is_valid_login_phone("+91९८७६५४३२१०"));
        assert_eq!(with_default_country_code("١٢٣٤٥٦٧٨٩٠", "+91"), "١٢٣٤٥٦٧٨٩٠");
    }
}
