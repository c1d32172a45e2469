//! Hidden email/password pair used to log into the platform on the
//! customer's behalf.

use rand::rngs::OsRng;
use rand::Rng;

/// Characters a generated hidden password is drawn from
pub const PASSWORD_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Derive the hidden email for a phone number
///
/// Strips `+`, `-` and spaces from the phone and builds
/// `customer.{digits}@{domain}`. Deterministic, so the same phone always maps
/// to the same address.
///
/// # Arguments
///
/// * `phone` - Phone number, normally E.164
/// * `domain` - Domain used for hidden addresses
pub fn derive_hidden_email(phone: &str, domain: &str) -> String {
    let clean_phone: String = phone
        .chars()
        .filter(|c| !matches!(c, '+' | '-' | ' '))
        .collect();
    format!("customer.{}@{}", clean_phone, domain)
}

/// Generate a random password of `length` characters from [`PASSWORD_ALPHABET`]
pub fn generate_hidden_password(length: usize) -> String {
    (0..length)
        .map(|_| char::from(PASSWORD_ALPHABET[OsRng.gen_range(0..PASSWORD_ALPHABET.len())]))
        .collect()
}
