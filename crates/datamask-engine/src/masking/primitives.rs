//! Pure masking primitives.

use datamask_core::Number;

/// Character used for masked positions.
pub const MASK_CHAR: char = '*';

/// Keep the first and last character, mask everything in between.
///
/// Strings of two characters or fewer are masked entirely.
pub fn mask_text(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let len = chars.len();
    if len <= 2 {
        return MASK_CHAR.to_string().repeat(len);
    }

    let mut masked = String::with_capacity(value.len());
    masked.push(chars[0]);
    masked.extend(std::iter::repeat_n(MASK_CHAR, len - 2));
    masked.push(chars[len - 1]);
    masked
}

/// Apply [`mask_text`] to the base-10 digits of a number's integer part.
pub fn mask_numeric(value: Number) -> String {
    mask_text(&integer_digits(value))
}

/// Mask the local part of an email address, keeping the domain readable.
///
/// Values without an `@` are masked as plain text.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{}@{domain}", mask_text(local)),
        None => mask_text(email),
    }
}

/// Mask every digit except the last two; other characters are kept.
pub fn mask_phone(phone: &str) -> String {
    let total_digits = phone.chars().filter(char::is_ascii_digit).count();
    let keep_from = total_digits.saturating_sub(2);

    let mut seen = 0;
    phone
        .chars()
        .map(|ch| {
            if ch.is_ascii_digit() {
                seen += 1;
                if seen <= keep_from {
                    return MASK_CHAR;
                }
            }
            ch
        })
        .collect()
}

/// Base-10 digit string of the integer part of `value`, sign dropped.
pub fn integer_digits(value: Number) -> String {
    match value {
        Number::Int(value) => value.unsigned_abs().to_string(),
        Number::Float(value) => format!("{:.0}", value.trunc().abs()),
    }
}
