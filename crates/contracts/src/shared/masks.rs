//! Input masks for Brazilian documents, phones and postal codes.
//!
//! Every mask strips non-digits and re-inserts the literal separators of its
//! pattern, so applying a mask twice yields the same string. A separator is only
//! emitted when a digit follows it, which keeps partially typed values clean.

use super::documents::only_digits;

pub const CPF_PATTERN: &str = "000.000.000-00";
pub const CNPJ_PATTERN: &str = "00.000.000/0000-00";
pub const CEP_PATTERN: &str = "00000-000";
pub const PHONE_PATTERN: &str = "(00) 0000-0000";
pub const MOBILE_PATTERN: &str = "(00) 00000-0000";
pub const RG_PATTERN: &str = "00.000.000-0";
pub const STATE_REGISTRATION_PATTERN: &str = "000.000.000.000";

/// Fills `pattern` (`0` = digit slot) with the digits of `value`.
pub fn apply_pattern(value: &str, pattern: &str) -> String {
    let digits = only_digits(value);
    let mut digits = digits.chars().peekable();
    let mut out = String::with_capacity(pattern.len());

    for slot in pattern.chars() {
        if digits.peek().is_none() {
            break;
        }
        if slot == '0' {
            if let Some(d) = digits.next() {
                out.push(d);
            }
        } else {
            out.push(slot);
        }
    }
    out
}

pub fn mask_cpf(value: &str) -> String {
    apply_pattern(value, CPF_PATTERN)
}

pub fn mask_cnpj(value: &str) -> String {
    apply_pattern(value, CNPJ_PATTERN)
}

pub fn mask_cep(value: &str) -> String {
    apply_pattern(value, CEP_PATTERN)
}

/// Landline `(00) 0000-0000` up to 10 digits, mobile `(00) 00000-0000` at 11.
pub fn mask_phone(value: &str) -> String {
    let digits = only_digits(value);
    if digits.len() > 10 {
        apply_pattern(&digits, MOBILE_PATTERN)
    } else {
        apply_pattern(&digits, PHONE_PATTERN)
    }
}

pub fn mask_rg(value: &str) -> String {
    apply_pattern(value, RG_PATTERN)
}

pub fn mask_state_registration(value: &str) -> String {
    apply_pattern(value, STATE_REGISTRATION_PATTERN)
}

/// Where the caret belongs after masking.
///
/// Counts the digits before `caret` in `raw`, then returns the position in
/// `masked` right after the same number of digits. Positions are char offsets.
pub fn caret_after_mask(raw: &str, caret: usize, masked: &str) -> usize {
    let digits_before = raw
        .chars()
        .take(caret)
        .filter(|c| c.is_ascii_digit())
        .count();
    if digits_before == 0 {
        return 0;
    }

    let mut seen = 0;
    for (pos, c) in masked.chars().enumerate() {
        if c.is_ascii_digit() {
            seen += 1;
            if seen == digits_before {
                return pos + 1;
            }
        }
    }
    masked.chars().count()
}
