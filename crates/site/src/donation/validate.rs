//! Field validators for the donation intake forms.
//!
//! These are deliberately strict, fixed-shape checks: Indian pincode and PAN
//! formats, 10-digit phone numbers, Luhn-checked card numbers, MM/YY expiry.
//! Each validator answers a yes/no question; the state machine in the parent
//! module turns failures into field-scoped errors.

use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));
static PAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid PAN regex"));
static PINCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("valid pincode regex"));
static UPI_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z]{2,}$").expect("valid UPI regex"));

/// Exactly 10 digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone)
}

/// 5 letters + 4 digits + 1 letter. Expects input already uppercased;
/// lowercase input must be normalized before this check.
#[must_use]
pub fn is_valid_pan(pan: &str) -> bool {
    PAN.is_match(pan)
}

/// Exactly 6 digits.
#[must_use]
pub fn is_valid_pincode(pincode: &str) -> bool {
    PINCODE.is_match(pincode)
}

/// `name@handle` shape: local part of letters/digits/`._-`, alphabetic
/// handle of at least two characters.
#[must_use]
pub fn is_valid_upi_id(upi_id: &str) -> bool {
    UPI_ID.is_match(upi_id)
}

/// Luhn checksum over a digits-only string.
///
/// Doubles every second digit from the rightmost, subtracting 9 when the
/// doubled value exceeds 9; the sum of all digits must be divisible by 10.
#[must_use]
pub fn luhn_valid(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut double = false;

    for c in digits.chars().rev() {
        let Some(d) = c.to_digit(10) else {
            return false;
        };

        let mut d = d;
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }

        sum += d;
        double = !double;
    }

    sum % 10 == 0
}

/// Card number check: after stripping spaces, 13-19 digits passing Luhn.
#[must_use]
pub fn is_valid_card_number(raw: &str) -> bool {
    let clean: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if !clean.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    if clean.len() < 13 || clean.len() > 19 {
        return false;
    }

    luhn_valid(&clean)
}

/// MM/YY expiry check against an explicit "today" (`month` 1-12, two-digit
/// `year`). Valid when the month parses into [1, 12] and the expiry is not
/// strictly before the current month/year.
#[must_use]
pub fn is_valid_expiry_at(expiry: &str, current_month: u32, current_year: u32) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };

    let (Ok(month), Ok(year)) = (month.parse::<u32>(), year.parse::<u32>()) else {
        return false;
    };

    if !(1..=12).contains(&month) {
        return false;
    }
    if year < current_year {
        return false;
    }
    if year == current_year && month < current_month {
        return false;
    }

    true
}

/// MM/YY expiry check against the current date.
#[must_use]
pub fn is_valid_expiry(expiry: &str) -> bool {
    let now = Utc::now();
    #[allow(clippy::cast_sign_loss)] // years 2000-2099 as two digits
    let current_year = (now.year() % 100) as u32;
    is_valid_expiry_at(expiry, now.month(), current_year)
}

/// Exactly 3 digits.
#[must_use]
pub fn is_valid_cvv(cvv: &str) -> bool {
    cvv.len() == 3 && cvv.chars().all(|c| c.is_ascii_digit())
}
