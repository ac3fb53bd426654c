//! Reusable field validators for order input

use crate::core::error::ValidationError;
use regex::Regex;
use std::sync::OnceLock;

/// Local mobile format: `08` followed by 7 to 11 digits (9 to 13 characters)
pub const PHONE_PATTERN: &str = r"^08[0-9]{7,11}$";

fn phone_regex() -> &'static Regex {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    PHONE_REGEX.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is valid"))
}

/// Required text fields fail when empty after trimming
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone)
}

/// Validator: phone must match [`PHONE_PATTERN`]
pub fn phone(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone {
            phone: value.to_string(),
        })
    }
}
