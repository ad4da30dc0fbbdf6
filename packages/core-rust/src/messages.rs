//! Default messages for compiled field rules.
//!
//! The live validator and the generated source both read messages out of
//! [`crate::rules::FieldRules`], which takes them from here.

use crate::literal::format_number;

pub const INVALID_EMAIL: &str = "Invalid email address";
pub const INVALID_FORMAT: &str = "Invalid format";
pub const INVALID_PHONE: &str = "Invalid phone number";
pub const PHONE_TEN_DIGITS: &str = "Phone number must be 10 digits";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";
pub const INVALID_SELECTION: &str = "Invalid selection";

/// Minimum password length when no custom pattern is given.
pub const PASSWORD_MIN_LENGTH: u64 = 8;

#[must_use]
pub fn required(label: &str) -> String {
    format!("{label} is required")
}

#[must_use]
pub fn min_length(label: &str, min: u64) -> String {
    format!("{label} must be at least {min} characters")
}

#[must_use]
pub fn max_length(label: &str, max: u64) -> String {
    format!("{label} must be at most {max} characters")
}

#[must_use]
pub fn min_value(min: f64) -> String {
    format!("Minimum value is {}", format_number(min))
}

#[must_use]
pub fn max_value(max: f64) -> String {
    format!("Maximum value is {}", format_number(max))
}

#[must_use]
pub fn multiple_of(step: f64) -> String {
    format!("Value must be a multiple of {}", format_number(step))
}

#[must_use]
pub fn select_at_least_one(label: &str) -> String {
    format!("Select at least one option for {label}")
}

#[must_use]
pub fn must_be_checked(label: &str) -> String {
    format!("{label} must be checked")
}

#[must_use]
pub fn must_be_on(label: &str) -> String {
    format!("{label} must be turned on")
}

#[must_use]
pub fn not_a_string(label: &str) -> String {
    format!("{label} must be a string")
}

#[must_use]
pub fn not_a_number(label: &str) -> String {
    format!("{label} must be a number")
}

#[must_use]
pub fn not_a_boolean(label: &str) -> String {
    format!("{label} must be a boolean")
}

#[must_use]
pub fn not_a_list(label: &str) -> String {
    format!("{label} must be a list of options")
}
