use lazy_static::lazy_static;
use regex::Regex;
use sea_orm::prelude::Decimal;

lazy_static! {
    // Digits with optional leading + and inner dashes, e.g. +123456789 or 123-456-7890
    static ref PHONE_REGEX: Regex =
        Regex::new(r"^(\+?\d[\d\-]{6,}\d)$").expect("phone regex is valid");
}

pub fn phone_is_valid(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Row-level validation messages for bulk customer creation.
///
/// Mirrors the single-create checks but prefixes each message with the
/// 1-based row number so callers can report partial failures.
pub fn bulk_row_errors(row_number: usize, name: &str, email: &str, phone: Option<&str>) -> Vec<String> {
    let mut errs = Vec::new();
    if let Some(phone) = phone {
        if !phone_is_valid(phone) {
            errs.push(format!("Row {}: Invalid phone format", row_number));
        }
    }
    if name.is_empty() {
        errs.push(format!("Row {}: Name is required", row_number));
    }
    if email.is_empty() {
        errs.push(format!("Row {}: Email is required", row_number));
    }
    errs
}

/// Check the raw product mutation arguments, normalizing the price to two
/// decimal places. Returns every failed check, not just the first.
pub fn validate_product_input(price: f64, stock: i64) -> Result<(Decimal, i32), Vec<String>> {
    let mut errors = Vec::new();

    let price = match Decimal::try_from(price) {
        Ok(price) if price > Decimal::ZERO => Some(price.round_dp(2)),
        Ok(_) => {
            errors.push("Price must be positive".to_string());
            None
        }
        Err(_) => {
            errors.push("Invalid price".to_string());
            None
        }
    };
    if stock < 0 {
        errors.push("Stock cannot be negative".to_string());
    }

    match (price, errors.is_empty()) {
        // GraphQL Int is 32-bit, so the cast cannot truncate
        (Some(price), true) => Ok((price, stock as i32)),
        _ => Err(errors),
    }
}
