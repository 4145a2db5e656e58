//! Field-level rules shared by request payloads and record types.

use std::{ops::RangeInclusive, str::FromStr, sync::LazyLock};

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// A rejected value, optionally tied to the field that carried it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Option<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// Rules a value must satisfy beyond having the right shape.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        self.iter().try_for_each(Validate::validate)
    }
}

pub fn non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{field} is required")));
    }
    Ok(())
}

pub fn email(field: &str, value: &str) -> Result<(), ValidationError> {
    if !EMAIL.is_match(value) {
        return Err(ValidationError::new(field, "Invalid email address"));
    }
    Ok(())
}

/// Lengths count characters, not bytes.
pub fn min_chars(field: &str, value: &str, min: usize) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError::new(
            field,
            format!("{field} must be at least {min} characters"),
        ));
    }
    Ok(())
}

pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("{field} must be at most {max} characters"),
        ));
    }
    Ok(())
}

pub fn in_range(
    field: &str,
    value: i32,
    range: RangeInclusive<i32>,
) -> Result<(), ValidationError> {
    if !range.contains(&value) {
        return Err(ValidationError::new(
            field,
            format!(
                "{field} must be between {} and {}",
                range.start(),
                range.end()
            ),
        ));
    }
    Ok(())
}

/// Accepts non-negative decimal text such as `"12"` or `"4.50"`.
pub fn decimal_text(field: &str, value: &str) -> Result<(), ValidationError> {
    match Decimal::from_str(value.trim()) {
        Ok(amount) if !amount.is_sign_negative() => Ok(()),
        Ok(_) => Err(ValidationError::new(
            field,
            format!("{field} must not be negative"),
        )),
        Err(_) => Err(ValidationError::new(
            field,
            format!("{field} must be a decimal number"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("student@campus.edu")]
    #[case("a.b+c@mail.example.org")]
    fn accepts_well_formed_email(#[case] value: &str) {
        assert!(email("email", value).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("no-at-sign")]
    #[case("two@@campus.edu")]
    #[case("missing@tld")]
    #[case("spaces in@campus.edu")]
    fn rejects_malformed_email(#[case] value: &str) {
        let err = email("email", value).expect_err("malformed email must fail");
        assert_eq!(err.field.as_deref(), Some("email"));
    }

    #[rstest]
    #[case("0", true)]
    #[case("24.99", true)]
    #[case(" 5.0 ", true)]
    #[case("-1", false)]
    #[case("twelve", false)]
    #[case("", false)]
    fn decimal_text_rules(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(decimal_text("price", value).is_ok(), ok);
    }

    #[test]
    fn char_limits_count_characters() {
        let accented = "é".repeat(1000);
        assert!(max_chars("comment", &accented, 1000).is_ok());
        assert!(max_chars("comment", &format!("{accented}x"), 1000).is_err());
        assert!(min_chars("password", "abcde", 6).is_err());
        assert!(min_chars("password", "abcdef", 6).is_ok());
    }

    #[test]
    fn range_error_names_bounds() {
        let err = in_range("rating", 6, 1..=5).expect_err("out of range");
        assert_eq!(err.message, "rating must be between 1 and 5");
        assert_eq!(err.field.as_deref(), Some("rating"));
    }
}
