//! Utility functions used across the plotkit workspace

use crate::Result;

/// Validate that a string is not empty after trimming
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(crate::PlotKitError::validation_field(
            format!("{} cannot be empty", field_name),
            field_name,
        ))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Group the digits of an integer with the given separator, e.g. 1234567 -> "1.234.567"
pub fn group_digits(value: i64, separator: char) -> String {
    let digits: Vec<char> = value.unsigned_abs().to_string().chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(*c);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty("test", "field").is_ok());
        assert!(validate_non_empty("", "field").is_err());
        assert!(validate_non_empty("   ", "field").is_err());
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0, '.'), "0");
        assert_eq!(group_digits(999, '.'), "999");
        assert_eq!(group_digits(1000, '.'), "1.000");
        assert_eq!(group_digits(1234567, ','), "1,234,567");
        assert_eq!(group_digits(-45000, '.'), "-45.000");
    }
}
