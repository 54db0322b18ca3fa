//! Waste-percentage normalization for the materials sheet.
//!
//! The materials spreadsheet writes scrap loss as free text ("0.80%", "1,5",
//! "0,3 %"). The importer keeps the first number in the text and converts it
//! to the fraction stored in `material_types.waste_percentage`:
//!
//! 1. values `>= 1` are divided by 100, smaller values are kept;
//! 2. then any value in `(0, 10]` is divided by 100, overriding step 1.
//!
//! Since the extracted number never carries a sign, every positive value ends
//! up divided by 100 and only zero passes through unchanged. The rule is kept
//! as the spreadsheets have always been read; sheets that already hold
//! fractions (0.008) would be scaled a second time.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Returns the first run of digits, dots and commas in `raw`.
#[must_use]
pub fn extract_numeric_token(raw: &str) -> Option<&str> {
    let is_numeric = |c: char| c.is_ascii_digit() || c == '.' || c == ',';
    let start = raw.find(is_numeric)?;
    let rest = &raw[start..];
    let end = rest.find(|c: char| !is_numeric(c)).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Applies the percentage-or-fraction rule to an extracted value.
#[must_use]
pub fn classify_waste_value(value: Decimal) -> Decimal {
    let mut fraction = if value >= Decimal::ONE {
        value / Decimal::ONE_HUNDRED
    } else {
        value
    };
    if value > Decimal::ZERO && value <= Decimal::TEN {
        fraction = value / Decimal::ONE_HUNDRED;
    }
    fraction
}

/// Converts a raw spreadsheet cell into a waste fraction.
///
/// Text without any digits yields zero.
///
/// # Errors
/// Returns [`Error::Import`] when the numeric run is not a valid number,
/// e.g. `"1.2.3"`.
pub fn normalize_waste_percentage(raw: &str) -> Result<Decimal> {
    let Some(token) = extract_numeric_token(raw.trim()) else {
        return Ok(Decimal::ZERO);
    };
    let value = Decimal::from_str(&token.replace(',', ".")).map_err(|e| Error::Import {
        message: format!("Invalid waste percentage '{raw}': {e}"),
    })?;
    Ok(classify_waste_value(value))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::dec;

    #[test]
    fn test_extract_numeric_token() {
        assert_eq!(extract_numeric_token("0.80%"), Some("0.80"));
        assert_eq!(extract_numeric_token("потери 1,5 %"), Some("1,5"));
        assert_eq!(extract_numeric_token("12 of 30"), Some("12"));
        assert_eq!(extract_numeric_token("нет данных"), None);
        assert_eq!(extract_numeric_token(""), None);
    }

    #[test]
    fn test_documented_values() {
        let cases = [
            ("0.5", "0.005"),
            ("1", "0.01"),
            ("5", "0.05"),
            ("10", "0.1"),
            ("50", "0.5"),
        ];
        for (raw, expected) in cases {
            assert_eq!(
                normalize_waste_percentage(raw).unwrap(),
                dec(expected),
                "input {raw}"
            );
        }
    }

    #[test]
    fn test_percent_sign_and_comma() {
        assert_eq!(normalize_waste_percentage("0.80%").unwrap(), dec("0.008"));
        assert_eq!(normalize_waste_percentage(" 0,80 % ").unwrap(), dec("0.008"));
        assert_eq!(normalize_waste_percentage("2,5%").unwrap(), dec("0.025"));
    }

    #[test]
    fn test_fraction_input_is_scaled_again() {
        assert_eq!(normalize_waste_percentage("0.008").unwrap(), dec("0.00008"));
    }

    #[test]
    fn test_zero_and_missing_values() {
        assert_eq!(normalize_waste_percentage("0").unwrap(), Decimal::ZERO);
        assert_eq!(normalize_waste_percentage("0%").unwrap(), Decimal::ZERO);
        assert_eq!(normalize_waste_percentage("-").unwrap(), Decimal::ZERO);
        assert_eq!(normalize_waste_percentage("").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_malformed_number_is_import_error() {
        let result = normalize_waste_percentage("1.2.3%");
        assert!(matches!(result, Err(Error::Import { .. })));
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(classify_waste_value(dec("10")), dec("0.1"));
        assert_eq!(classify_waste_value(dec("10.01")), dec("0.1001"));
        assert_eq!(classify_waste_value(dec("0.99")), dec("0.0099"));
        assert_eq!(classify_waste_value(Decimal::ZERO), Decimal::ZERO);
    }
}
