//! Number formatting for the calculator display.
//!
//! Small fractional values are shown as plain decimals rounded to ten places.
//! Integers and very large magnitudes get locale digit grouping.

use serde::{Deserialize, Serialize};

/// Values at or above this magnitude are always grouped.
const PLAIN_DECIMAL_LIMIT: f64 = 1e12;

/// Decimal places kept for plain fractional output.
const PLAIN_DECIMAL_PLACES: usize = 10;

/// Fraction digits kept for grouped output, as locale formatting does by default.
const GROUPED_FRACTION_DIGITS: usize = 3;

/// Digit grouping and decimal separators for grouped output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLocale {
    /// Inserted between groups of three integer digits. Empty disables grouping.
    pub group_separator: String,
    /// Separates integer and fractional digits.
    pub decimal_separator: String,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::en_us()
    }
}

impl NumberLocale {
    pub fn new(group_separator: impl Into<String>, decimal_separator: impl Into<String>) -> Self {
        Self {
            group_separator: group_separator.into(),
            decimal_separator: decimal_separator.into(),
        }
    }

    pub fn en_us() -> Self {
        Self::new(",", ".")
    }

    /// Look up a locale by tag. Matching is case-insensitive and accepts `_`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().replace('_', "-").to_ascii_lowercase();
        let locale = match tag.as_str() {
            "en" | "en-us" | "en-gb" | "en-au" | "en-ca" | "ja-jp" | "zh-cn" => Self::new(",", "."),
            "de" | "de-de" | "es-es" | "it-it" | "nl-nl" | "pt-br" | "id-id" => Self::new(".", ","),
            // Narrow no-break space, as used by French number formatting.
            "fr" | "fr-fr" => Self::new("\u{202F}", ","),
            "ru" | "ru-ru" | "pl-pl" | "cs-cz" | "sv-se" => Self::new("\u{A0}", ","),
            "de-ch" => Self::new("’", "."),
            "none" | "c" | "posix" => Self::new("", "."),
            _ => return None,
        };
        Some(locale)
    }
}

/// Formats calculator results for a fixed locale.
#[derive(Clone, Debug, Default)]
pub struct NumberFormatter {
    locale: NumberLocale,
}

impl NumberFormatter {
    pub fn new(locale: NumberLocale) -> Self {
        Self { locale }
    }

    /// Format a finite number for display.
    pub fn format(&self, value: f64) -> String {
        // Negative zero shows as `0`, same as the committed buffer.
        let value = if value == 0.0 { 0.0 } else { value };
        if value.abs() < PLAIN_DECIMAL_LIMIT && value.fract() != 0.0 {
            plain_decimal(value)
        } else {
            self.grouped(value)
        }
    }

    fn grouped(&self, value: f64) -> String {
        let rendered = trim_fraction(format!("{:.*}", GROUPED_FRACTION_DIGITS, value));
        let (sign, digits) = match rendered.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", rendered.as_str()),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits, None),
        };

        let mut result = String::from(sign);
        result.push_str(&group_digits(int_part, &self.locale.group_separator));
        if let Some(frac) = frac_part {
            result.push_str(&self.locale.decimal_separator);
            result.push_str(frac);
        }
        result
    }
}

/// Format a number with the default `en-US` locale.
pub fn format_number(value: f64) -> String {
    NumberFormatter::default().format(value)
}

/// Render a value as a plain decimal string with no exponent and no grouping.
///
/// This is the form written back into the input buffer after evaluation.
pub fn plain(value: f64) -> String {
    if value == 0.0 {
        // Drops the sign of negative zero.
        return "0".to_string();
    }
    format!("{value}")
}

/// Round to ten decimal places and drop redundant trailing zeros.
fn plain_decimal(value: f64) -> String {
    let rounded = format!("{:.*}", PLAIN_DECIMAL_PLACES, value);
    match rounded.parse::<f64>() {
        Ok(v) => plain(v),
        Err(_) => trim_fraction(rounded),
    }
}

/// Strip trailing zeros from the fractional part, and the dot if nothing is left.
fn trim_fraction(rendered: String) -> String {
    if !rendered.contains('.') {
        return rendered;
    }
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Insert `separator` between groups of three digits, counting from the right.
fn group_digits(digits: &str, separator: &str) -> String {
    if separator.is_empty() {
        return digits.to_string();
    }

    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push_str(&separator.chars().rev().collect::<String>());
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_noise_rounded_away() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_number(2.0 / 3.0), "0.6666666667");
    }

    #[test]
    fn test_plain_decimal_output() {
        assert_eq!(format_number(1234.5), "1234.5");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(0.0000000001), "0.0000000001");
        assert_eq!(format_number(0.99999999999), "1");
        assert_eq!(format_number(-0.00000000001), "0");
    }

    #[test]
    fn test_integers_grouped() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(-1234567.0), "-1,234,567");
        assert_eq!(format_number(1_000_000_000_000.0), "1,000,000,000,000");
        assert_eq!(format_number(1e21), "1,000,000,000,000,000,000,000");
    }

    #[test]
    fn test_large_fractions_grouped() {
        assert_eq!(format_number(1e12 + 0.5), "1,000,000,000,000.5");
        assert_eq!(format_number(-2.5e12), "-2,500,000,000,000");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-0.0), plain(-0.0));
    }

    #[test]
    fn test_other_locales() {
        let de = NumberFormatter::new(NumberLocale::from_tag("de-DE").unwrap());
        assert_eq!(de.format(1234567.0), "1.234.567");
        assert_eq!(de.format(1e12 + 0.25), "1.000.000.000.000,25");
        // Plain decimals are not localized.
        assert_eq!(de.format(0.5), "0.5");

        let ch = NumberFormatter::new(NumberLocale::from_tag("de_CH").unwrap());
        assert_eq!(ch.format(12345.0), "12’345");

        let none = NumberFormatter::new(NumberLocale::from_tag("none").unwrap());
        assert_eq!(none.format(1234567.0), "1234567");
    }

    #[test]
    fn test_unknown_locale() {
        assert_eq!(NumberLocale::from_tag("xx-YY"), None);
    }

    #[test]
    fn test_plain_round_trip_form() {
        assert_eq!(plain(4.0), "4");
        assert_eq!(plain(-0.0), "0");
        assert_eq!(plain(0.30000000000000004), "0.30000000000000004");
        assert_eq!(plain(1e21), "1000000000000000000000");
    }
}
