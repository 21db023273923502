//! Translation of keypad input into canonical arithmetic text.
//!
//! The keypad shows `×`, `÷` and `−`; the evaluator only understands the
//! ASCII operators. Everything outside the arithmetic whitelist is dropped.

use lazy_static::lazy_static;
use regex::Regex;

/// Multiplication sign shown on the keypad.
pub const MULTIPLY_SIGN: char = '×';
/// Division sign shown on the keypad.
pub const DIVIDE_SIGN: char = '÷';
/// Minus sign shown on the keypad (U+2212, not the ASCII hyphen).
pub const MINUS_SIGN: char = '−';

lazy_static! {
    /// Matches any character that may not appear in a canonical expression.
    static ref NOT_CANONICAL: Regex = Regex::new(r"[^0-9+\-*/(). ]").unwrap();

    /// Matches strings made only of canonical characters.
    static ref CANONICAL_ONLY: Regex = Regex::new(r"^[0-9+\-*/(). ]*$").unwrap();
}

/// Convert a keypad buffer into its canonical arithmetic form.
///
/// Display glyphs become ASCII operators, then every character outside
/// `[0-9+\-*/(). ]` is stripped. No structural validation happens here.
pub fn to_canonical(buffer: &str) -> String {
    if buffer.is_empty() {
        return String::new();
    }

    let translated: String = buffer
        .chars()
        .map(|c| match c {
            MULTIPLY_SIGN => '*',
            DIVIDE_SIGN => '/',
            MINUS_SIGN => '-',
            other => other,
        })
        .collect();

    NOT_CANONICAL.replace_all(&translated, "").into_owned()
}

/// Check that `expr` only contains canonical characters.
pub fn is_canonical(expr: &str) -> bool {
    CANONICAL_ONLY.is_match(expr)
}

/// Return the first character that breaks the whitelist, if any.
pub fn first_disallowed(expr: &str) -> Option<char> {
    NOT_CANONICAL
        .find(expr)
        .and_then(|m| m.as_str().chars().next())
}

/// Check whether a single character may be typed into the buffer.
pub fn is_input_char(c: char) -> bool {
    c.is_ascii_digit()
        || matches!(
            c,
            '+' | '-' | '*' | '/' | '(' | ')' | '.' | MULTIPLY_SIGN | DIVIDE_SIGN | MINUS_SIGN
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_translated() {
        assert_eq!(to_canonical("2×3"), "2*3");
        assert_eq!(to_canonical("8÷4"), "8/4");
        assert_eq!(to_canonical("5−1"), "5-1");
        assert_eq!(to_canonical("(1+2)×3÷4−5"), "(1+2)*3/4-5");
    }

    #[test]
    fn test_foreign_chars_stripped() {
        assert_eq!(to_canonical("2a+b3"), "2+3");
        assert_eq!(to_canonical("1,000"), "1000");
        assert_eq!(to_canonical("x^2"), "2");
        assert_eq!(to_canonical("1 + 2"), "1 + 2");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_canonical(""), "");
        assert_eq!(to_canonical("abc"), "");
    }

    #[test]
    fn test_idempotent_on_canonical() {
        for input in ["2+2", "(1.5 - 3) * 4 / 2", "", "((", "-.5"] {
            let once = to_canonical(input);
            assert_eq!(to_canonical(&once), once);
        }
    }

    #[test]
    fn test_output_stays_in_whitelist() {
        let typed: String = "0123456789+-*/×÷−().".chars().cycle().take(200).collect();
        let canonical = to_canonical(&typed);
        assert!(is_canonical(&canonical));
        assert_eq!(first_disallowed(&canonical), None);
    }

    #[test]
    fn test_first_disallowed() {
        assert_eq!(first_disallowed("2+2"), None);
        assert_eq!(first_disallowed("2+x"), Some('x'));
        assert_eq!(first_disallowed("2×2"), Some('×'));
    }

    #[test]
    fn test_input_chars() {
        assert!(is_input_char('7'));
        assert!(is_input_char('×'));
        assert!(is_input_char('-'));
        assert!(is_input_char('.'));
        assert!(!is_input_char(' '));
        assert!(!is_input_char('^'));
        assert!(!is_input_char('e'));
    }
}
