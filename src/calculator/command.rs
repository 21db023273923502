//! Commands sent to the engine by keypad buttons and keyboard keys.

use super::sanitize::{DIVIDE_SIGN, MINUS_SIGN, MULTIPLY_SIGN};

/// One input event, already decoded from whatever produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Type a digit, operator, parenthesis or decimal point.
    Append(char),
    /// Remove the last character.
    Delete,
    /// Clear the buffer and the last result.
    Reset,
    /// Insert `(` or `)` depending on the current balance.
    ToggleParen,
    /// Commit the current expression.
    Evaluate,
}

impl Command {
    /// Decode a keyboard key name or a keypad button action.
    ///
    /// ASCII `*`, `/` and `-` become their display glyphs so the buffer reads
    /// the same as when the on-screen buttons are used. Returns `None` for
    /// keys the calculator ignores.
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key {
            "Enter" | "=" | "equals" | "evaluate" => Self::Evaluate,
            "Backspace" | "del" | "delete" => Self::Delete,
            "Escape" | "clear" => Self::Reset,
            "paren" | "toggle-parenthesis" => Self::ToggleParen,
            _ => {
                let mut chars = key.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Self::from_char(c)?
            }
        };
        Some(command)
    }

    /// Decode a single typed character.
    pub fn from_char(c: char) -> Option<Self> {
        let token = match c {
            '0'..='9' | '+' | '(' | ')' | '.' => c,
            '*' | MULTIPLY_SIGN => MULTIPLY_SIGN,
            '/' | DIVIDE_SIGN => DIVIDE_SIGN,
            '-' | MINUS_SIGN => MINUS_SIGN,
            '=' => return Some(Self::Evaluate),
            _ => return None,
        };
        Some(Self::Append(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys() {
        assert_eq!(Command::from_key("Enter"), Some(Command::Evaluate));
        assert_eq!(Command::from_key("="), Some(Command::Evaluate));
        assert_eq!(Command::from_key("Backspace"), Some(Command::Delete));
        assert_eq!(Command::from_key("Escape"), Some(Command::Reset));
    }

    #[test]
    fn test_button_actions() {
        assert_eq!(Command::from_key("clear"), Some(Command::Reset));
        assert_eq!(Command::from_key("del"), Some(Command::Delete));
        assert_eq!(Command::from_key("paren"), Some(Command::ToggleParen));
        assert_eq!(Command::from_key("equals"), Some(Command::Evaluate));
        assert_eq!(Command::from_key("toggle-parenthesis"), Some(Command::ToggleParen));
    }

    #[test]
    fn test_ascii_operators_mapped_to_glyphs() {
        assert_eq!(Command::from_key("*"), Some(Command::Append('×')));
        assert_eq!(Command::from_key("/"), Some(Command::Append('÷')));
        assert_eq!(Command::from_key("-"), Some(Command::Append('−')));
        assert_eq!(Command::from_key("+"), Some(Command::Append('+')));
        assert_eq!(Command::from_key("×"), Some(Command::Append('×')));
    }

    #[test]
    fn test_digits_and_punctuation() {
        assert_eq!(Command::from_key("7"), Some(Command::Append('7')));
        assert_eq!(Command::from_key("."), Some(Command::Append('.')));
        assert_eq!(Command::from_key("("), Some(Command::Append('(')));
    }

    #[test]
    fn test_ignored_keys() {
        assert_eq!(Command::from_key("a"), None);
        assert_eq!(Command::from_key("Shift"), None);
        assert_eq!(Command::from_key(""), None);
        assert_eq!(Command::from_key("12"), None);
    }
}
