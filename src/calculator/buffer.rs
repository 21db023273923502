//! The editable expression buffer behind the keypad.

use super::sanitize::is_input_char;

/// Characters typed so far, in display form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append one token.
    ///
    /// Returns `false` when the token was rejected: characters outside the
    /// keypad alphabet, or a `.` directly after another `.`. Earlier dots in
    /// the same number are not checked.
    pub fn append(&mut self, token: char) -> bool {
        if !is_input_char(token) {
            return false;
        }
        if token == '.' && self.text.ends_with('.') {
            return false;
        }
        self.text.push(token);
        true
    }

    /// Remove the last character. Returns `false` if the buffer was empty.
    pub fn delete_last(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Append `(` when there are no more opening than closing parentheses,
    /// otherwise `)`. Returns the character appended.
    pub fn toggle_parenthesis(&mut self) -> char {
        let open = self.text.matches('(').count();
        let close = self.text.matches(')').count();
        let paren = if open <= close { '(' } else { ')' };
        self.text.push(paren);
        paren
    }

    /// Replace the contents with a committed result.
    pub(crate) fn replace(&mut self, text: String) {
        self.text = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> InputBuffer {
        let mut buf = InputBuffer::new();
        for c in text.chars() {
            assert!(buf.append(c), "rejected {c:?}");
        }
        buf
    }

    #[test]
    fn test_append_and_delete() {
        let mut buf = buffer("12×3");
        assert_eq!(buf.as_str(), "12×3");
        assert!(buf.delete_last());
        assert_eq!(buf.as_str(), "12×");
        assert!(buf.delete_last());
        assert_eq!(buf.as_str(), "12");
    }

    #[test]
    fn test_delete_on_empty() {
        let mut buf = InputBuffer::new();
        assert!(!buf.delete_last());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_double_dot_rejected_at_tail() {
        let mut buf = buffer("1.");
        assert!(!buf.append('.'));
        assert_eq!(buf.as_str(), "1.");
    }

    #[test]
    fn test_dot_allowed_elsewhere() {
        let mut buf = buffer("1.2");
        assert!(buf.append('.'));
        assert!(buf.append('3'));
        assert_eq!(buf.as_str(), "1.2.3");
    }

    #[test]
    fn test_unknown_tokens_rejected() {
        let mut buf = InputBuffer::new();
        assert!(!buf.append('x'));
        assert!(!buf.append(' '));
        assert!(!buf.append('^'));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_toggle_parenthesis() {
        let mut buf = InputBuffer::new();
        assert_eq!(buf.toggle_parenthesis(), '(');
        assert_eq!(buf.as_str(), "(");
        assert_eq!(buf.toggle_parenthesis(), ')');
        assert_eq!(buf.as_str(), "()");
        assert_eq!(buf.toggle_parenthesis(), '(');
        assert_eq!(buf.as_str(), "()(");
    }

    #[test]
    fn test_toggle_after_stray_close() {
        let mut buf = buffer(")");
        assert_eq!(buf.toggle_parenthesis(), '(');
        assert_eq!(buf.toggle_parenthesis(), '(');
        assert_eq!(buf.as_str(), ")((");
    }
}
