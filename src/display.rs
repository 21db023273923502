//! What the calculator screen shows after each operation.

use serde::Serialize;
use std::fmt;

/// Primary display text after a failed evaluation.
pub const ERROR_TEXT: &str = "Error";
/// Preview shown when there is nothing to evaluate.
pub const PREVIEW_BLANK: &str = "= 0";
/// Preview shown when the expression cannot be evaluated yet.
pub const PREVIEW_INVALID: &str = "= —";

/// The three strings handed to the display after every operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    /// Main line: the buffer, `0` when empty, or `Error`.
    pub primary: String,
    /// Mirror of the current buffer.
    pub history: String,
    /// Live preview, always starting with `= `.
    pub preview: String,
}

impl DisplayState {
    /// Whether the primary line currently shows the error marker.
    pub fn is_error(&self) -> bool {
        self.primary == ERROR_TEXT
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.history.is_empty() && self.history != self.primary {
            writeln!(f, "{}", self.history)?;
        }
        writeln!(f, "{}", self.primary)?;
        write!(f, "{}", self.preview)
    }
}
