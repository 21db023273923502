//! The calculator engine: buffer editing, live preview and final evaluation.

use super::buffer::InputBuffer;
use super::command::Command;
use super::evaluation::{EvalError, evaluate};
use super::format::{NumberFormatter, plain};
use super::sanitize::to_canonical;
use crate::display::{DisplayState, ERROR_TEXT, PREVIEW_BLANK, PREVIEW_INVALID};
use serde::Serialize;
use tracing::debug;

/// Coarse state of an engine, derived from its buffer and last result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Empty,
    Editing,
    Evaluated,
    Error,
}

/// One calculator's worth of state. Instances are fully independent.
#[derive(Clone, Debug, Default)]
pub struct ExpressionEngine {
    buffer: InputBuffer,
    last_result: Option<f64>,
    /// Set by a failed final evaluation, cleared by the next edit.
    failed: bool,
    formatter: NumberFormatter,
}

impl ExpressionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine that formats results with the given formatter.
    pub fn with_formatter(formatter: NumberFormatter) -> Self {
        Self {
            formatter,
            ..Self::default()
        }
    }

    pub fn buffer(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// Canonical form of the current buffer.
    pub fn canonical(&self) -> String {
        to_canonical(self.buffer.as_str())
    }

    pub fn state(&self) -> EngineState {
        if self.failed {
            EngineState::Error
        } else if self.buffer.is_empty() {
            EngineState::Empty
        } else if self
            .last_result
            .is_some_and(|value| plain(value) == self.buffer.as_str())
        {
            EngineState::Evaluated
        } else {
            EngineState::Editing
        }
    }

    /// Append a token. Returns `false` if it was rejected.
    pub fn append(&mut self, token: char) -> bool {
        let accepted = self.buffer.append(token);
        if accepted {
            self.failed = false;
        } else {
            debug!(?token, buffer = self.buffer.as_str(), "rejected token");
        }
        accepted
    }

    pub fn delete_last(&mut self) {
        self.buffer.delete_last();
        self.failed = false;
    }

    /// Clear the buffer and forget the last result.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_result = None;
        self.failed = false;
    }

    pub fn toggle_parenthesis(&mut self) -> char {
        self.failed = false;
        self.buffer.toggle_parenthesis()
    }

    /// Evaluate the buffer without committing anything.
    pub fn preview(&self) -> String {
        match evaluate(&self.canonical()) {
            Ok(value) => format!("= {}", self.formatter.format(value)),
            Err(err) if err.is_blank() => PREVIEW_BLANK.to_string(),
            Err(_) => PREVIEW_INVALID.to_string(),
        }
    }

    /// Commit the current expression.
    ///
    /// Returns `Ok(None)` when there is nothing to evaluate. On success the
    /// buffer is replaced by the plain decimal form of the result so the next
    /// operator continues from it, and the formatted result is returned. On
    /// failure the buffer and last result are left untouched.
    pub fn evaluate_final(&mut self) -> Result<Option<String>, EvalError> {
        let canonical = self.canonical();
        if canonical.is_empty() {
            return Ok(None);
        }

        match evaluate(&canonical) {
            Ok(value) => {
                debug!(expression = %canonical, value, "evaluated");
                self.last_result = Some(value);
                self.buffer.replace(plain(value));
                self.failed = false;
                Ok(Some(self.formatter.format(value)))
            }
            Err(err) => {
                debug!(expression = %canonical, error = %err, "evaluation failed");
                self.failed = true;
                Err(err)
            }
        }
    }

    /// Apply a command and return the resulting display.
    pub fn dispatch(&mut self, command: Command) -> DisplayState {
        match command {
            Command::Append(token) => {
                self.append(token);
            }
            Command::Delete => self.delete_last(),
            Command::Reset => self.reset(),
            Command::ToggleParen => {
                self.toggle_parenthesis();
            }
            Command::Evaluate => {
                // Failures are reflected in the display.
                let _ = self.evaluate_final();
            }
        }
        self.display()
    }

    /// Current display contents.
    pub fn display(&self) -> DisplayState {
        let buffer = self.buffer.as_str();
        let primary = if self.failed {
            ERROR_TEXT.to_string()
        } else if buffer.is_empty() {
            "0".to_string()
        } else {
            buffer.to_string()
        };

        DisplayState {
            primary,
            history: buffer.to_string(),
            preview: self.preview(),
        }
    }
}
