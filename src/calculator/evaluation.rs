//! Safe evaluation of canonical expressions.
//!
//! Wraps the arithmetic parser with the whitelist re-check and the
//! finiteness check, and classifies every failure as an [`EvalError`].

use super::format::NumberFormatter;
use super::parser::parse_and_eval;
use super::sanitize::{first_disallowed, to_canonical};
use thiserror::Error;

/// Reasons an expression could not produce a displayable number.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvalError {
    /// Nothing to evaluate.
    #[error("empty input")]
    EmptyInput,
    /// Syntax error: unbalanced parentheses, dangling operator, empty operand.
    #[error("malformed expression at {position}: {message}")]
    MalformedExpression { message: String, position: usize },
    /// Division by zero, or a result that is infinite or not a number.
    #[error("result is not a finite number")]
    NonFiniteResult,
    /// The text contains a character outside the arithmetic whitelist.
    #[error("unexpected input character '{0}'")]
    UnexpectedChar(char),
}

impl EvalError {
    /// Whether the preview should fall back to `= 0` instead of `= —`.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::UnexpectedChar(_))
    }
}

/// Evaluate a canonical expression.
///
/// Empty input and characters outside `[0-9+\-*/(). ]` are rejected before
/// any parsing happens.
pub fn evaluate(canonical: &str) -> Result<f64, EvalError> {
    if canonical.trim().is_empty() {
        return Err(EvalError::EmptyInput);
    }
    if let Some(c) = first_disallowed(canonical) {
        return Err(EvalError::UnexpectedChar(c));
    }

    let value = parse_and_eval(canonical)?;
    if !value.is_finite() {
        return Err(EvalError::NonFiniteResult);
    }

    Ok(value)
}

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug)]
pub enum CalcResult {
    /// Successful calculation with a valid numeric result.
    Success {
        /// The original expression.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted for display.
        display_result: String,
    },
    /// The expression could not be evaluated.
    Error {
        /// The original expression.
        expression: String,
        /// Why evaluation failed.
        error: EvalError,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the numeric value of a successful result.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }

    /// Get the display string (result or error message).
    pub fn display(&self) -> String {
        match self {
            Self::Success { display_result, .. } => display_result.clone(),
            Self::Error { error, .. } => error.to_string(),
        }
    }
}

/// Translate keypad text and evaluate it in one step.
pub fn evaluate_expression(input: &str, formatter: &NumberFormatter) -> CalcResult {
    let expression = input.trim().to_string();

    match evaluate(&to_canonical(&expression)) {
        Ok(value) => CalcResult::Success {
            display_result: formatter.format(value),
            expression,
            value,
        },
        Err(error) => CalcResult::Error { expression, error },
    }
}
