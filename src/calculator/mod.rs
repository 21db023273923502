//! Calculator module for editing and evaluating keypad expressions.
//!
//! This module provides functionality to:
//! - Edit the expression buffer from keypad and keyboard input
//! - Translate the buffer into canonical arithmetic text
//! - Evaluate it with a dedicated arithmetic parser
//! - Format results for display

mod buffer;
mod command;
mod engine;
mod evaluation;
mod format;
mod parser;
mod sanitize;

pub use buffer::InputBuffer;
pub use command::Command;
pub use engine::{EngineState, ExpressionEngine};
pub use evaluation::{CalcResult, EvalError, evaluate, evaluate_expression};
pub use format::{NumberFormatter, NumberLocale, format_number, plain};
pub use sanitize::{DIVIDE_SIGN, MINUS_SIGN, MULTIPLY_SIGN, is_canonical, to_canonical};
