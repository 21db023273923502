//! Keypad calculator engine.
//!
//! [`calculator::ExpressionEngine`] owns the expression being typed, shows a
//! live preview of its value, and commits it on demand. Input arrives as
//! [`calculator::Command`]s and every operation yields a [`display::DisplayState`].

pub mod calculator;
pub mod config;
pub mod display;
