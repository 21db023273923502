//! Recursive-descent parser and evaluator for canonical arithmetic.
//!
//! Grammar:
//!
//! ```text
//! expr    → term (('+' | '-') term)*
//! term    → unary (('*' | '/') unary)*
//! unary   → ('-' | '+')* primary
//! primary → number | '(' expr ')'
//! number  → digits ('.' digits?)? | '.' digits
//! ```
//!
//! Values are computed in `f64` while parsing; there is no intermediate tree.

use super::evaluation::EvalError;
use std::fmt;

/// Deepest parenthesis nesting accepted before the input is rejected.
const MAX_NESTING: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    ParenOpen,
    ParenClose,
    Eoi,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "number {n}"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::ParenOpen => write!(f, "'('"),
            Token::ParenClose => write!(f, "')'"),
            Token::Eoi => write!(f, "end of input"),
        }
    }
}

/// Split canonical text into tokens paired with their byte offsets.
fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, EvalError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let token = match bytes[i] {
            b' ' => {
                i += 1;
                continue;
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'(' => Token::ParenOpen,
            b')' => Token::ParenClose,
            b'0'..=b'9' | b'.' => {
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                tokens.push((Token::Num(parse_number(&input[start..i], start)?), start));
                continue;
            }
            _ => {
                // Only reachable with non-ASCII input; report the whole char.
                let c = input[start..].chars().next().unwrap_or('\u{FFFD}');
                return Err(EvalError::UnexpectedChar(c));
            }
        };
        tokens.push((token, start));
        i += 1;
    }

    tokens.push((Token::Eoi, input.len()));
    Ok(tokens)
}

/// Parse one run of digits and dots as a decimal literal.
fn parse_number(text: &str, position: usize) -> Result<f64, EvalError> {
    let malformed = |message: String| EvalError::MalformedExpression { message, position };

    let mut parts = text.split('.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next();
    if parts.next().is_some() {
        return Err(malformed(format!("invalid number '{text}'")));
    }
    if int_part.is_empty() && frac_part.is_none_or(str::is_empty) {
        return Err(malformed(format!("invalid number '{text}'")));
    }

    text.parse::<f64>()
        .map_err(|_| malformed(format!("invalid number '{text}'")))
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Token {
        self.tokens[self.pos].0
    }

    fn offset(&self) -> usize {
        self.tokens[self.pos].1
    }

    fn advance(&mut self) -> Token {
        let token = self.peek();
        if token != Token::Eoi {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self) -> EvalError {
        let message = match self.peek() {
            Token::Eoi => "unexpected end of input".to_string(),
            Token::ParenClose => "unmatched ')'".to_string(),
            token => format!("unexpected {token}"),
        };
        EvalError::MalformedExpression {
            message,
            position: self.offset(),
        }
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Token::Star => {
                    self.advance();
                    value *= self.unary()?;
                }
                Token::Slash => {
                    self.advance();
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(EvalError::NonFiniteResult);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        let mut negate = false;
        loop {
            match self.peek() {
                Token::Minus => negate = !negate,
                Token::Plus => {}
                _ => break,
            }
            self.advance();
        }

        let value = self.primary()?;
        Ok(if negate { -value } else { value })
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Token::Num(n) => {
                self.advance();
                Ok(n)
            }
            Token::ParenOpen => {
                let open_at = self.offset();
                if self.depth >= MAX_NESTING {
                    return Err(EvalError::MalformedExpression {
                        message: "expression nested too deeply".to_string(),
                        position: open_at,
                    });
                }
                self.advance();
                self.depth += 1;
                let value = self.expr()?;
                self.depth -= 1;
                match self.peek() {
                    Token::ParenClose => {
                        self.advance();
                        Ok(value)
                    }
                    Token::Eoi => Err(EvalError::MalformedExpression {
                        message: "unclosed '('".to_string(),
                        position: open_at,
                    }),
                    _ => Err(self.unexpected()),
                }
            }
            _ => Err(self.unexpected()),
        }
    }
}

/// Parse and evaluate a canonical expression.
///
/// The caller is expected to have rejected empty input already; an empty
/// string here is reported as malformed.
pub fn parse_and_eval(input: &str) -> Result<f64, EvalError> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
        depth: 0,
    };

    let value = parser.expr()?;
    if parser.peek() != Token::Eoi {
        return Err(parser.unexpected());
    }

    Ok(value)
}
