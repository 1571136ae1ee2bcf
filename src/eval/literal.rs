//! Bare numeric literals.
//!
//! A literal is `digits[.digits][e[+-]digits]`, optionally led by `_`, the
//! in-band sign of a negative value: `-` always means subtraction.
//!
//! Lexing alone accepts either case of the exponent marker, but the
//! additive tier only skips a sign that follows an uppercase `E`. So
//! `1e5` is `100000` while `1e-3` splits into `1e - 3`, Euler's number
//! minus three. Values this module renders always use `E`.

use crate::common::Float;
use logos::{Lexer, Logos};

#[derive(Logos, Debug, Copy, Clone, PartialEq)]
enum Token {
    #[regex(r"_?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?", number)]
    Number(Float),

    #[error]
    Error,
}

fn number(lex: &mut Lexer<Token>) -> Option<Float> {
    let slice = lex.slice();
    match slice.strip_prefix('_') {
        Some(digits) => digits.parse::<Float>().ok().map(|x| -x),
        None => slice.parse().ok(),
    }
}

/// Parses `s` as a single literal, rejecting anything left over.
pub(crate) fn parse(s: &str) -> Option<Float> {
    let mut lex = Token::lexer(s);
    match (lex.next(), lex.next()) {
        (Some(Token::Number(x)), None) => Some(x),
        _ => None,
    }
}

/// Renders `x` so that [`parse`] reads back the same value. Very large and
/// very small magnitudes use scientific notation.
pub(crate) fn format(x: Float) -> String {
    if x.is_sign_negative() {
        format!("_{}", format(-x))
    } else if x != 0.0 && !(SCIENTIFIC_BELOW..SCIENTIFIC_FROM).contains(&x) {
        format!("{:E}", x)
    } else {
        x.to_string()
    }
}

const SCIENTIFIC_FROM: Float = 1e16;
const SCIENTIFIC_BELOW: Float = 1e-6;
