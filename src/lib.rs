//! Evaluates free-form math text such as `2+3*sin(pi/2)` or `3d6+2`.
//!
//! The input is never tokenized into an AST. Each precedence tier finds the
//! operator it splits on directly in the text and recurses into the pieces:
//!
//! 1. parenthesis groups, folded innermost first into values (or, when they
//!    hold commas, into `[a;b]` argument lists),
//! 2. `+ -`, 3. `* /`, 4. `^`, 5. `d %`, 6. trailing `!`,
//! 7. a numeric multiplier followed by a named function,
//! 8. named constants matched as a suffix (`2pi`),
//! 9. bare literals, where a leading `_` is a minus sign.
//!
//! All binary tiers split at their rightmost operator, so they are all
//! left-associative: `2^3^2` is `64`.
//!
//! ```
//! let eval = rust_calc::evaluate("2+3*4");
//! assert_eq!(eval.value(), Some(14.0));
//!
//! let eval = rust_calc::evaluate("sqrt(-1)");
//! assert!(eval.is_error());
//! assert_eq!(eval.error_message(), "value not included in the domain of function sqrt");
//! ```

pub mod common;
mod config;
mod eval;
pub mod registry;

pub use config::EvalConfig;
pub use eval::{DefaultRoller, EvalError, Evaluation, Evaluator, Roller, TraceStep};

/// Evaluates `input` with the default limits and the thread-local RNG.
pub fn evaluate(input: &str) -> Evaluation {
    let mut evaluator: Evaluator = Evaluator::default();
    evaluator.evaluate(input)
}
