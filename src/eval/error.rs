use crate::common::Float;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,
    #[error("unbalanced bracket")]
    UnbalancedBracket,
    #[error("empty parenthesis")]
    EmptyGroup,
    #[error("malformed argument list: {0}")]
    MalformedArguments(String),
    #[error("expression is too long ({length} characters, at most {max} allowed)")]
    TooLong { length: usize, max: usize },
    #[error("expression is too complex (more than {max} recursion levels)")]
    TooDeep { max: usize },
    #[error("could not parse {0:?} as a number")]
    InvalidNumber(String),
    #[error("value not included in the domain of function {function}")]
    Domain { function: &'static str },
    #[error("division by zero")]
    DivisionByZero,
    #[error("0^0 is undefined")]
    ZeroToZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("cannot roll dice with {0} sides")]
    InvalidSides(Float),
    #[error("cannot roll {count} dice at once (at most {max})")]
    TooManyDice { count: Float, max: u64 },
    #[error("factorial of {0} overflows")]
    FactorialOverflow(Float),
    #[error("result of {0} is out of range")]
    Overflow(String),
    #[error("result of {0} is not a real number")]
    NotANumber(String),
}

impl EvalError {
    pub fn malformed(msg: impl ToString) -> Self {
        Self::MalformedArguments(msg.to_string())
    }
}
