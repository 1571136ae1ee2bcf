//! Named functions and constants.
//!
//! Lookups walk each table in declaration order and take the first match, so
//! the order of the tables below is the matching priority.

use crate::common::Float;
use std::f64::consts;
use std::fmt;

#[derive(Debug, Copy, Clone)]
pub struct UnaryFunction {
    pub name: &'static str,
    pub transform: fn(Float) -> Float,
    pub domain: fn(Float) -> bool,
}

#[derive(Copy, Clone)]
pub struct MultivariateFunction {
    pub name: &'static str,
    pub transform: fn(&[Float]) -> Float,
    pub domain: fn(&[Float]) -> bool,
}

impl fmt::Debug for MultivariateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultivariateFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Constant {
    pub name: &'static str,
    pub value: Float,
}

pub static MULTIVARIATE_FUNCTIONS: &[MultivariateFunction] = &[
    MultivariateFunction {
        name: "max",
        transform: max,
        domain: non_empty,
    },
    MultivariateFunction {
        name: "min",
        transform: min,
        domain: non_empty,
    },
    MultivariateFunction {
        name: "log",
        transform: log,
        domain: log_domain,
    },
];

pub static UNARY_FUNCTIONS: &[UnaryFunction] = &[
    UnaryFunction {
        name: "abs",
        transform: Float::abs,
        domain: anything,
    },
    UnaryFunction {
        name: "sqrt",
        transform: Float::sqrt,
        domain: non_negative,
    },
    UnaryFunction {
        name: "cbrt",
        transform: Float::cbrt,
        domain: anything,
    },
    UnaryFunction {
        name: "ln",
        transform: Float::ln,
        domain: positive,
    },
    UnaryFunction {
        name: "tan",
        transform: Float::tan,
        domain: tan_domain,
    },
    UnaryFunction {
        name: "sin",
        transform: Float::sin,
        domain: anything,
    },
    UnaryFunction {
        name: "cos",
        transform: Float::cos,
        domain: anything,
    },
    UnaryFunction {
        name: "arctan",
        transform: Float::atan,
        domain: anything,
    },
    UnaryFunction {
        name: "arcsin",
        transform: Float::asin,
        domain: unit_interval,
    },
    UnaryFunction {
        name: "arccos",
        transform: Float::acos,
        domain: unit_interval,
    },
    UnaryFunction {
        name: "ceil",
        transform: Float::ceil,
        domain: anything,
    },
    UnaryFunction {
        name: "floor",
        transform: Float::floor,
        domain: anything,
    },
    UnaryFunction {
        name: "exp",
        transform: Float::exp,
        domain: anything,
    },
];

/// Physical constants use SI units; `electron` is the elementary charge and
/// `k` is Coulomb's constant.
pub static CONSTANTS: &[Constant] = &[
    Constant {
        name: "pi",
        value: consts::PI,
    },
    Constant {
        name: "e",
        value: consts::E,
    },
    Constant {
        name: "phi",
        value: 1.618_033_988_749_895,
    },
    Constant {
        name: "c",
        value: 299_792_458.0,
    },
    Constant {
        name: "electron",
        value: 1.602_176_634e-19,
    },
    Constant {
        name: "epsilon",
        value: 8.854_187_812_8e-12,
    },
    Constant {
        name: "G",
        value: 6.674_30e-11,
    },
    Constant {
        name: "mu0",
        value: 1.256_637_062_12e-6,
    },
    Constant {
        name: "k",
        value: 8.987_551_792_3e9,
    },
];

fn starts_with_name(s: &str, name: &str) -> bool {
    s.get(..name.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(name))
}

/// The first multivariate function whose name starts `s`, ignoring case.
pub fn find_multivariate(s: &str) -> Option<&'static MultivariateFunction> {
    MULTIVARIATE_FUNCTIONS
        .iter()
        .find(|f| starts_with_name(s, f.name))
}

/// The first unary function whose name starts `s`, ignoring case.
pub fn find_unary(s: &str) -> Option<&'static UnaryFunction> {
    UNARY_FUNCTIONS.iter().find(|f| starts_with_name(s, f.name))
}

/// The first constant whose name ends `s`. Constant names are case-sensitive.
pub fn find_constant(s: &str) -> Option<&'static Constant> {
    CONSTANTS.iter().find(|c| s.ends_with(c.name))
}

fn anything(_: Float) -> bool {
    true
}

fn non_negative(x: Float) -> bool {
    x >= 0.0
}

fn positive(x: Float) -> bool {
    x > 0.0
}

fn unit_interval(x: Float) -> bool {
    (-1.0..=1.0).contains(&x)
}

fn tan_domain(x: Float) -> bool {
    x.cos().abs() > Float::EPSILON
}

fn non_empty(xs: &[Float]) -> bool {
    !xs.is_empty()
}

fn max(xs: &[Float]) -> Float {
    xs.iter().copied().fold(Float::NEG_INFINITY, Float::max)
}

fn min(xs: &[Float]) -> Float {
    xs.iter().copied().fold(Float::INFINITY, Float::min)
}

/// `log[base; value]`.
fn log_domain(xs: &[Float]) -> bool {
    matches!(xs, &[base, value] if base > 0.0 && base != 1.0 && value > 0.0)
}

fn log(xs: &[Float]) -> Float {
    xs[1].ln() / xs[0].ln()
}
