mod arith;
mod ctx;
mod dice;
mod error;
mod literal;
mod roller;
mod scan;
mod simplify;

use crate::common::{Float, NonEmpty};
use crate::config::EvalConfig;
use std::fmt;

pub use error::EvalError;
pub use roller::Roller;

pub type DefaultRoller = rand::rngs::ThreadRng;

/// One reasoning step: what was computed, and from which text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub message: String,
    pub fragment: String,
}

impl TraceStep {
    pub fn new(message: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fragment: fragment.into(),
        }
    }
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}    [{}]", self.message, self.fragment)
    }
}

/// Everything one evaluation produced.
///
/// The trace is diagnostic only. After an error it may contain steps that
/// ran before the failure was noticed.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub result: Result<Float, NonEmpty<EvalError>>,
    pub trace: Vec<TraceStep>,
    pub roll_trace: String,
}

impl Evaluation {
    pub fn value(&self) -> Option<Float> {
        self.result.as_ref().ok().copied()
    }

    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }

    pub fn errors(&self) -> &[EvalError] {
        match &self.result {
            Ok(_) => &[],
            Err(errors) => errors.as_slice(),
        }
    }

    /// Every error message, one per line; empty on success.
    pub fn error_message(&self) -> String {
        self.errors()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(value) => fmt::Display::fmt(value, f),
            Err(_) => f.write_str(&self.error_message()),
        }
    }
}

/// Evaluates expressions against one configuration and one random source.
///
/// The roller lives as long as the evaluator, so a seeded generator gives a
/// reproducible sequence of rolls across calls.
pub struct Evaluator<R = DefaultRoller> {
    config: EvalConfig,
    roller: R,
}

impl<R: Roller> Evaluator<R> {
    pub fn new(config: EvalConfig, roller: R) -> Self {
        Self { config, roller }
    }

    pub fn with_roller(roller: R) -> Self {
        Self::new(EvalConfig::default(), roller)
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn evaluate(&mut self, input: &str) -> Evaluation {
        ctx::Context::new(&self.config, &mut self.roller).run(input)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvalConfig::default(), rand::thread_rng())
    }
}
