use super::{error::EvalError, literal, roller::Roller, scan, Evaluation, TraceStep};
use crate::common::*;
use crate::config::EvalConfig;
use crate::registry;

/// Mutable state of one evaluation, threaded through every recursive step.
///
/// Errors only ever accumulate. Once one is recorded every later step
/// returns `1.0` without computing anything, and the collected errors become
/// the result.
pub(crate) struct Context<'a, R> {
    pub(super) config: &'a EvalConfig,
    pub(super) roller: &'a mut R,
    errors: Vec<EvalError>,
    trace: Vec<TraceStep>,
    pub(super) roll_trace: String,
    pub(super) roll_count: usize,
    depth: usize,
}

impl<'a, R: Roller> Context<'a, R> {
    pub fn new(config: &'a EvalConfig, roller: &'a mut R) -> Self {
        Self {
            config,
            roller,
            errors: Vec::new(),
            trace: Vec::new(),
            roll_trace: String::new(),
            roll_count: 0,
            depth: 0,
        }
    }

    pub fn failed(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Records `err` and yields the value every failed step returns.
    pub(super) fn fail(&mut self, err: EvalError) -> Float {
        log::debug!("evaluation error: {}", err);
        self.errors.push(err);
        1.0
    }

    pub(super) fn record(&mut self, message: String, fragment: &str) {
        self.trace.push(TraceStep::new(message, fragment));
    }

    /// Fails on values no later step can use.
    pub(super) fn checked(&mut self, value: Float, fragment: &str) -> Float {
        if value.is_nan() {
            self.fail(EvalError::NotANumber(fragment.to_owned()))
        } else if value.is_infinite() {
            self.fail(EvalError::Overflow(fragment.to_owned()))
        } else {
            value
        }
    }

    pub fn run(mut self, input: &str) -> Evaluation {
        let expr: String = input.split_whitespace().collect();
        log::debug!("evaluating {:?}", expr);

        let length = expr.chars().count();
        let value = if expr.is_empty() {
            self.fail(EvalError::Empty)
        } else if length > self.config.max_length {
            self.fail(EvalError::TooLong {
                length,
                max: self.config.max_length,
            })
        } else {
            self.eval(Tier::Expression, &expr)
        };
        self.finish(value)
    }

    fn finish(self, value: Float) -> Evaluation {
        let result = match NonEmpty::try_from(self.errors) {
            Ok(errors) => Err(errors),
            Err(_) => Ok(value),
        };
        Evaluation {
            result,
            trace: self.trace,
            roll_trace: self.roll_trace,
        }
    }

    /// Evaluates `s` starting at `tier`.
    pub(super) fn eval(&mut self, tier: Tier, s: &str) -> Float {
        if self.failed() {
            return 1.0;
        }
        if s.is_empty() {
            return tier.neutral();
        }
        if self.depth >= self.config.max_depth {
            return self.fail(EvalError::TooDeep {
                max: self.config.max_depth,
            });
        }
        log::trace!("{:?} <- {:?}", tier, s);

        self.depth += 1;
        let value = match tier {
            Tier::Expression => self.expression(s),
            Tier::Additive | Tier::Multiplicative | Tier::Power | Tier::DiceRem => {
                self.binary(tier, s)
            }
            Tier::Factorial => self.factorial_suffix(s),
            Tier::Application => self.application(s),
            Tier::Constant => self.constant(s),
            Tier::Literal => self.literal(s),
        };
        self.depth -= 1;

        if self.failed() {
            1.0
        } else {
            value
        }
    }

    /// Folds every parenthesis group into a value, innermost first, then
    /// evaluates the flat remainder.
    fn expression(&mut self, s: &str) -> Float {
        if let Err(err) = scan::check_balance(s) {
            return self.fail(err);
        }
        let mut current = s.to_owned();
        while let Some((open, close)) = scan::innermost_group(&current) {
            current = self.simplify(&current, open, close);
            if self.failed() {
                return 1.0;
            }
        }
        self.eval(Tier::Additive, &current)
    }

    /// Splits at the rightmost operator of `tier`. The left side keeps the
    /// same tier, which makes every binary tier left-associative, `^`
    /// included.
    fn binary(&mut self, tier: Tier, s: &str) -> Float {
        let (i, op) = match scan::rightmost_operator(s, tier) {
            Some(found) => found,
            None => return self.eval(tier.next(), s),
        };
        let (left, right) = (&s[..i], &s[i + 1..]);

        let l = if left.is_empty() {
            tier.neutral()
        } else {
            self.eval(tier, left)
        };
        let r = if right.is_empty() {
            tier.neutral()
        } else {
            self.eval(tier.next(), right)
        };
        if self.failed() {
            return 1.0;
        }
        self.combine(l, op, r, s)
    }

    fn factorial_suffix(&mut self, s: &str) -> Float {
        match s.strip_suffix('!') {
            Some(operand) => {
                let x = self.eval(Tier::Factorial, operand);
                if self.failed() {
                    return 1.0;
                }
                self.factorial(x, s)
            }
            None => self.eval(Tier::Application, s),
        }
    }

    /// `[2;5]`-style argument lists, then an optional numeric multiplier
    /// followed by a multivariate or unary function.
    fn application(&mut self, s: &str) -> Float {
        if let Some(inner) = scan::enclosed(s) {
            if inner.is_empty() {
                return self.fail(EvalError::EmptyGroup);
            }
            if !scan::has_top_level(inner, ';') {
                return self.eval(Tier::Expression, inner);
            }
        }

        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '_'))
            .unwrap_or(s.len());
        let (prefix, rest) = s.split_at(split);

        if let Some(f) = registry::find_multivariate(rest) {
            let multiplier = self.eval(Tier::Literal, prefix);
            let args = self.arguments(&rest[f.name.len()..]);
            if self.failed() {
                return 1.0;
            }
            if !(f.domain)(&args) {
                return self.fail(EvalError::Domain { function: f.name });
            }
            let value = (f.transform)(&args);
            let shown = args
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(";");
            self.record(format!("{}[{}] = {}", f.name, shown, value), rest);
            return self.checked(multiplier * value, s);
        }

        if let Some(f) = registry::find_unary(rest) {
            let multiplier = self.eval(Tier::Literal, prefix);
            let x = self.eval(Tier::Application, &rest[f.name.len()..]);
            if self.failed() {
                return 1.0;
            }
            if !(f.domain)(x) {
                return self.fail(EvalError::Domain { function: f.name });
            }
            let value = (f.transform)(x);
            self.record(format!("{}({}) = {}", f.name, x, value), rest);
            return self.checked(multiplier * value, s);
        }

        self.eval(Tier::Constant, s)
    }

    /// A bracketed `;` list, or a single bare argument.
    fn arguments(&mut self, args: &str) -> Vec<Float> {
        match scan::enclosed(args) {
            Some(inner) => scan::split_top_level(inner, ';')
                .into_iter()
                .map(|arg| {
                    if arg.is_empty() {
                        self.fail(EvalError::malformed(format!("empty argument in {}", args)))
                    } else {
                        self.eval(Tier::Expression, arg)
                    }
                })
                .collect(),
            None => vec![self.eval(Tier::Application, args)],
        }
    }

    /// Constants match as a suffix; whatever precedes the name multiplies it.
    fn constant(&mut self, s: &str) -> Float {
        let c = match registry::find_constant(s) {
            Some(c) => c,
            None => return self.eval(Tier::Literal, s),
        };
        let multiplier = self.eval(Tier::Application, &s[..s.len() - c.name.len()]);
        if self.failed() {
            return 1.0;
        }
        self.record(format!("{} = {}", c.name, c.value), s);
        self.checked(multiplier * c.value, s)
    }

    fn literal(&mut self, s: &str) -> Float {
        if s.contains(&['[', ']', ';'][..]) {
            return self.fail(EvalError::malformed(format!(
                "no function to apply to {}",
                s
            )));
        }
        match literal::parse(s) {
            Some(x) if x.is_finite() => x,
            Some(_) => self.fail(EvalError::Overflow(s.to_owned())),
            None => self.fail(EvalError::InvalidNumber(s.to_owned())),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::eval::roller::StepRoller;
    use std::f64::consts;

    fn mock_roller() -> StepRoller {
        StepRoller::new(NonZeroUInt::new(10).unwrap(), 1)
    }

    pub(crate) fn run_with<R: Roller>(s: &str, config: &EvalConfig, mut roller: R) -> Evaluation {
        Context::new(config, &mut roller).run(s)
    }

    pub(crate) fn run(s: &str) -> Evaluation {
        run_with(s, &EvalConfig::default(), mock_roller())
    }

    pub(crate) fn check(s: &str, expected: impl Into<Float>) {
        let expected = expected.into();
        match run(s).result {
            Ok(actual) => assert!(
                (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
                "{:?}: expected {}, got {}",
                s,
                expected,
                actual
            ),
            Err(errors) => panic!("{:?}: unexpected errors {:?}", s, errors),
        }
    }

    pub(crate) fn check_err(s: &str, expected: EvalError) {
        let actual = run(s);
        assert!(actual.is_error(), "{:?}: expected an error", s);
        assert_eq!(actual.errors()[0], expected, "{:?}", s);
    }

    #[test]
    fn test_eval_number() {
        check("2", 2);
        check("2.5", 2.5);
        check("_3", -3);
        check(" 1 2 ", 12);
        check("1.5E+3", 1500);
        check("2E-3*1000", 2);
    }

    #[test]
    fn test_eval_precedence() {
        check("2+3*4", 14);
        check("(2+3)*4", 20);
        check("2+3*sin(pi/2)", 5);
        check("10-4-3", 3);
        check("100/10/5", 2);
        check("2*3%4", 6);
        check("2^3*2", 16);
    }

    #[test]
    fn test_eval_power_is_left_associative() {
        check("2^3^2", 64);
        check("2^_1", 0.5);
    }

    #[test]
    fn test_eval_negation() {
        check("-3", -3);
        check("2*(0-3)", -6);
        check("2-(0-3)", 5);
        check("(0-2)^2", 4);
        // `-` is always binary, so this reads as (2*) - 3
        check("2*-3", -1);
        // only an uppercase `E` keeps its exponent sign
        check("1e5", 100_000);
        check("1E-3", 0.001);
        check("1e-3", consts::E - 3.0);
    }

    #[test]
    fn test_eval_empty_operands() {
        check("3+", 3);
        check("*4", 4);
        check("2^", 2);
    }

    #[test]
    fn test_eval_implicit_multiplication() {
        check("3(4+5)", 27);
        check("(1+1)2", 4);
        check("(2)(3)", 6);
        check("2(3)4", 24);
        check("(1+2).5", 1.5);
        check("2.(1+2)", 6);
    }

    #[test]
    fn test_eval_factorial() {
        check("5!", 120);
        check("3!!", 720);
        check("0!", 1);
        check("(2+1)!", 6);
        check("2.6!", 6);
        assert!(run("169!").value().is_some());
        check_err("170!", EvalError::FactorialOverflow(170.0));
    }

    #[test]
    fn test_eval_unary_functions() {
        check("sqrt(16)", 4);
        check("2sqrt(16)", 8);
        check("SQRT(16)", 4);
        check("sqrtsqrt16", 2);
        check("sqrt[4]", 2);
        check("abs(0-5)", 5);
        check("ln(e)", 1);
        check("arccos(1)", 0);
        check("arctan(1)*4", consts::PI);
        check("floor(2.7)+ceil(2.2)", 5);
        check("cbrt(27)", 3);
        check("exp(0)", 1);
        check("_2abs(3)", -6);
    }

    #[test]
    fn test_eval_domain_errors() {
        check_err("sqrt(-1)", EvalError::Domain { function: "sqrt" });
        check_err("arcsin(2)", EvalError::Domain { function: "arcsin" });
        check_err("ln(0)", EvalError::Domain { function: "ln" });
        check_err("tan(pi/2)", EvalError::Domain { function: "tan" });
        check_err("log(8)", EvalError::Domain { function: "log" });
        check_err("log(2,8,3)", EvalError::Domain { function: "log" });
        check_err("log(1,8)", EvalError::Domain { function: "log" });
    }

    #[test]
    fn test_eval_multivariate_functions() {
        check("max[3;5;2]", 5);
        check("max(3,5,2)", 5);
        check("min(4,1+1,3)", 2);
        check("log[2;8]", 3);
        check("log(2,8)", 3);
        check("max(1,min(2,3))", 2);
        check("max7", 7);
        check("2max(1,3)", 6);
        check("max(1,2)+1", 3);
        check("MIN(5,(1+2)*2)", 5);
    }

    #[test]
    fn test_eval_malformed_arguments() {
        assert!(matches!(
            run("max(1,,2)").errors()[0],
            EvalError::MalformedArguments(_)
        ));
        assert!(matches!(
            run("(1,2)").errors()[0],
            EvalError::MalformedArguments(_)
        ));
        assert!(matches!(
            run("max[1;2]3").errors()[0],
            EvalError::MalformedArguments(_)
        ));
    }

    #[test]
    fn test_eval_constants() {
        check("pi", consts::PI);
        check("2pi", 2.0 * consts::PI);
        check("pipi", consts::PI * consts::PI);
        check("e", consts::E);
        check("3phi", 3.0 * 1.618_033_988_749_895);
        check("2sqrt4pi", 2.0 * (4.0 * consts::PI).sqrt());
        check("(1+1)pi", 2.0 * consts::PI);
        check_err("PI", EvalError::InvalidNumber("PI".into()));
    }

    #[test]
    fn test_eval_arithmetic_errors() {
        check_err("1/0", EvalError::DivisionByZero);
        check_err("0^0", EvalError::ZeroToZero);
        check_err("5%0", EvalError::ModuloByZero);
        check_err("(0-8)^0.5", EvalError::NotANumber("_8^0.5".into()));
        check_err("10^400", EvalError::Overflow("10^400".into()));
        check_err("0^(0-1)", EvalError::Overflow("0^_1".into()));
        check_err("1e400", EvalError::Overflow("1e400".into()));
        check_err("(1e300)*(1e300)", EvalError::Overflow("1E300*1E300".into()));
    }

    #[test]
    fn test_eval_syntax_errors() {
        check_err("", EvalError::Empty);
        check_err("   ", EvalError::Empty);
        check_err("(1+2", EvalError::UnbalancedParenthesis);
        check_err(")(", EvalError::UnbalancedParenthesis);
        check_err("max[1;2", EvalError::UnbalancedBracket);
        check_err("sqrt()", EvalError::EmptyGroup);
        check_err("2*[]", EvalError::EmptyGroup);
        check_err("abc", EvalError::InvalidNumber("abc".into()));
        check_err("2+x", EvalError::InvalidNumber("x".into()));
        check_err("inf", EvalError::InvalidNumber("inf".into()));
    }

    #[test]
    fn test_eval_guards() {
        let long = "1+".repeat(600);
        check_err(&long, EvalError::TooLong { length: 1200, max: 1000 });

        let deep = format!("{}1", "1+".repeat(300));
        check_err(&deep, EvalError::TooDeep { max: 256 });
        assert_eq!(
            run(&deep).error_message(),
            "expression is too complex (more than 256 recursion levels)"
        );

        let config = EvalConfig::default().with_limits(4, 10);
        assert_eq!(
            run_with("1+1+1+1+1", &config, mock_roller()).errors(),
            &[EvalError::TooDeep { max: 4 }]
        );
        check("1+1+1+1+1", 5);
    }

    #[test]
    fn test_errors_short_circuit() {
        let eval = run("1/0+sqrt(-1)");
        assert_eq!(eval.errors(), &[EvalError::DivisionByZero]);
        assert_eq!(eval.value(), None);
    }

    #[test]
    fn test_errors_accumulate() {
        let eval = run("max(,)");
        assert_eq!(eval.errors().len(), 2);
        assert_eq!(eval.error_message().lines().count(), 2);
    }

    #[test]
    fn test_trace() {
        let eval = run("2+3*4");
        let steps: Vec<_> = eval
            .trace
            .iter()
            .map(|step| (step.message.as_str(), step.fragment.as_str()))
            .collect();
        assert_eq!(steps, vec![("3 * 4 = 12", "3*4"), ("2 + 12 = 14", "2+3*4")]);

        let eval = run("sqrt(16)");
        assert_eq!(eval.trace[0].message, "(16) = 16");
        assert_eq!(eval.trace[1].message, "sqrt(16) = 4");
    }

    #[test]
    fn test_eval_is_repeatable() {
        for s in ["2+3*sin(pi/2)", "log(3,7)/7", "1/0", "max(1,2,3)^0.3"] {
            let (a, b) = (run(s), run(s));
            assert_eq!(a.value().map(f64::to_bits), b.value().map(f64::to_bits));
            assert_eq!(a.errors(), b.errors());
        }
    }
}
