use super::{ctx::Context, error::EvalError, literal, roller::Roller, scan};
use crate::common::*;

impl<R: Roller> Context<'_, R> {
    /// Rewrites `s` with the group `s[open..=close]` folded away.
    ///
    /// A group with a top-level comma is an argument list and becomes
    /// `[a;b;...]`, left for the function it belongs to. Any other group is
    /// evaluated and replaced by its value, with `*` inserted against an
    /// adjacent digit or decimal point so `3(4+5)` reads as `3*9` and
    /// `(1+2).5` as `3*.5`.
    pub(super) fn simplify(&mut self, s: &str, open: usize, close: usize) -> String {
        let (before, inner, after) = (&s[..open], &s[open + 1..close], &s[close + 1..]);
        let group = &s[open..=close];
        if inner.is_empty() {
            self.fail(EvalError::EmptyGroup);
            return String::new();
        }

        if scan::has_top_level(inner, ',') {
            let args = scan::replace_top_level(inner, ',', ';');
            self.record(format!("arguments [{}]", args), group);
            return format!("{}[{}]{}", before, args, after);
        }

        let value = self.eval(Tier::Expression, inner);
        if self.failed() {
            return String::new();
        }
        self.record(format!("{} = {}", group, value), group);

        let value = literal::format(value);
        let mut ret = String::with_capacity(s.len() + value.len() + 2);
        ret.push_str(before);
        if before.ends_with(is_numeric) {
            ret.push('*');
        }
        ret.push_str(&value);
        if after.starts_with(is_numeric) {
            ret.push('*');
        }
        ret.push_str(after);
        ret
    }
}

fn is_numeric(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EvalConfig;
    use crate::eval::roller::StepRoller;

    fn simplify(s: &str) -> (String, bool) {
        let config = EvalConfig::default();
        let mut roller = StepRoller::ones();
        let mut ctx = Context::new(&config, &mut roller);
        let (open, close) = scan::innermost_group(s).unwrap();
        let ret = ctx.simplify(s, open, close);
        (ret, ctx.failed())
    }

    #[test]
    fn test_simplify_value() {
        assert_eq!(simplify("2+(3*4)"), ("2+12".into(), false));
        assert_eq!(simplify("sin(1-1)"), ("sin0".into(), false));
        assert_eq!(simplify("(1+1)^2"), ("2^2".into(), false));
    }

    #[test]
    fn test_simplify_negative_value() {
        assert_eq!(simplify("2*(1-3)"), ("2*_2".into(), false));
        assert_eq!(simplify("(0-0.5)"), ("_0.5".into(), false));
    }

    #[test]
    fn test_simplify_implicit_multiplication() {
        assert_eq!(simplify("3(4+5)"), ("3*9".into(), false));
        assert_eq!(simplify("(4+5)3"), ("9*3".into(), false));
        assert_eq!(simplify("2(1)2"), ("2*1*2".into(), false));
        assert_eq!(simplify("pi(2)"), ("pi2".into(), false));
        assert_eq!(simplify("(1+2).5"), ("3*.5".into(), false));
        assert_eq!(simplify("2.(1+2)"), ("2.*3".into(), false));
    }

    #[test]
    fn test_simplify_argument_list() {
        assert_eq!(simplify("max(1,2+3,4)"), ("max[1;2+3;4]".into(), false));
        assert_eq!(simplify("log(2,min[1,8])"), ("log[2;min[1,8]]".into(), false));
    }

    #[test]
    fn test_simplify_empty_group() {
        assert_eq!(simplify("sqrt()"), (String::new(), true));
    }
}
