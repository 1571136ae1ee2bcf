use super::{ctx::Context, error::EvalError, roller::Roller};
use crate::common::*;

impl<R: Roller> Context<'_, R> {
    /// Applies `op`; `fragment` is the text both operands came from.
    pub(super) fn combine(&mut self, l: Float, op: BinaryOperator, r: Float, fragment: &str) -> Float {
        use BinaryOperator::*;

        let value = match op {
            Add => l + r,
            Sub => l - r,
            Mul => l * r,
            Div if r == 0.0 => return self.fail(EvalError::DivisionByZero),
            Div => l / r,
            Pow if l == 0.0 && r == 0.0 => return self.fail(EvalError::ZeroToZero),
            Pow => l.powf(r),
            Rem if r == 0.0 => return self.fail(EvalError::ModuloByZero),
            Rem => l % r,
            Dice => {
                let total = self.roll(l, r);
                if self.failed() {
                    return 1.0;
                }
                total
            }
        };
        self.record(format!("{} {} {} = {}", l, op, r, value), fragment);
        self.checked(value, fragment)
    }

    /// `x` rounded to the nearest integer `n`, then `n!`; the empty product
    /// covers every `n <= 1`.
    ///
    /// The running product must always leave room for one more factor of
    /// `n`, so `169!` is the largest result.
    pub(super) fn factorial(&mut self, x: Float, fragment: &str) -> Float {
        let n = x.round();
        let mut product: Float = 1.0;
        let mut i: Float = 2.0;
        while i <= n {
            product *= i;
            if (product * n).is_infinite() {
                return self.fail(EvalError::FactorialOverflow(n));
            }
            i += 1.0;
        }
        self.record(format!("{}! = {}", n, product), fragment);
        product
    }
}
