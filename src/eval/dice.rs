use super::{ctx::Context, error::EvalError, roller::Roller};
use crate::common::*;
use std::fmt::Write;

impl<R: Roller> Context<'_, R> {
    /// Rolls `count` dice of `sides` faces and sums them. Both are rounded
    /// first; a negative count rolls `|count|` dice and negates the total.
    ///
    /// Each roll adds one line to the roll trace. Individual faces are
    /// listed until the trace budget of the evaluation runs out, after which
    /// they are elided as `...`.
    pub(super) fn roll(&mut self, count: Float, sides: Float) -> Float {
        let count = count.round();
        let max = self.config.max_dice;
        if count.abs() > max as Float {
            return self.fail(EvalError::TooManyDice { count, max });
        }

        let sides = sides.round();
        let faces = if sides <= UInt::MAX as Float {
            NonZeroUInt::new(sides as UInt)
        } else {
            None
        };
        let faces = match faces {
            Some(faces) => faces,
            None => return self.fail(EvalError::InvalidSides(sides)),
        };

        let num = count.abs() as usize;
        let sign = if count < 0.0 { "-" } else { "" };
        let mut line = format!("{}{}d{}: [", sign, num, faces);
        let mut total: u64 = 0;
        let mut elided = false;

        for (i, value) in self.roller.roll_iter(num, faces).enumerate() {
            total += u64::from(value);
            if elided {
                continue;
            }
            if i > 0 {
                line.push_str(", ");
            }
            if self.roll_count >= self.config.max_trace_dice
                || self.roll_trace.len() + line.len() >= self.config.max_trace_chars
            {
                line.push_str("...");
                elided = true;
            } else {
                let _ = write!(line, "{}", value);
                self.roll_count += 1;
            }
        }

        let total = total as Float;
        let value = if count < 0.0 { -total } else { total };
        if !self.roll_trace.is_empty() {
            self.roll_trace.push('\n');
        }
        let _ = write!(self.roll_trace, "{}] = {}", line, value);
        value
    }
}
