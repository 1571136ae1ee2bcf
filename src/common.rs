use std::fmt::{self, Write};
use std::num::NonZeroU32;

pub type UInt = u32;
pub type NonZeroUInt = NonZeroU32;

pub type Float = f64;

pub type NonEmpty<T> = vec1::Vec1<T>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Dice,
    Rem,
}

impl BinaryOperator {
    pub const fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '+' => Self::Add,
            '-' => Self::Sub,
            '*' => Self::Mul,
            '/' => Self::Div,
            '^' => Self::Pow,
            'd' => Self::Dice,
            '%' => Self::Rem,
            _ => return None,
        })
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
            Self::Dice => 'd',
            Self::Rem => '%',
        };
        f.write_char(c)
    }
}

/// Precedence tiers, from the loosest binding to the tightest.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Tier {
    /// Parenthesis and bracket groups.
    Expression,
    Additive,
    Multiplicative,
    Power,
    /// Dice rolls and modulo.
    DiceRem,
    Factorial,
    /// Numeric multiplier followed by a named function.
    Application,
    Constant,
    Literal,
}

impl Tier {
    /// Value substituted for an empty operand at this tier.
    pub const fn neutral(self) -> Float {
        match self {
            Self::Expression | Self::Additive => 0.0,
            _ => 1.0,
        }
    }

    /// Operators split on by the binary tiers; empty for every other tier.
    pub const fn operators(self) -> &'static [char] {
        match self {
            Self::Additive => &['+', '-'],
            Self::Multiplicative => &['*', '/'],
            Self::Power => &['^'],
            Self::DiceRem => &['d', '%'],
            _ => &[],
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Expression => Self::Additive,
            Self::Additive => Self::Multiplicative,
            Self::Multiplicative => Self::Power,
            Self::Power => Self::DiceRem,
            Self::DiceRem => Self::Factorial,
            Self::Factorial => Self::Application,
            Self::Application => Self::Constant,
            Self::Constant | Self::Literal => Self::Literal,
        }
    }
}
