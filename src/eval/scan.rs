//! Character-level scanning over the flat expression text.

use super::error::EvalError;
use crate::common::{BinaryOperator, Tier};

/// Checks that `(`/`)` and `[`/`]` pair up, never closing before opening.
pub(crate) fn check_balance(s: &str) -> Result<(), EvalError> {
    let mut parens = 0usize;
    let mut brackets = 0usize;
    for c in s.chars() {
        match c {
            '(' => parens += 1,
            ')' => parens = parens.checked_sub(1).ok_or(EvalError::UnbalancedParenthesis)?,
            '[' => brackets += 1,
            ']' => brackets = brackets.checked_sub(1).ok_or(EvalError::UnbalancedBracket)?,
            _ => {}
        }
    }
    if parens != 0 {
        Err(EvalError::UnbalancedParenthesis)
    } else if brackets != 0 {
        Err(EvalError::UnbalancedBracket)
    } else {
        Ok(())
    }
}

/// Byte offsets of the innermost parenthesis pair: the first `)` and the
/// last `(` before it.
pub(crate) fn innermost_group(s: &str) -> Option<(usize, usize)> {
    let close = s.find(')')?;
    let open = s[..close].rfind('(')?;
    Some((open, close))
}

/// Finds the rightmost operator of `tier` outside any bracket group.
///
/// A `+` or `-` right after `E` is the sign of a scientific exponent and is
/// skipped.
pub(crate) fn rightmost_operator(s: &str, tier: Tier) -> Option<(usize, BinaryOperator)> {
    let ops = tier.operators();
    let mut depth = 0usize;
    for (i, c) in s.char_indices().rev() {
        match c {
            ']' => depth += 1,
            '[' => depth = depth.saturating_sub(1),
            _ if depth == 0 && ops.contains(&c) => {
                if tier == Tier::Additive && s[..i].ends_with('E') {
                    continue;
                }
                return BinaryOperator::from_char(c).map(|op| (i, op));
            }
            _ => {}
        }
    }
    None
}

fn top_level_indices(s: &str, sep: char) -> impl Iterator<Item = usize> + '_ {
    let mut depth = 0usize;
    s.char_indices().filter_map(move |(i, c)| {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ if c == sep && depth == 0 => return Some(i),
            _ => {}
        }
        None
    })
}

pub(crate) fn has_top_level(s: &str, sep: char) -> bool {
    top_level_indices(s, sep).next().is_some()
}

/// Replaces every top-level `from` with `to`.
pub(crate) fn replace_top_level(s: &str, from: char, to: char) -> String {
    let mut ret = s.to_owned();
    for i in top_level_indices(s, from) {
        ret.replace_range(i..i + from.len_utf8(), to.encode_utf8(&mut [0; 4]));
    }
    ret
}

/// Splits `s` on `sep` wherever it is not nested in a group.
pub(crate) fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for i in top_level_indices(s, sep) {
        parts.push(&s[start..i]);
        start = i + sep.len_utf8();
    }
    parts.push(&s[start..]);
    parts
}

/// The text between a leading `[` and its matching `]`, when that `]` is the
/// last character of `s`.
pub(crate) fn enclosed(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('[')?.strip_suffix(']')?;
    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }
    (depth == 0).then(|| inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use BinaryOperator::*;

    #[test]
    fn test_balance() {
        assert_eq!(check_balance("(1+(2))*[3]"), Ok(()));
        assert_eq!(check_balance("(1"), Err(EvalError::UnbalancedParenthesis));
        assert_eq!(check_balance(")1("), Err(EvalError::UnbalancedParenthesis));
        assert_eq!(check_balance("max[1;2"), Err(EvalError::UnbalancedBracket));
        assert_eq!(check_balance("]["), Err(EvalError::UnbalancedBracket));
    }

    #[test]
    fn test_innermost_group() {
        assert_eq!(innermost_group("2*(1+(3))"), Some((5, 7)));
        assert_eq!(innermost_group("(1)+(2)"), Some((0, 2)));
        assert_eq!(innermost_group("1+2"), None);
    }

    #[test]
    fn test_rightmost_operator() {
        assert_eq!(rightmost_operator("1+2-3", Tier::Additive), Some((3, Sub)));
        assert_eq!(rightmost_operator("2^3^2", Tier::Power), Some((3, Pow)));
        assert_eq!(rightmost_operator("3d6%4", Tier::DiceRem), Some((3, Rem)));
        assert_eq!(rightmost_operator("2*3", Tier::Additive), None);
    }

    #[test]
    fn test_rightmost_skips_exponent_sign() {
        assert_eq!(rightmost_operator("1.5E+3", Tier::Additive), None);
        assert_eq!(rightmost_operator("1-2E-3", Tier::Additive), Some((1, Sub)));
        assert_eq!(rightmost_operator("1e-3", Tier::Additive), Some((2, Sub)));
    }

    #[test]
    fn test_rightmost_skips_brackets() {
        assert_eq!(rightmost_operator("max[1+2;3]", Tier::Additive), None);
        assert_eq!(rightmost_operator("1-max[1+2;3]", Tier::Additive), Some((1, Sub)));
    }

    #[test]
    fn test_top_level_commas() {
        assert!(has_top_level("1,2", ','));
        assert!(!has_top_level("min[1,2]", ','));
        assert_eq!(replace_top_level("1,min[2,3],4", ',', ';'), "1;min[2,3];4");
        assert_eq!(split_top_level("1;min[2;3];4", ';'), vec!["1", "min[2;3]", "4"]);
        assert_eq!(split_top_level("", ';'), vec![""]);
    }

    #[test]
    fn test_enclosed() {
        assert_eq!(enclosed("[1;2]"), Some("1;2"));
        assert_eq!(enclosed("[1;min[2;3]]"), Some("1;min[2;3]"));
        assert_eq!(enclosed("[1]+[2]"), None);
        assert_eq!(enclosed("1;2"), None);
    }
}
