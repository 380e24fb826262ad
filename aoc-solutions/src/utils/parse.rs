//! Input helpers shared by the puzzle parsers.

use anyhow::{Context, anyhow};
use aoc_solver::ParseError;

/// Parse every non-blank line with `f`. A failure is reported as
/// [`ParseError::InvalidFormat`] carrying the 1-based line number.
pub fn parse_lines<T>(
    input: &str,
    mut f: impl FnMut(&str) -> anyhow::Result<T>,
) -> Result<Vec<T>, ParseError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_idx, line)| f(line.trim()).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e)))
        .collect::<anyhow::Result<Vec<T>>>()
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
}

/// All signed integers in `text`, in order. `+` and any other non-digit
/// characters act as separators, a `-` directly before digits is a sign.
pub fn integers(text: &str) -> anyhow::Result<Vec<i64>> {
    let mut numbers = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        let negative = c == '-' && chars.peek().is_some_and(|&(_, next)| next.is_ascii_digit());
        if !(c.is_ascii_digit() || negative) {
            continue;
        }
        let mut end = start + c.len_utf8();
        while let Some(&(i, d)) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            end = i + d.len_utf8();
            chars.next();
        }
        let token = &text[start..end];
        numbers.push(token.parse().with_context(|| format!("number out of range: {token}"))?);
    }
    Ok(numbers)
}

/// Like [`integers`] but demands exactly `N` of them.
pub fn fixed_integers<const N: usize>(text: &str) -> anyhow::Result<[i64; N]> {
    let numbers = integers(text)?;
    let found = numbers.len();
    numbers
        .try_into()
        .map_err(|_| anyhow!("expected {N} numbers, found {found}"))
}
