//! Whitespace-separated number lists, the text payload of every UGX element

use crate::error::{Result, Section, UgxError};

/// Format a number the way UGX files are written.
///
/// Integral values print without a fractional part (`2.0` becomes `"2"`),
/// anything else uses the shortest decimal that reads back to the same
/// value (`2.5` becomes `"2.5"`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        // also folds -0.0 into "0"
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Join numbers with single spaces
pub(crate) fn join_numbers<I>(values: I) -> String
where
    I: IntoIterator<Item = f64>,
{
    let mut out = String::new();
    for value in values {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format_number(value));
    }
    out
}

/// Join indices with single spaces
pub(crate) fn join_indices<I>(indices: I) -> String
where
    I: IntoIterator<Item = usize>,
{
    let mut out = String::new();
    for index in indices {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&index.to_string());
    }
    out
}

/// Parse a list of floating point numbers
pub(crate) fn parse_numbers(text: &str, section: Section) -> Result<Vec<f64>> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<f64>().map_err(|_| UgxError::InvalidNumber {
                section,
                position,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse a list of non-negative indices
pub(crate) fn parse_indices(text: &str, section: Section) -> Result<Vec<usize>> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<usize>().map_err(|_| UgxError::InvalidNumber {
                section,
                position,
                token: token.to_string(),
            })
        })
        .collect()
}
