use std::str::FromStr;

use crate::model::FormatError;

/// Number of times `delimiter` occurs in `line`
pub fn count_delimiters(line: &str, delimiter: char) -> usize {
    line.matches(delimiter).count()
}

/// Parses a numeric field, ignoring surrounding whitespace
pub fn parse_int<T: FromStr<Err = std::num::ParseIntError>>(
    field: &'static str,
    value: &str,
) -> Result<T, FormatError> {
    value
        .trim()
        .parse()
        .map_err(|source| FormatError::InvalidInteger {
            field,
            value: value.to_string(),
            source,
        })
}
