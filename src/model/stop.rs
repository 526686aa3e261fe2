use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::FormatError;
use crate::utils::{count_delimiters, parse_int};

/// A named point on the network. Routes refer to stops by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Stop {
    name: String,
    x: i32,
    y: i32,
}

impl Stop {
    pub fn new(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Encodes the stop as `name:x:y`
    pub fn encode(&self) -> String {
        format!("{}:{}:{}", self.name, self.x, self.y)
    }

    /// Decodes a `name:x:y` line. Coordinates may be padded with whitespace.
    pub fn decode(line: &str) -> Result<Self, FormatError> {
        let Some((name, x, y)) = line.split(':').collect_tuple() else {
            return Err(FormatError::DelimiterCount {
                delimiter: ':',
                expected: "2",
                found: count_delimiters(line, ':'),
            });
        };

        if name.is_empty() {
            return Err(FormatError::EmptyName);
        }

        Ok(Stop {
            name: name.to_string(),
            x: parse_int("x coordinate", x)?,
            y: parse_int("y coordinate", y)?,
        })
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.x, self.y)
    }
}
