use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::FormatError;

/// The kind of transport a route carries. A vehicle's type is always the
/// type of the route it runs on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    Bus,
    Train,
    Ferry,
}

impl RouteType {
    /// The tag used for this type in encoded lines
    pub fn tag(self) -> &'static str {
        match self {
            RouteType::Bus => "bus",
            RouteType::Train => "train",
            RouteType::Ferry => "ferry",
        }
    }
}

impl TryFrom<&str> for RouteType {
    type Error = FormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "bus" => Ok(RouteType::Bus),
            "train" => Ok(RouteType::Train),
            "ferry" => Ok(RouteType::Ferry),
            _ => Err(FormatError::UnknownType(value.to_string())),
        }
    }
}

impl FromStr for RouteType {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteType::try_from(s)
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
