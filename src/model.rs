pub mod passenger;
pub mod route;
pub mod route_type;
pub mod stop;
pub mod vehicle;

use std::num::ParseIntError;

use route::AttachError;
use route_type::RouteType;

/// Any structural or referential problem found while decoding an encoded
/// record or the block layout of a network file.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("expected {expected} '{delimiter}' delimiters, found {found}")]
    DelimiterCount {
        delimiter: char,
        expected: &'static str,
        found: usize,
    },

    #[error("stop name is empty")]
    EmptyName,

    #[error("{field} is not an integer: {value:?}")]
    InvalidInteger {
        field: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("unknown transport type {0:?}")]
    UnknownType(String),

    #[error("stop {0:?} does not exist")]
    UnresolvedStop(String),

    #[error("route contains an empty stop name")]
    EmptyStopName,

    #[error("route {0} does not exist")]
    UnresolvedRoute(i32),

    #[error("{found} can't run on route {route_number}, which is a {expected} route")]
    TypeMismatch {
        route_number: i32,
        expected: RouteType,
        found: RouteType,
    },

    #[error("{0} is missing")]
    MissingField(&'static str),

    #[error("carriage count is not an integer: {value:?}")]
    InvalidCarriageCount {
        value: String,
        source: ParseIntError,
    },

    #[error("invalid {block} count {value:?}")]
    InvalidCount { block: &'static str, value: String },

    #[error("file ended while reading {0}")]
    MissingLine(&'static str),

    #[error("unexpected content after the vehicle block: {0:?}")]
    TrailingContent(String),

    #[error("vehicle can't be placed on its route")]
    Rejected(#[from] AttachError),
}
