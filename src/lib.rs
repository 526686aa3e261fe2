//! A small transportation network of stops, routes and vehicles, and the
//! line-oriented text format it is persisted in.

pub mod model;
pub mod network;
mod utils;

pub use model::{
    FormatError,
    passenger::Passenger,
    route::{AttachError, EmptyRouteError, Route},
    route_type::RouteType,
    stop::Stop,
    vehicle::{OverCapacityError, Vehicle, VehicleId, VehicleKind},
};
pub use network::{Network, NetworkError};
