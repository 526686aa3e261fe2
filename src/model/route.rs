use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{
    FormatError,
    route_type::RouteType,
    stop::Stop,
    vehicle::{Vehicle, VehicleId},
};
use crate::utils::{count_delimiters, parse_int};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("route has no stops")]
pub struct EmptyRouteError;

/// Reasons a vehicle can't be assigned to a route
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    #[error(transparent)]
    EmptyRoute(#[from] EmptyRouteError),

    #[error("a {found} can't be added to a {expected} route")]
    IncompatibleType {
        expected: RouteType,
        found: RouteType,
    },
}

/// An ordered, possibly empty, sequence of stops served by one type of
/// vehicle. Identified by its number.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Route {
    route_type: RouteType,
    name: String,
    number: i32,
    stops: Vec<Stop>,
    /// Ids of the vehicles assigned to this route, in assignment order
    vehicles: Vec<VehicleId>,
}

impl Route {
    pub fn new(route_type: RouteType, name: impl Into<String>, number: i32) -> Self {
        Self {
            route_type,
            name: name.into(),
            number,
            stops: vec![],
            vehicles: vec![],
        }
    }

    pub fn bus(name: impl Into<String>, number: i32) -> Self {
        Self::new(RouteType::Bus, name, number)
    }

    pub fn train(name: impl Into<String>, number: i32) -> Self {
        Self::new(RouteType::Train, name, number)
    }

    pub fn ferry(name: impl Into<String>, number: i32) -> Self {
        Self::new(RouteType::Ferry, name, number)
    }

    pub fn route_type(&self) -> RouteType {
        self.route_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    /// A copy of the stops on this route, in travel order
    pub fn stops(&self) -> Vec<Stop> {
        self.stops.clone()
    }

    pub fn has_stop(&self, stop: &Stop) -> bool {
        self.stops.contains(stop)
    }

    pub fn add_stop(&mut self, stop: Stop) {
        self.stops.push(stop);
    }

    /// The first stop of the route
    pub fn start_stop(&self) -> Result<&Stop, EmptyRouteError> {
        self.stops.first().ok_or(EmptyRouteError)
    }

    /// Ids of the vehicles assigned to this route
    pub fn vehicle_ids(&self) -> Vec<VehicleId> {
        self.vehicles.clone()
    }

    /// Assigns a vehicle to this route. The vehicle must be of the route's
    /// type, and the route must have a stop for it to start from.
    pub fn add_transport(&mut self, vehicle: &Vehicle) -> Result<(), AttachError> {
        if vehicle.route_type() != self.route_type {
            return Err(AttachError::IncompatibleType {
                expected: self.route_type,
                found: vehicle.route_type(),
            });
        }
        self.start_stop()?;

        self.vehicles.push(vehicle.id());

        Ok(())
    }

    /// Encodes the route as `type,name,number:stop1|stop2|...`. The `:`
    /// section is left out when the route has no stops.
    pub fn encode(&self) -> String {
        let head = format!("{},{},{}", self.route_type, self.name, self.number);
        if self.stops.is_empty() {
            return head;
        }

        format!("{head}:{}", self.stops.iter().map(Stop::name).join("|"))
    }

    /// Decodes a route line, resolving each stop name against
    /// `existing_stops` (first match wins).
    pub fn decode(line: &str, existing_stops: &[Stop]) -> Result<Self, FormatError> {
        let Some((route_type, name, tail)) = line.split(',').collect_tuple() else {
            return Err(FormatError::DelimiterCount {
                delimiter: ',',
                expected: "2",
                found: count_delimiters(line, ','),
            });
        };
        let route_type = RouteType::try_from(route_type)?;

        let found = count_delimiters(tail, ':');
        if found > 1 {
            return Err(FormatError::DelimiterCount {
                delimiter: ':',
                expected: "at most 1",
                found,
            });
        }

        let (number, stop_names) = match tail.split_once(':') {
            Some((number, stop_names)) => (number, Some(stop_names)),
            None => (tail, None),
        };

        let mut route = Route::new(route_type, name, parse_int("route number", number)?);

        if let Some(stop_names) = stop_names {
            for stop_name in stop_names.split('|') {
                if stop_name.is_empty() {
                    return Err(FormatError::EmptyStopName);
                }

                let stop = existing_stops
                    .iter()
                    .find(|s| s.name() == stop_name)
                    .ok_or_else(|| FormatError::UnresolvedStop(stop_name.to_string()))?;

                route.add_stop(stop.clone());
            }
        }

        Ok(route)
    }
}

/// Routes are equal when their type, name, number and stops match. Assigned
/// vehicles are not compared.
impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.route_type == other.route_type
            && self.name == other.name
            && self.number == other.number
            && self.stops == other.stops
    }
}

impl Eq for Route {}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
