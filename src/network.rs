//! The network owns every stop, route and vehicle, and moves them in and out
//! of network files.
mod load;
mod save;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{
    FormatError,
    route::Route,
    stop::Stop,
    vehicle::{Vehicle, VehicleId},
};

#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    #[error("error accessing the network file")]
    Io(#[from] std::io::Error),

    #[error("invalid network file at line {line}: {source}")]
    Format { line: usize, source: FormatError },
}

/// Stops, routes and vehicles, each kept in insertion order. Duplicates are
/// allowed.
///
/// Building a network by hand is lenient: adding `None` does nothing. Loading
/// a network file is strict and rejects any malformed line.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Network {
    stops: Vec<Stop>,
    routes: Vec<Route>,
    vehicles: Vec<Vehicle>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stop(&mut self, stop: impl Into<Option<Stop>>) {
        match stop.into() {
            Some(stop) => self.stops.push(stop),
            None => debug!("ignoring missing stop"),
        }
    }

    /// Adds all of `stops`, or none of them if any is missing
    pub fn add_stops<I>(&mut self, stops: I)
    where
        I: IntoIterator<Item = Option<Stop>>,
    {
        match stops.into_iter().collect::<Option<Vec<Stop>>>() {
            Some(stops) => self.stops.extend(stops),
            None => debug!("ignoring stops, at least one is missing"),
        }
    }

    pub fn add_route(&mut self, route: impl Into<Option<Route>>) {
        match route.into() {
            Some(route) => self.routes.push(route),
            None => debug!("ignoring missing route"),
        }
    }

    pub fn add_vehicle(&mut self, vehicle: impl Into<Option<Vehicle>>) {
        match vehicle.into() {
            Some(vehicle) => self.vehicles.push(vehicle),
            None => debug!("ignoring missing vehicle"),
        }
    }

    pub fn stops(&self) -> Vec<Stop> {
        self.stops.clone()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.clone()
    }

    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.vehicles.clone()
    }

    /// First route with the given number
    pub fn route(&self, number: i32) -> Option<&Route> {
        self.routes.iter().find(|r| r.number() == number)
    }

    /// First vehicle with the given id
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    /// Moves a vehicle to `stop` along its route. Returns whether the vehicle
    /// is now at `stop`.
    pub fn travel(&mut self, vehicle_id: VehicleId, stop: &Stop) -> bool {
        let Some(vehicle) = self.vehicles.iter_mut().find(|v| v.id() == vehicle_id) else {
            return false;
        };
        let Some(route) = self.routes.iter().find(|r| {
            r.number() == vehicle.route_number() && r.route_type() == vehicle.route_type()
        }) else {
            return false;
        };

        vehicle.travel_to(route, Some(stop));

        vehicle.current_stop() == Some(stop)
    }
}
