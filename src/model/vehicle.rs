use std::{fmt, mem};

use serde::{Deserialize, Serialize};

use super::{
    FormatError, passenger::Passenger, route::Route, route_type::RouteType, stop::Stop,
};
use crate::utils::{count_delimiters, parse_int};

pub type VehicleId = i32;

/// Ferry type used when a ferry line doesn't name one
pub const DEFAULT_FERRY_TYPE: &str = "CityCat";

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("vehicle is at capacity")]
pub struct OverCapacityError;

/// The data only one kind of vehicle carries
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Bus { registration: String },
    Train { carriage_count: i32 },
    Ferry { ferry_type: String },
}

/// A bus, train or ferry bound to exactly one route.
///
/// The vehicle only remembers which route it runs on (by number and type),
/// the route itself is owned elsewhere. Its type is the type of that route.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Vehicle {
    id: VehicleId,
    capacity: u32,
    route_number: i32,
    route_type: RouteType,
    passengers: Vec<Passenger>,
    /// None when the vehicle was created on a route with no stops
    current_stop: Option<Stop>,
    kind: VehicleKind,
}

impl Vehicle {
    /// Creates a vehicle at the start of `route`. A negative capacity is
    /// stored as 0.
    pub fn new(id: VehicleId, capacity: i32, route: &Route, kind: VehicleKind) -> Self {
        Self {
            id,
            capacity: capacity.max(0).unsigned_abs(),
            route_number: route.number(),
            route_type: route.route_type(),
            passengers: vec![],
            current_stop: route.start_stop().ok().cloned(),
            kind,
        }
    }

    pub fn bus(
        id: VehicleId,
        capacity: i32,
        route: &Route,
        registration: impl Into<String>,
    ) -> Self {
        let registration = registration.into();
        Self::new(id, capacity, route, VehicleKind::Bus { registration })
    }

    pub fn train(id: VehicleId, capacity: i32, route: &Route, carriage_count: i32) -> Self {
        Self::new(id, capacity, route, VehicleKind::Train { carriage_count })
    }

    /// Creates a ferry. Without a ferry type it is a [`DEFAULT_FERRY_TYPE`].
    pub fn ferry(id: VehicleId, capacity: i32, route: &Route, ferry_type: Option<String>) -> Self {
        let ferry_type = ferry_type.unwrap_or_else(|| DEFAULT_FERRY_TYPE.to_string());
        Self::new(id, capacity, route, VehicleKind::Ferry { ferry_type })
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn route_number(&self) -> i32 {
        self.route_number
    }

    /// The type of the route this vehicle runs on
    pub fn route_type(&self) -> RouteType {
        self.route_type
    }

    pub fn kind(&self) -> &VehicleKind {
        &self.kind
    }

    pub fn registration(&self) -> Option<&str> {
        match &self.kind {
            VehicleKind::Bus { registration } => Some(registration),
            _ => None,
        }
    }

    pub fn carriage_count(&self) -> Option<i32> {
        match self.kind {
            VehicleKind::Train { carriage_count } => Some(carriage_count),
            _ => None,
        }
    }

    pub fn ferry_type(&self) -> Option<&str> {
        match &self.kind {
            VehicleKind::Ferry { ferry_type } => Some(ferry_type),
            _ => None,
        }
    }

    pub fn current_stop(&self) -> Option<&Stop> {
        self.current_stop.as_ref()
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    /// A copy of the passengers on board
    pub fn passengers(&self) -> Vec<Passenger> {
        self.passengers.clone()
    }

    /// Boards a passenger. `None` is ignored.
    pub fn add_passenger(
        &mut self,
        passenger: impl Into<Option<Passenger>>,
    ) -> Result<(), OverCapacityError> {
        let Some(passenger) = passenger.into() else {
            return Ok(());
        };

        if self.passengers.len() >= self.capacity as usize {
            return Err(OverCapacityError);
        }
        self.passengers.push(passenger);

        Ok(())
    }

    /// Removes one passenger equal to `passenger`. Returns false if nobody
    /// matching was on board.
    pub fn remove_passenger(&mut self, passenger: &Passenger) -> bool {
        match self.passengers.iter().position(|p| p == passenger) {
            Some(index) => {
                self.passengers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empties the vehicle, returning everyone who was on board
    pub fn unload(&mut self) -> Vec<Passenger> {
        mem::take(&mut self.passengers)
    }

    /// Moves the vehicle to `stop` if that stop is on `route`. Anything else,
    /// including a route other than the vehicle's own, leaves it where it is.
    pub fn travel_to(&mut self, route: &Route, stop: Option<&Stop>) {
        if route.number() != self.route_number || route.route_type() != self.route_type {
            return;
        }

        if let Some(stop) = stop.filter(|s| route.has_stop(s)) {
            self.current_stop = Some(stop.clone());
        }
    }

    /// Encodes the fields every vehicle shares: `type,id,capacity,routeNumber`
    pub fn encode_base(&self) -> String {
        format!(
            "{},{},{},{}",
            self.route_type, self.id, self.capacity, self.route_number
        )
    }

    /// Encodes the vehicle as `type,id,capacity,routeNumber,extra`, where
    /// `extra` is the registration, carriage count or ferry type.
    pub fn encode(&self) -> String {
        match &self.kind {
            VehicleKind::Bus { registration } => format!("{},{registration}", self.encode_base()),
            VehicleKind::Train { carriage_count } => {
                format!("{},{carriage_count}", self.encode_base())
            }
            VehicleKind::Ferry { ferry_type } => format!("{},{ferry_type}", self.encode_base()),
        }
    }

    /// Decodes a vehicle line and assigns the vehicle to its route, which is
    /// looked up by number in `existing_routes`.
    ///
    /// Ferries may leave out the trailing ferry type. Every other line needs
    /// all five fields.
    pub fn decode(line: &str, existing_routes: &mut [Route]) -> Result<Self, FormatError> {
        let fields: Vec<&str> = line.split(',').collect();
        let tag = fields[0];

        let found = count_delimiters(line, ',');
        if !(found == 4 || (found == 3 && tag == RouteType::Ferry.tag())) {
            return Err(FormatError::DelimiterCount {
                delimiter: ',',
                expected: "4",
                found,
            });
        }

        let id = parse_int("vehicle id", fields[1])?;
        let capacity = parse_int("capacity", fields[2])?;
        let route_number = parse_int("route number", fields[3])?;
        let extra = fields.get(4).copied();

        let route = existing_routes
            .iter_mut()
            .find(|r| r.number() == route_number)
            .ok_or(FormatError::UnresolvedRoute(route_number))?;

        let vehicle_type = RouteType::try_from(tag)?;
        if vehicle_type != route.route_type() {
            return Err(FormatError::TypeMismatch {
                route_number,
                expected: route.route_type(),
                found: vehicle_type,
            });
        }

        let vehicle = match vehicle_type {
            RouteType::Bus => Vehicle::bus(id, capacity, route, extra.unwrap_or_default()),
            RouteType::Train => {
                let extra = extra.ok_or(FormatError::MissingField("carriage count"))?;
                let carriage_count = extra.trim().parse().map_err(|source| {
                    FormatError::InvalidCarriageCount {
                        value: extra.to_string(),
                        source,
                    }
                })?;
                Vehicle::train(id, capacity, route, carriage_count)
            }
            RouteType::Ferry => Vehicle::ferry(
                id,
                capacity,
                route,
                extra.filter(|e| !e.is_empty()).map(str::to_string),
            ),
        };

        route.add_transport(&vehicle)?;

        Ok(vehicle)
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} number {} ({}) on route {}",
            self.route_type, self.id, self.capacity, self.route_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::route::AttachError;

    fn routes() -> Vec<Route> {
        let stops = vec![
            Stop::new("stop0", 0, 1),
            Stop::new("stop1", -1, 0),
            Stop::new("stop2", 4, 2),
        ];

        vec![
            Route::decode("train,red,1:stop0|stop2|stop1", &stops).unwrap(),
            Route::decode("bus,blue,2:stop1|stop0", &stops).unwrap(),
            Route::decode("ferry,orange,3:stop1", &stops).unwrap(),
            Route::decode("bus,empty,4", &stops).unwrap(),
        ]
    }

    #[test]
    fn test_decode_bus() -> Result<(), anyhow::Error> {
        let mut routes = routes();
        let bus = Vehicle::decode("bus,412,20,2,ABC123", &mut routes)?;

        assert_eq!(bus.id(), 412);
        assert_eq!(bus.capacity(), 20);
        assert_eq!(bus.route_type(), RouteType::Bus);
        assert_eq!(bus.registration(), Some("ABC123"));
        assert_eq!(bus.current_stop(), Some(&Stop::new("stop1", -1, 0)));
        assert_eq!(routes[1].vehicle_ids(), vec![412]);
        assert_eq!(bus.to_string(), "bus number 412 (20) on route 2");

        Ok(())
    }

    #[test]
    fn test_decode_train() -> Result<(), anyhow::Error> {
        let mut routes = routes();
        let train = Vehicle::decode("train, 42 , 60 ,1, 3 ", &mut routes)?;

        assert_eq!(train.carriage_count(), Some(3));
        assert_eq!(train.encode(), "train,42,60,1,3");

        Ok(())
    }

    #[test]
    fn test_decode_ferry_without_type() -> Result<(), anyhow::Error> {
        let mut routes = routes();

        let ferry = Vehicle::decode("ferry,123,30,3", &mut routes)?;
        assert_eq!(ferry.ferry_type(), Some(DEFAULT_FERRY_TYPE));

        let ferry = Vehicle::decode("ferry,124,30,3,", &mut routes)?;
        assert_eq!(ferry.ferry_type(), Some(DEFAULT_FERRY_TYPE));

        let ferry = Vehicle::decode("ferry,125,30,3,citycat", &mut routes)?;
        assert_eq!(ferry.ferry_type(), Some("citycat"));

        assert_eq!(routes[2].vehicle_ids(), vec![123, 124, 125]);

        Ok(())
    }

    #[test]
    fn test_decode_wrong_comma_count() {
        for line in [
            "bus,412,20,2",
            "train,42,60,1",
            "bus,412,20,2,ABC,123",
            "ferry,123,30",
            "ferry,123,30,3,citycat,extra",
            "",
        ] {
            assert!(
                matches!(
                    Vehicle::decode(line, &mut routes()),
                    Err(FormatError::DelimiterCount { delimiter: ',', .. })
                ),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_decode_non_integer_fields() {
        for line in ["bus,x,20,2,ABC", "bus,412,twenty,2,ABC", "bus,412,20,,ABC"] {
            assert!(
                matches!(
                    Vehicle::decode(line, &mut routes()),
                    Err(FormatError::InvalidInteger { .. })
                ),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_decode_missing_route() {
        assert!(matches!(
            Vehicle::decode("bus,412,20,9,ABC123", &mut routes()),
            Err(FormatError::UnresolvedRoute(9))
        ));
    }

    #[test]
    fn test_decode_wrong_route_type() {
        let mut routes = routes();

        assert!(matches!(
            Vehicle::decode("bus,412,20,1,ABC123", &mut routes),
            Err(FormatError::TypeMismatch {
                route_number: 1,
                expected: RouteType::Train,
                found: RouteType::Bus
            })
        ));
        assert!(routes[0].vehicle_ids().is_empty());
    }

    #[test]
    fn test_decode_unknown_type() {
        assert!(matches!(
            Vehicle::decode("tram,412,20,2,ABC123", &mut routes()),
            Err(FormatError::UnknownType(_))
        ));
    }

    #[test]
    fn test_decode_carriage_count_not_integer() {
        assert!(matches!(
            Vehicle::decode("train,42,60,1,three", &mut routes()),
            Err(FormatError::InvalidCarriageCount { .. })
        ));
    }

    #[test]
    fn test_decode_route_without_stops() {
        assert!(matches!(
            Vehicle::decode("bus,7,20,4,rego", &mut routes()),
            Err(FormatError::Rejected(AttachError::EmptyRoute(_)))
        ));
    }

    #[test]
    fn test_encode() {
        let routes = routes();
        let bus = Vehicle::bus(1, 30, &routes[1], "rego");

        assert_eq!(bus.encode_base(), "bus,1,30,2");
        assert_eq!(bus.encode(), "bus,1,30,2,rego");

        let ferry = Vehicle::ferry(2, 10, &routes[2], None);
        assert_eq!(ferry.encode(), "ferry,2,10,3,CityCat");
    }

    #[test]
    fn test_negative_capacity() {
        let routes = routes();
        let mut bus = Vehicle::bus(1, -5, &routes[1], "rego");

        assert_eq!(bus.capacity(), 0);
        assert_eq!(bus.add_passenger(Passenger::new("amy")), Err(OverCapacityError));
        assert_eq!(bus.encode_base(), "bus,1,0,2");
    }

    #[test]
    fn test_empty_route_has_no_location() {
        let routes = routes();
        let bus = Vehicle::bus(1, 5, &routes[3], "rego");

        assert_eq!(bus.current_stop(), None);
    }

    #[test]
    fn test_passengers() -> Result<(), anyhow::Error> {
        let routes = routes();
        let mut train = Vehicle::train(42, 2, &routes[0], 3);
        let amy = Passenger::new("amy");
        let bob = Passenger::new("bob");

        train.add_passenger(amy.clone())?;
        train.add_passenger(None)?;
        train.add_passenger(bob.clone())?;
        assert_eq!(train.passenger_count(), 2);
        assert_eq!(
            train.add_passenger(Passenger::new("cat")),
            Err(OverCapacityError)
        );

        let mut copy = train.passengers();
        copy.clear();
        assert_eq!(train.passenger_count(), 2);

        assert!(train.remove_passenger(&amy));
        assert!(!train.remove_passenger(&amy));
        assert_eq!(train.unload(), vec![bob]);
        assert!(train.unload().is_empty());

        Ok(())
    }

    #[test]
    fn test_travel_to() {
        let routes = routes();
        let mut train = Vehicle::train(42, 60, &routes[0], 3);
        let stop2 = Stop::new("stop2", 4, 2);

        train.travel_to(&routes[0], Some(&stop2));
        assert_eq!(train.current_stop(), Some(&stop2));

        train.travel_to(&routes[0], None);
        assert_eq!(train.current_stop(), Some(&stop2));

        train.travel_to(&routes[0], Some(&Stop::new("stop9", 0, 0)));
        assert_eq!(train.current_stop(), Some(&stop2));

        // stop0 is on the bus route too, but the train doesn't run there
        train.travel_to(&routes[1], Some(&Stop::new("stop0", 0, 1)));
        assert_eq!(train.current_stop(), Some(&stop2));
    }
}
