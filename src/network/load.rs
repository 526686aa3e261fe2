//! Reading networks from the block based file format:
//!
//! ```raw
//! <stop count>
//! <stop line>*
//! <route count>
//! <route line>*
//! <vehicle count>
//! <vehicle line>*
//! ```
//!
//! Stops are decoded first so routes can refer to them, then routes so
//! vehicles can refer to them. Nothing may follow the last vehicle line.
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
};

use tracing::{debug, info};

use super::{Network, NetworkError};
use crate::model::{FormatError, route::Route, stop::Stop, vehicle::Vehicle};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Block {
    Stops,
    Routes,
    Vehicles,
}

impl Block {
    fn name(self) -> &'static str {
        match self {
            Block::Stops => "stops",
            Block::Routes => "routes",
            Block::Vehicles => "vehicles",
        }
    }

    fn next(self) -> Option<Block> {
        match self {
            Block::Stops => Some(Block::Routes),
            Block::Routes => Some(Block::Vehicles),
            Block::Vehicles => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LoadState {
    /// Waiting for the count line of a block
    Header(Block),
    /// Inside a block with this many lines left to decode
    Lines(Block, usize),
    /// Every block has been read
    End,
}

impl LoadState {
    fn after(block: Block, remaining: usize) -> Self {
        if remaining > 0 {
            return LoadState::Lines(block, remaining);
        }

        match block.next() {
            Some(next) => LoadState::Header(next),
            None => LoadState::End,
        }
    }
}

impl Network {
    /// Loads a network file. A missing path is an I/O error.
    #[tracing::instrument(err)]
    pub fn load(path: Option<&Path>) -> Result<Self, NetworkError> {
        let Some(path) = path else {
            let err = io::Error::new(io::ErrorKind::InvalidInput, "no network file given");
            return Err(err.into());
        };

        let file = File::open(path)?;
        Self::from_bufread(BufReader::new(file))
    }

    /// Loads a network from a generic reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, NetworkError> {
        Self::from_bufread(BufReader::new(reader))
    }

    /// Loads a network from the contents of a network file
    pub fn load_from_str(s: &str) -> Result<Self, NetworkError> {
        Self::from_bufread(s.as_bytes())
    }

    /// Loads a network from a buffered reader
    #[tracing::instrument(err, skip(reader))]
    pub fn from_bufread<R: BufRead>(reader: R) -> Result<Self, NetworkError> {
        let mut network = Network::new();
        let mut state = LoadState::Header(Block::Stops);
        let mut line_number = 0;

        for line in reader.lines() {
            let line = line?;
            line_number += 1;

            state = network
                .read_line(state, &line)
                .map_err(|source| NetworkError::Format {
                    line: line_number,
                    source,
                })?;
        }

        match state {
            LoadState::End => {}
            LoadState::Header(block) | LoadState::Lines(block, _) => {
                return Err(NetworkError::Format {
                    line: line_number + 1,
                    source: FormatError::MissingLine(block.name()),
                });
            }
        }

        info!(
            "loaded {} stops, {} routes and {} vehicles",
            network.stops.len(),
            network.routes.len(),
            network.vehicles.len()
        );

        Ok(network)
    }

    fn read_line(&mut self, state: LoadState, line: &str) -> Result<LoadState, FormatError> {
        match state {
            LoadState::Header(block) => {
                let count = parse_count(block, line)?;
                debug!(block = block.name(), count, "reading block");

                Ok(LoadState::after(block, count))
            }
            LoadState::Lines(block, remaining) => {
                match block {
                    Block::Stops => {
                        let stop = Stop::decode(line)?;
                        self.add_stop(stop);
                    }
                    Block::Routes => {
                        let route = Route::decode(line, &self.stops)?;
                        self.add_route(route);
                    }
                    Block::Vehicles => {
                        let vehicle = Vehicle::decode(line, &mut self.routes)?;
                        self.add_vehicle(vehicle);
                    }
                }

                Ok(LoadState::after(block, remaining - 1))
            }
            LoadState::End => Err(FormatError::TrailingContent(line.to_string())),
        }
    }
}

fn parse_count(block: Block, line: &str) -> Result<usize, FormatError> {
    let invalid = || FormatError::InvalidCount {
        block: block.name(),
        value: line.to_string(),
    };

    let count: i32 = line.trim().parse().map_err(|_| invalid())?;

    usize::try_from(count).map_err(|_| invalid())
}
