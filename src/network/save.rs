use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use tracing::info;

use super::{Network, NetworkError};
use crate::model::{route::Route, stop::Stop, vehicle::Vehicle};

impl Network {
    /// Saves the network to `path`. Without a path nothing is written.
    #[tracing::instrument(err, skip(self))]
    pub fn save(&self, path: Option<&Path>) -> Result<(), NetworkError> {
        let Some(path) = path else {
            return Ok(());
        };

        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;

        info!(
            "saved {} stops, {} routes and {} vehicles",
            self.stops.len(),
            self.routes.len(),
            self.vehicles.len()
        );

        Ok(())
    }

    /// Writes the stop, route and vehicle blocks, each a count line followed
    /// by one encoded line per entry.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        write_block(&mut writer, self.stops.iter().map(Stop::encode))?;
        write_block(&mut writer, self.routes.iter().map(Route::encode))?;
        write_block(&mut writer, self.vehicles.iter().map(Vehicle::encode))?;

        Ok(())
    }
}

fn write_block<W, I>(writer: &mut W, lines: I) -> std::io::Result<()>
where
    W: Write,
    I: ExactSizeIterator<Item = String>,
{
    writeln!(writer, "{}", lines.len())?;
    for line in lines {
        writeln!(writer, "{line}")?;
    }

    Ok(())
}
