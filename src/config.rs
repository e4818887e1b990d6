use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::engine::REGISTER_STAGE;
use crate::error::{Error, Result};
use crate::models::{DurationRange, SimConfig};

/// Every stage preallocates one queue slot per car.
pub const MAX_CARS: usize = 1_000_000;

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    parse_config(&contents, ext)
}

pub fn parse_config(contents: &str, format: &str) -> Result<SimConfig> {
    match format {
        "toml" => toml::from_str(contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(format.to_string())),
    }
}

/// Rejects any configuration the engine cannot run to completion. Nothing is
/// spawned before this passes.
pub fn validate_config(config: &SimConfig) -> Result<()> {
    if config.cars.count > MAX_CARS {
        return Err(Error::TooManyCars {
            count: config.cars.count,
            max: MAX_CARS,
        });
    }
    check_range("arrival time", config.cars.arrival_range())?;

    if config.stations.is_empty() {
        return Err(Error::EmptyStations);
    }
    let mut names = HashSet::new();
    for station in &config.stations {
        if station.name.trim().is_empty() {
            return Err(Error::EmptyStationName);
        }
        // Names end up in thread names and report lines.
        if station.name.chars().any(char::is_control) {
            return Err(Error::InvalidStationName(station.name.clone()));
        }
        if station.name == REGISTER_STAGE {
            return Err(Error::ReservedStationName(station.name.clone()));
        }
        if !names.insert(station.name.as_str()) {
            return Err(Error::DuplicateStationName(station.name.clone()));
        }
        if station.count == 0 {
            return Err(Error::StationServersZero(station.name.clone()));
        }
        check_range(
            &format!("station '{}' serve time", station.name),
            station.serve_range(),
        )?;
    }

    if config.registers.count == 0 {
        return Err(Error::RegisterServersZero);
    }
    check_range("register handle time", config.registers.handle_range())?;

    Ok(())
}

fn check_range(what: &str, range: DurationRange) -> Result<()> {
    if range.is_valid() {
        return Ok(());
    }
    Err(Error::InvalidRange {
        what: what.to_string(),
        min: humantime::format_duration(range.min).to_string(),
        max: humantime::format_duration(range.max).to_string(),
    })
}
