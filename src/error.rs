use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("stations must not be empty")]
    EmptyStations,
    #[error("station name must not be empty")]
    EmptyStationName,
    #[error("station name {0:?} must not contain control characters")]
    InvalidStationName(String),
    #[error("station name '{0}' is reserved for the register stage")]
    ReservedStationName(String),
    #[error("cars must be at most {max} (got {count})")]
    TooManyCars { count: usize, max: usize },
    #[error("duplicate station name '{0}'")]
    DuplicateStationName(String),
    #[error("station '{0}' must have at least one server")]
    StationServersZero(String),
    #[error("registers must have at least one server")]
    RegisterServersZero,
    #[error("invalid {what} range: min {min} is greater than max {max}")]
    InvalidRange {
        what: String,
        min: String,
        max: String,
    },
    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },
    #[error("intake for '{0}' is full; capacity must cover every arrival")]
    IntakeFull(String),
    #[error("intake for '{0}' has no running servers")]
    IntakeClosed(String),
    #[error("failed to spawn '{name}': {reason}")]
    Spawn { name: String, reason: String },
    #[error("'{0}' panicked")]
    WorkerPanicked(String),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;
