use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SimConfig {
    pub cars: CarConfig,
    pub stations: Vec<StationConfig>,
    pub registers: RegisterConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CarConfig {
    pub count: usize,
    #[serde(with = "duration_str")]
    pub arrival_time_min: Duration,
    #[serde(with = "duration_str")]
    pub arrival_time_max: Duration,
}

/// One configured station type. Every type gets its own stage with `count`
/// servers.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StationConfig {
    pub name: String,
    pub count: usize,
    #[serde(with = "duration_str")]
    pub serve_time_min: Duration,
    #[serde(with = "duration_str")]
    pub serve_time_max: Duration,
}

/// The shared payment stage every car passes through.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RegisterConfig {
    pub count: usize,
    #[serde(with = "duration_str")]
    pub handle_time_min: Duration,
    #[serde(with = "duration_str")]
    pub handle_time_max: Duration,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingConfig {
    #[default]
    Uniform,
    RoundRobin,
}

impl RoutingConfig {
    pub const ALL: [RoutingConfig; 2] = [RoutingConfig::Uniform, RoutingConfig::RoundRobin];
}

impl fmt::Display for RoutingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoutingConfig::Uniform => "uniform",
            RoutingConfig::RoundRobin => "round-robin",
        };
        f.write_str(label)
    }
}

/// Inclusive bounds for a sampled duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DurationRange {
    pub min: Duration,
    pub max: Duration,
}

impl DurationRange {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub fn fixed(value: Duration) -> Self {
        Self::new(value, value)
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// Uniform sample from `[min, max]`. A zero-width range yields `min`
    /// without consuming randomness.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

impl CarConfig {
    pub fn arrival_range(&self) -> DurationRange {
        DurationRange::new(self.arrival_time_min, self.arrival_time_max)
    }
}

impl StationConfig {
    pub fn serve_range(&self) -> DurationRange {
        DurationRange::new(self.serve_time_min, self.serve_time_max)
    }
}

impl RegisterConfig {
    pub fn handle_range(&self) -> DurationRange {
        DurationRange::new(self.handle_time_min, self.handle_time_max)
    }
}

mod duration_str {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(raw.trim()).map_err(|err| {
            serde::de::Error::custom(format!("invalid duration '{}': {}", raw, err))
        })
    }
}
