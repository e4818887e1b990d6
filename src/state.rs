use std::time::Duration;

use crate::models::RoutingConfig;
use crate::stage::StageStats;

#[derive(Clone, Debug)]
pub struct StageSummary {
    pub name: String,
    pub servers: usize,
    pub stats: StageStats,
}

#[derive(Clone, Debug)]
pub struct RunMetadata {
    pub seed: u64,
    pub routing: RoutingConfig,
    pub cars: usize,
    /// Wall-clock time from first spawn to the last server exiting.
    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
pub struct SimulationResult {
    pub metadata: RunMetadata,
    pub stations: Vec<StageSummary>,
    pub register: StageSummary,
}

impl SimulationResult {
    pub fn station(&self, name: &str) -> Option<&StageSummary> {
        self.stations.iter().find(|summary| summary.name == name)
    }

    pub fn station_served(&self) -> u64 {
        self.stations.iter().map(|summary| summary.stats.served).sum()
    }
}
