use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::info;

use crate::arrivals::ArrivalGenerator;
use crate::config::validate_config;
use crate::error::{Error, Result};
use crate::lifecycle::Coordinator;
use crate::models::SimConfig;
use crate::routing::build_router;
use crate::stage::ServiceStage;
use crate::state::{RunMetadata, SimulationResult, StageSummary};

pub const REGISTER_STAGE: &str = "registers";

pub struct SimulationEngine {
    pub config: SimConfig,
    pub seed: u64,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self { config, seed }
    }

    pub fn run(&self) -> Result<SimulationResult> {
        validate_config(&self.config)?;

        let cars = self.config.cars.count;
        info!(
            seed = self.seed,
            cars,
            stations = self.config.stations.len(),
            routing = %self.config.routing,
            "starting simulation"
        );
        let started = Instant::now();
        let mut seeds = StdRng::seed_from_u64(self.seed);
        // Routing draws from its own stream so it only depends on the seed.
        let arrivals_rng = StdRng::seed_from_u64(seeds.gen());

        let mut stations = Vec::with_capacity(self.config.stations.len());
        let mut intakes = Vec::with_capacity(self.config.stations.len());
        for station in &self.config.stations {
            let (stage, intake) =
                ServiceStage::new(&station.name, station.count, station.serve_range(), cars);
            stations.push(Arc::new(stage));
            intakes.push(intake);
        }
        let registers = &self.config.registers;
        let (register, register_intake) = ServiceStage::new(
            REGISTER_STAGE,
            registers.count,
            registers.handle_range(),
            cars,
        );
        let register = Arc::new(register);

        let mut coordinator = Coordinator::new();
        for stage in stations.iter().chain(std::iter::once(&register)) {
            spawn_servers(&mut coordinator, stage, &mut seeds)?;
        }

        let generator = ArrivalGenerator::new(
            &self.config.cars,
            intakes,
            register_intake,
            build_router(self.config.routing),
            arrivals_rng,
        );
        let arrivals = thread::Builder::new()
            .name("arrivals".to_string())
            .spawn(move || generator.run())
            .map_err(|err| Error::Spawn {
                name: "arrivals".to_string(),
                reason: err.to_string(),
            })?;

        let generated = arrivals.join();
        coordinator.wait()?;
        let routed = generated.map_err(|_| Error::WorkerPanicked("arrivals".to_string()))??;

        let stations: Vec<StageSummary> = stations.iter().map(|stage| summarize(stage)).collect();
        let register = summarize(&register);
        let elapsed = started.elapsed();
        info!(
            elapsed_ms = elapsed.as_millis() as u64,
            routed = ?routed,
            register_served = register.stats.served,
            "simulation finished"
        );

        Ok(SimulationResult {
            metadata: RunMetadata {
                seed: self.seed,
                routing: self.config.routing,
                cars,
                elapsed,
            },
            stations,
            register,
        })
    }
}

pub fn run_simulation(config: &SimConfig) -> Result<SimulationResult> {
    SimulationEngine::new(config.clone()).run()
}

fn spawn_servers(
    coordinator: &mut Coordinator,
    stage: &Arc<ServiceStage>,
    seeds: &mut StdRng,
) -> Result<()> {
    for server_id in 0..stage.servers() {
        let worker = Arc::clone(stage);
        let mut rng = StdRng::seed_from_u64(seeds.gen());
        coordinator.spawn(format!("{}-{}", stage.name(), server_id), move || {
            worker.run(server_id, &mut rng)
        })?;
    }
    info!(stage = stage.name(), servers = stage.servers(), "stage started");
    Ok(())
}

fn summarize(stage: &ServiceStage) -> StageSummary {
    StageSummary {
        name: stage.name().to_string(),
        servers: stage.servers(),
        stats: stage.stats(),
    }
}
