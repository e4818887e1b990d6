use rand::rngs::StdRng;
use std::thread;
use std::time::Instant;
use tracing::debug;

use crate::error::Result;
use crate::models::{CarConfig, DurationRange};
use crate::routing::{RoutingContext, StationRouter};
use crate::stage::{Intake, Token};

#[derive(Clone, Copy, Debug)]
pub struct Car {
    pub id: u64,
    pub arrived_at: Instant,
}

impl Car {
    fn arrive(id: u64) -> Self {
        Self {
            id,
            arrived_at: Instant::now(),
        }
    }

    fn token(&self) -> Token {
        Token {
            enqueued_at: self.arrived_at,
        }
    }
}

/// Sole producer for every stage. Each car goes to one station and to the
/// register at the same moment.
pub struct ArrivalGenerator {
    count: usize,
    interval: DurationRange,
    stations: Vec<Intake>,
    register: Intake,
    router: Box<dyn StationRouter>,
    rng: StdRng,
}

impl ArrivalGenerator {
    pub fn new(
        cars: &CarConfig,
        stations: Vec<Intake>,
        register: Intake,
        router: Box<dyn StationRouter>,
        rng: StdRng,
    ) -> Self {
        Self {
            count: cars.count,
            interval: cars.arrival_range(),
            stations,
            register,
            router,
            rng,
        }
    }

    /// Generates every car, then closes all intakes, including stations that
    /// received nothing. Intakes are closed on failure too. Returns how many
    /// cars went to each station, in configuration order.
    pub fn run(mut self) -> Result<Vec<u64>> {
        let mut routed = vec![0u64; self.stations.len()];
        let outcome = self.generate(&mut routed);
        self.close();
        outcome.map(|()| routed)
    }

    fn generate(&mut self, routed: &mut [u64]) -> Result<()> {
        for seq in 0..self.count {
            thread::sleep(self.interval.sample(&mut self.rng));
            let car = Car::arrive(seq as u64 + 1);

            let mut ctx = RoutingContext {
                stations: self.stations.len(),
                rng: &mut self.rng,
            };
            let idx = self.router.route(&mut ctx);
            let station = &self.stations[idx];
            station.submit(car.token())?;
            self.register.submit(car.token())?;
            routed[idx] += 1;

            debug!(car = car.id, station = station.stage(), "car arrived");
        }
        Ok(())
    }

    fn close(self) {
        for intake in self.stations {
            intake.close();
        }
        self.register.close();
    }
}
