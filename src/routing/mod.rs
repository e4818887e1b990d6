mod round_robin;
mod uniform;

use rand::RngCore;

use crate::models::RoutingConfig;

pub use round_robin::RoundRobinRouter;
pub use uniform::UniformRouter;

/// Picks the station stage an arriving car is sent to.
pub trait StationRouter: Send {
    fn route(&mut self, ctx: &mut RoutingContext) -> usize;
}

pub struct RoutingContext<'a> {
    /// Number of configured station types; always at least one.
    pub stations: usize,
    pub rng: &'a mut dyn RngCore,
}

pub fn build_router(routing: RoutingConfig) -> Box<dyn StationRouter> {
    match routing {
        RoutingConfig::Uniform => Box::new(UniformRouter),
        RoutingConfig::RoundRobin => Box::new(RoundRobinRouter::default()),
    }
}
