use rand::Rng;

use crate::routing::{RoutingContext, StationRouter};

/// Uniform choice among the configured station types.
#[derive(Default)]
pub struct UniformRouter;

impl StationRouter for UniformRouter {
    fn route(&mut self, ctx: &mut RoutingContext) -> usize {
        ctx.rng.gen_range(0..ctx.stations)
    }
}
