use crate::routing::{RoutingContext, StationRouter};

#[derive(Default)]
pub struct RoundRobinRouter {
    next_idx: usize,
}

impl StationRouter for RoundRobinRouter {
    fn route(&mut self, ctx: &mut RoutingContext) -> usize {
        let idx = self.next_idx % ctx.stations;
        self.next_idx = (self.next_idx + 1) % ctx.stations;
        idx
    }
}
