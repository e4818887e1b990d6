use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use rand::Rng;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::models::DurationRange;

/// One unit of work for a stage. It only remembers when it was queued.
#[derive(Clone, Copy, Debug)]
pub struct Token {
    pub enqueued_at: Instant,
}

impl Token {
    pub fn now() -> Self {
        Self {
            enqueued_at: Instant::now(),
        }
    }
}

/// Producer half of a stage's queue. Dropping it (or calling [`Intake::close`])
/// lets the stage's servers drain and exit.
#[derive(Debug)]
pub struct Intake {
    stage: String,
    sender: Sender<Token>,
}

impl Intake {
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Never blocks. A full queue means the capacity was sized below the
    /// arrival count and is reported instead of waiting.
    pub fn submit(&self, token: Token) -> Result<()> {
        self.sender.try_send(token).map_err(|err| match err {
            TrySendError::Full(_) => Error::IntakeFull(self.stage.clone()),
            TrySendError::Disconnected(_) => Error::IntakeClosed(self.stage.clone()),
        })
    }

    pub fn close(self) {
        trace!(stage = %self.stage, pending = self.sender.len(), "intake closed");
    }
}

/// Counters for one stage, copied out by [`ServiceStage::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageStats {
    pub served: u64,
    /// Sum of sampled service durations.
    pub total_time: Duration,
    /// Longest dequeue-to-completion time seen by any server.
    pub max_wait: Duration,
    pub total_queue_delay: Duration,
    pub max_queue_delay: Duration,
}

impl StageStats {
    pub fn average_wait(&self) -> Duration {
        average(self.total_time, self.served)
    }

    pub fn average_queue_delay(&self) -> Duration {
        average(self.total_queue_delay, self.served)
    }
}

fn average(total: Duration, count: u64) -> Duration {
    if count == 0 {
        return Duration::ZERO;
    }
    Duration::from_nanos((total.as_nanos() / u128::from(count)) as u64)
}

#[derive(Debug, Default)]
pub struct StatsCollector {
    inner: Mutex<StageStats>,
}

impl StatsCollector {
    pub fn record(&self, service: Duration, elapsed: Duration, queue_delay: Duration) {
        let mut stats = self.inner.lock();
        stats.served += 1;
        stats.total_time += service;
        stats.max_wait = stats.max_wait.max(elapsed);
        stats.total_queue_delay += queue_delay;
        stats.max_queue_delay = stats.max_queue_delay.max(queue_delay);
    }

    pub fn snapshot(&self) -> StageStats {
        *self.inner.lock()
    }
}

/// A pool of servers fed by one bounded queue.
#[derive(Debug)]
pub struct ServiceStage {
    name: String,
    servers: usize,
    service: DurationRange,
    receiver: Receiver<Token>,
    stats: StatsCollector,
}

impl ServiceStage {
    /// `capacity` should be at least the number of arrivals so that
    /// [`Intake::submit`] never fails.
    pub fn new(
        name: impl Into<String>,
        servers: usize,
        service: DurationRange,
        capacity: usize,
    ) -> (Self, Intake) {
        let name = name.into();
        // bounded(0) is a rendezvous channel
        let (sender, receiver) = channel::bounded(capacity.max(1));
        let stage = Self {
            name: name.clone(),
            servers,
            service,
            receiver,
            stats: StatsCollector::default(),
        };
        (stage, Intake { stage: name, sender })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn servers(&self) -> usize {
        self.servers
    }

    pub fn service_range(&self) -> DurationRange {
        self.service
    }

    /// Worker loop for one server. Returns once the intake is closed and
    /// the queue is empty.
    pub fn run<R: Rng + ?Sized>(&self, server_id: usize, rng: &mut R) {
        for token in self.receiver.iter() {
            let start = Instant::now();
            let queue_delay = start.saturating_duration_since(token.enqueued_at);
            let service = self.service.sample(rng);
            thread::sleep(service);
            let elapsed = start.elapsed();
            self.stats.record(service, elapsed, queue_delay);
            debug!(
                stage = %self.name,
                server_id,
                service_us = service.as_micros() as u64,
                queue_delay_us = queue_delay.as_micros() as u64,
                "served car"
            );
        }
        trace!(stage = %self.name, server_id, "server exiting");
    }

    /// Only meaningful once every server of this stage has returned from
    /// [`ServiceStage::run`].
    pub fn stats(&self) -> StageStats {
        self.stats.snapshot()
    }
}
