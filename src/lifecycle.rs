use std::thread::{self, JoinHandle};
use tracing::trace;

use crate::error::{Error, Result};

/// Tracks every server thread across all stages and blocks until the last
/// one has exited.
pub struct Coordinator {
    handles: Vec<(String, JoinHandle<()>)>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    pub fn spawn<F>(&mut self, name: String, work: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(work)
            .map_err(|err| Error::Spawn {
                name: name.clone(),
                reason: err.to_string(),
            })?;
        self.handles.push((name, handle));
        Ok(())
    }

    pub fn tracked(&self) -> usize {
        self.handles.len()
    }

    /// Blocks until every tracked worker has finished. A worker that panicked
    /// is reported after all of them are done.
    pub fn wait(self) -> Result<()> {
        trace!(workers = self.handles.len(), "waiting for workers");
        let mut panicked = None;
        for (name, handle) in self.handles {
            if handle.join().is_err() && panicked.is_none() {
                panicked = Some(name);
            }
        }
        match panicked {
            Some(name) => Err(Error::WorkerPanicked(name)),
            None => Ok(()),
        }
    }
}
