//! Convenience builder wiring a generator straight into playback.

use std::time::Duration;

use crate::error::TraceError;
use crate::playback::PlaybackController;
use crate::traits::TraceGenerator;
use crate::TraceEngine;

/// Builds a [`PlaybackController`] from a problem instance in one go.
///
/// ```
/// use std::time::Duration;
/// use steptrace::problems::queue_sim::{QueueOp, QueueSim};
/// use steptrace::SessionBuilder;
///
/// let sim = QueueSim::new(vec![QueueOp::Enqueue(1), QueueOp::Dequeue]);
/// let controller = SessionBuilder::new(sim)
///     .with_speed(Duration::from_millis(250))
///     .build()
///     .unwrap();
/// assert_eq!(controller.trace().len(), 3);
/// ```
pub struct SessionBuilder<G: TraceGenerator> {
    generator: G,
    speed: Option<Duration>,
}

impl<G: TraceGenerator> SessionBuilder<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            speed: None,
        }
    }

    /// Initial auto-advance interval for the controller.
    pub fn with_speed(mut self, interval: Duration) -> Self {
        self.speed = Some(interval);
        self
    }

    /// Validate, generate the trace, and wrap it in an idle controller.
    pub fn build(self) -> Result<PlaybackController<G::Snapshot>, TraceError> {
        let trace = TraceEngine::new(self.generator).run()?;
        let mut controller = PlaybackController::new(trace);
        if let Some(interval) = self.speed {
            controller.set_speed(interval);
        }
        Ok(controller)
    }
}
