//! Generic trace engine.
//!
//! The engine drives the two-phase generation sequence for any
//! [`TraceGenerator`]: validate the instance, then eagerly record the full
//! step sequence. Generation is synchronous and single-threaded; a caller
//! either receives the complete [`Trace`] or a [`TraceError`], never a
//! partial sequence.

use tracing::debug;

use crate::error::TraceError;
use crate::step::Trace;
use crate::traits::{Recorder, TraceGenerator};

/// Trace engine for a given problem instance `G`.
///
/// Typical usage:
/// ```
/// use steptrace::problems::heap_sort::HeapSort;
/// use steptrace::{StepKind, TraceEngine};
///
/// let engine = TraceEngine::new(HeapSort::new(vec![5, 2, 9, 1]));
/// let trace = engine.run().unwrap();
/// assert_eq!(trace.outcome(), Some(StepKind::Complete));
/// ```
pub struct TraceEngine<G: TraceGenerator> {
    generator: G,
}

impl<G: TraceGenerator> TraceEngine<G> {
    /// Create an engine around a problem instance.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Expose immutable reference to the underlying instance.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Validate the instance, then eagerly generate the full step sequence.
    ///
    /// # Errors
    /// Propagates whatever [`TraceGenerator::validate`] rejects; in that case
    /// no step has been recorded.
    pub fn run(&self) -> Result<Trace<G::Snapshot>, TraceError> {
        self.generator.validate()?;
        let mut rec = Recorder::new();
        self.generator.record(&mut rec);
        let trace = rec.finish();
        debug!(
            algorithm = self.generator.name(),
            steps = trace.len(),
            "trace generated"
        );
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;

    struct Countdown {
        from: u8,
    }

    impl TraceGenerator for Countdown {
        type Snapshot = u8;

        fn name(&self) -> &'static str {
            "countdown"
        }

        fn validate(&self) -> Result<(), TraceError> {
            if self.from == 0 {
                return Err(TraceError::EmptyInput { what: "countdown" });
            }
            Ok(())
        }

        fn record(&self, rec: &mut Recorder<u8>) {
            for v in (1..=self.from).rev() {
                rec.push(StepKind::Visit, v, format!("at {v}"));
            }
            rec.push(StepKind::Complete, 0, "lift-off");
        }
    }

    #[test]
    fn runs_validate_then_record() {
        let trace = TraceEngine::new(Countdown { from: 3 }).run().unwrap();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.outcome(), Some(StepKind::Complete));
        assert_eq!(trace.get(0).unwrap().snapshot, 3);
    }

    #[test]
    fn validation_failure_yields_no_steps() {
        let err = TraceEngine::new(Countdown { from: 0 }).run().unwrap_err();
        assert_eq!(err, TraceError::EmptyInput { what: "countdown" });
    }
}
