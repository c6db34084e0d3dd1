//! Error taxonomy for trace generation.
//!
//! Everything here is rejected by [`validate`](crate::traits::TraceGenerator::validate)
//! before the first step is recorded, so a caller either receives a complete
//! trace or an error, never a partial sequence. Structural infeasibility
//! (a disconnected graph) and idempotent no-ops (duplicate inserts, rejected
//! edges, empty-queue dequeues) are deliberately *not* errors; they surface as
//! distinctly tagged steps instead.

use thiserror::Error;

/// A problem instance failed validation before generation began.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// A start, target or endpoint label does not name a vertex of the graph.
    #[error("unknown vertex `{vertex}`")]
    UnknownVertex { vertex: String },

    /// The same vertex label was supplied twice.
    #[error("duplicate vertex `{vertex}`")]
    DuplicateVertex { vertex: String },

    /// A query range does not fit the underlying array.
    #[error("query range [{start}, {end}] is invalid for length {len}")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },

    /// An edge carries a negative weight.
    ///
    /// Frontier-expansion generators assume non-negative weights; rather than
    /// producing an undefined trace, the instance is rejected up front.
    #[error("edge {from}-{to} has negative weight {weight}")]
    NegativeWeight {
        from: String,
        to: String,
        weight: i64,
    },

    /// An input collection that must be non-empty was empty.
    #[error("empty input: {what}")]
    EmptyInput { what: &'static str },
}

#[cfg(test)]
mod tests {
    use super::TraceError;

    #[test]
    fn display_names_the_offender() {
        let err = TraceError::UnknownVertex {
            vertex: "Z".into(),
        };
        assert_eq!(err.to_string(), "unknown vertex `Z`");

        let err = TraceError::NegativeWeight {
            from: "A".into(),
            to: "B".into(),
            weight: -3,
        };
        assert_eq!(err.to_string(), "edge A-B has negative weight -3");
    }
}
