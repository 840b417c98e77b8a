use std::path::PathBuf;

use crate::geometry::{Coord, Direction};

/// Errors that can occur while parsing or interpreting turtle programs.
#[derive(Debug, thiserror::Error)]
pub enum TurtleError {
    /// Encountered a token outside the keyword set, or a trailing fragment too
    /// short to be any keyword.
    #[error("Parse error: unrecognized instruction '{snippet}' at offset {offset}")]
    Parse { offset: usize, snippet: String },

    /// Non-positive grid dimensions or a start position outside the grid.
    #[error("Invalid configuration: {}", configuration_problem(.dims, .start))]
    InvalidConfiguration { dims: Coord, start: Coord },

    /// The grid's cell count overflows or cannot be allocated.
    #[error("Invalid configuration: a {dims} grid is too large to allocate")]
    GridTooLarge { dims: Coord },

    /// A forward move would leave the grid.
    #[error("Out of bounds: moving {heading} from {from} would reach {target}")]
    OutOfBounds {
        from: Coord,
        heading: Direction,
        target: Coord,
    },

    /// The engine reached a state a correctly parsed program never produces.
    #[error("Internal inconsistency: {reason}")]
    InternalInconsistency { reason: &'static str },

    /// Execution aborted due to step limit.
    #[error("Execution aborted: step limit exceeded ({limit})")]
    StepLimitExceeded { limit: usize },

    /// Execution aborted due to cooperative cancellation (e.g., Ctrl-C).
    #[error("Execution aborted: cancelled")]
    Canceled,

    /// Reading an instruction file failed.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn configuration_problem(dims: &Coord, start: &Coord) -> String {
    if dims.min_component() <= 0 {
        format!("grid dimensions {dims} must both be positive")
    } else {
        format!("start {start} is not inside a {dims} grid")
    }
}
