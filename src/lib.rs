//! A tiny grid-turtle interpreter library.
//!
//! Programs are flat sequences of 5-character keywords that steer a turtle
//! over a fixed-size boolean grid:
//!
//! | keyword | effect                               |
//! |---------|--------------------------------------|
//! | `E_ROR` | turn clockwise                       |
//! | `E_ROL` | turn counter-clockwise               |
//! | `E_FWD` | move one cell forward                |
//! | `E_SET` | mark the cell under the turtle       |
//! | `E_CLR` | clear the cell under the turtle      |
//!
//! The end of the text adds an implicit terminating instruction. There are no
//! loops, jumps or variables.
//!
//! Features and behaviors:
//! - Grid initialized to all clear; the turtle starts facing east.
//! - Strict bounds: moving off the grid returns an error and leaves the
//!   turtle where it was.
//! - Strict fixed-width tokens: any 5-character window that is not a keyword
//!   is a parse error.
//! - One instruction per [`Turtle::step`], so a driver can animate the grid
//!   at whatever cadence it likes.
//!
//! Quick start:
//!
//! ```
//! use rust_turtle::{parse, Coord, Direction, Turtle};
//!
//! let program = parse("E_FWD E_SET E_ROR E_FWD").unwrap();
//! let mut turtle = Turtle::new(Coord::new(3, 3), Coord::new(1, 1), program).unwrap();
//! turtle.run(None, |_, _| {}).unwrap();
//! assert_eq!(turtle.position(), Coord::new(2, 2));
//! assert_eq!(turtle.heading(), Direction::South);
//! assert_eq!(turtle.cell(Coord::new(2, 1)), Some(true));
//! ```

pub mod cli_util;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod instruction;
pub mod parser;
pub mod render;
pub mod theme;
pub mod tui;

use std::sync::Once;

pub use engine::{Effect, StepControl, StepRecord, Turtle};
pub use error::TurtleError;
pub use geometry::{Coord, Direction};
pub use grid::Grid;
pub use instruction::{Instruction, Program};
pub use parser::{parse, parse_file, read_source};

static TRACING_INIT: Once = Once::new();

/// Install a stderr tracing subscriber when `RUST_LOG` is set.
///
/// Safe to call multiple times. Enable with `RUST_LOG=rust_turtle=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
