//! The turtle engine.
//!
//! A [`Turtle`] owns its grid, position, heading and the remaining
//! [`Program`]. Each call to [`Turtle::step`] executes the head instruction
//! and removes it, so the program shrinks by one per successful step until the
//! terminating `End` has been consumed.
//!
//! Behaviors:
//! - The grid starts all clear and never changes size.
//! - The heading starts `East`.
//! - The position is always inside the grid. A forward move that would leave
//!   the grid fails with [`TurtleError::OutOfBounds`] before anything is
//!   committed.
//! - Stepping after the program is used up is an internal inconsistency, not a
//!   silent no-op.
//!
//! ```
//! use rust_turtle::{parse, Coord, Turtle};
//!
//! let program = parse("E_FWD E_SET").unwrap();
//! let mut turtle = Turtle::new(Coord::new(3, 3), Coord::new(0, 0), program).unwrap();
//! while !turtle.is_finished() {
//!     turtle.step().unwrap();
//! }
//! assert_eq!(turtle.cell(Coord::new(1, 0)), Some(true));
//! ```

use std::fmt;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::error::TurtleError;
use crate::geometry::{Coord, Direction};
use crate::grid::Grid;
use crate::instruction::{Instruction, Program};

/// Controls for cooperative cancellation and step limiting.
#[derive(Clone)]
pub struct StepControl {
    pub max_steps: Option<usize>,
    pub cancel_flag: Arc<AtomicBool>,
}

impl StepControl {
    pub fn new(max_steps: Option<usize>, cancel_flag: Arc<AtomicBool>) -> Self {
        Self { max_steps, cancel_flag }
    }
}

/// The state change produced by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Turned { from: Direction, to: Direction },
    Moved { from: Coord, to: Coord },
    Marked(Coord),
    Cleared(Coord),
    Halted,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Turned { from, to } => write!(f, "Turned from {from} to {to}"),
            Effect::Moved { from, to } => write!(f, "Moved from {from} to {to}"),
            Effect::Marked(at) => write!(f, "Marked cell {at}"),
            Effect::Cleared(at) => write!(f, "Cleared cell {at}"),
            Effect::Halted => write!(f, "Reached end of program"),
        }
    }
}

/// What a successful step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRecord {
    /// Zero-based index of this step.
    pub index: usize,
    pub instruction: Instruction,
    pub effect: Effect,
}

/// A turtle walking over a fixed boolean grid.
pub struct Turtle {
    origin: Coord,
    pos: Coord,
    heading: Direction,
    grid: Grid,
    program: Program,
    steps: usize,
}

impl Turtle {
    /// Create a turtle at `start` on an all-clear grid of size `dims`.
    ///
    /// Fails with [`TurtleError::InvalidConfiguration`] when a dimension is not
    /// positive or `start` lies outside the grid, and with
    /// [`TurtleError::GridTooLarge`] when the grid cannot be allocated.
    pub fn new(dims: Coord, start: Coord, program: Program) -> Result<Self, TurtleError> {
        if dims.min_component() <= 0 || !start.in_bounds(dims) {
            return Err(TurtleError::InvalidConfiguration { dims, start });
        }

        Ok(Self {
            origin: start,
            pos: start,
            heading: Direction::default(),
            grid: Grid::new(dims)?,
            program,
            steps: 0,
        })
    }

    /// Execute the head instruction and remove it from the program.
    pub fn step(&mut self) -> Result<StepRecord, TurtleError> {
        let Some(instruction) = self.program.peek() else {
            tracing::warn!(steps = self.steps, "step on exhausted turtle");
            return Err(TurtleError::InternalInconsistency {
                reason: "step called on an exhausted turtle",
            });
        };
        tracing::debug!(instr = instruction.mnemonic(), pos = %self.pos, heading = %self.heading, "turtle current instruction");

        let effect = match instruction {
            Instruction::RotateRight => {
                let from = self.heading;
                self.heading = from.rotate_right();
                Effect::Turned { from, to: self.heading }
            }
            Instruction::RotateLeft => {
                let from = self.heading;
                self.heading = from.rotate_left();
                Effect::Turned { from, to: self.heading }
            }
            Instruction::MoveForward => {
                let from = self.pos;
                let target = from.shift(self.heading, 1);
                if !target.in_bounds(self.grid.dimensions()) {
                    tracing::warn!(from = %from, target = %target, "move would leave the grid");
                    return Err(TurtleError::OutOfBounds {
                        from,
                        heading: self.heading,
                        target,
                    });
                }
                self.pos = target;
                Effect::Moved { from, to: target }
            }
            Instruction::SetCell => {
                self.grid.set(self.pos, true)?;
                Effect::Marked(self.pos)
            }
            Instruction::ClearCell => {
                self.grid.set(self.pos, false)?;
                Effect::Cleared(self.pos)
            }
            Instruction::End => Effect::Halted,
            Instruction::Error => {
                return Err(TurtleError::InternalInconsistency {
                    reason: "unreachable instruction kind",
                });
            }
        };

        self.program.take_first();
        let record = StepRecord {
            index: self.steps,
            instruction,
            effect,
        };
        self.steps += 1;
        Ok(record)
    }

    /// Step until the program is used up, calling `on_step` after every
    /// successful step. Returns the number of steps executed.
    pub fn run<F>(&mut self, control: Option<&StepControl>, mut on_step: F) -> Result<usize, TurtleError>
    where
        F: FnMut(&Turtle, &StepRecord),
    {
        let mut executed = 0;
        while !self.is_finished() {
            if let Some(ctrl) = control {
                if ctrl.cancel_flag.load(Ordering::Relaxed) {
                    return Err(TurtleError::Canceled);
                }
                if let Some(max) = ctrl.max_steps {
                    if executed >= max {
                        return Err(TurtleError::StepLimitExceeded { limit: max });
                    }
                }
            }

            let record = self.step()?;
            on_step(self, &record);
            executed += 1;
        }
        Ok(executed)
    }

    pub fn position(&self) -> Coord {
        self.pos
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn dimensions(&self) -> Coord {
        self.grid.dimensions()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell state at `at`, or `None` outside the grid.
    pub fn cell(&self, at: Coord) -> Option<bool> {
        self.grid.get(at)
    }

    /// The instruction the next step will execute.
    pub fn peek(&self) -> Option<Instruction> {
        self.program.peek()
    }

    pub fn remaining(&self) -> usize {
        self.program.len()
    }

    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// True when nothing executable remains: the program is empty or holds only `End`.
    pub fn is_exhausted(&self) -> bool {
        match self.program.len() {
            0 => true,
            1 => self.program.peek() == Some(Instruction::End),
            _ => false,
        }
    }

    /// True once the terminating `End` has been consumed.
    pub fn is_finished(&self) -> bool {
        self.program.is_empty()
    }
}
