//! Sudoku puzzle engine.
//!
//! Three pieces, all pure computation over in-memory grids:
//!
//! - [`Solver`]: exhaustive backtracking search, solution counting, and hints
//! - [`Generator`]: builds a `(puzzle, solution)` pair for a difficulty by
//!   removing cells while the puzzle keeps a unique solution
//! - validation: per-move and whole-grid constraint checks on [`Grid`]
//!
//! Nothing in this crate performs I/O; callers own persistence and
//! presentation.

mod generator;
mod grid;
mod rng;
mod solver;
mod validator;

pub use generator::{GeneratedPuzzle, Generator};
pub use grid::{Difficulty, Grid, Position};
pub use solver::{Hint, HintKind, Solver};
pub use validator::ValidationReport;
