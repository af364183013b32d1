#![warn(missing_docs)]

//! # `lightup`
//!
//! A solver for [Light Up](https://en.wikipedia.org/wiki/Light_Up_(puzzle)), also known as Akari.
//! Begin by building a [`Grid`], either from numeric codes with [`Grid::from_rows`], from text with [`PuzzleFile`],
//! or cell by cell with a [`GridBuilder`]. Then call [`solve()`](crate::Grid::solve), yielding an [`Outcome`].
//!
//! A grid holds white cells and black cells; some black cells carry a number from 0 to 4.
//! Lights go on white cells such that
//! 1. every white cell is lit, by a light on it or by one in the same row or column with no black cell in between,
//! 2. every numbered cell has exactly that many lights among its four neighbours,
//! 3. no light shines on another.
//!
//! # Internals
//! This crate is driven by expressing the problem as a Boolean satisfiability problem (a "SAT"), extracting a model from that solver,
//! and re-expressing the board accordingly.
//!
//! Every white cell C gets one variable, true when C holds a light. Call a maximal run of white cells along a row or column a corridor.
//! We make the following assertions in SAT form:
//! 1. For every C, at least one variable of the two corridors through C is true.
//! 2. For every numbered cell with number N, exactly N of its white neighbours are true. Black and off-grid neighbours do not take part.
//! 3. Every corridor has at most one true variable.
//!
//! Assertion 1 is repeated through one indicator variable per corridor, which keeps the search fast on large open grids.
//!
//! The model is then decoded and checked against the rules once more by code which never looks at the clauses,
//! so a wrong clause surfaces as [`SolveError::EncoderMismatch`] rather than as a wrong answer.
//! The engine sits behind the [`SatEngine`](engine::SatEngine) trait; [`varisat`] is the default,
//! and [`BruteForceEngine`](engine::BruteForceEngine) serves as a reference for tiny puzzles.

pub use builder::{BuilderInvalidReason, GridBuilder};
pub use cell::CellKind;
pub use encoder::{AtMostOne, SolveOptions};
pub use grid::{Corridors, Grid, GridError, MalformedReason};
pub use location::Location;
pub use puzzle::PuzzleFile;
pub use solution::{Beams, Solution};
pub use solver::{GridSolver, Outcome, SolveError};
pub use step::SquareStep;
pub use validate::{Violation, VisiblePair};

pub mod builder;
pub(crate) mod cell;
pub mod encoder;
pub mod engine;
pub(crate) mod grid;
pub(crate) mod location;
pub(crate) mod logic;
pub mod puzzle;
pub(crate) mod solution;
pub mod solver;
pub(crate) mod step;
mod tests;
pub(crate) mod validate;
