//! The encode, solve, decode and validate pipeline.

use crate::encoder::{ConstraintSet, Encoder, SolveOptions};
use crate::engine::{SatEngine, SolverFailure, Verdict, VarisatEngine};
use crate::grid::Grid;
use crate::solution::Solution;
use crate::validate::Violation;

/// Reasons a solve may fail. A puzzle with no solution is not a failure; see [`Outcome::Unsatisfiable`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SolveError {
    /// The SAT engine failed for a reason other than unsatisfiability.
    #[error(transparent)]
    Solver(#[from] SolverFailure),
    /// The engine's model breaks a puzzle rule, meaning the clauses do not say what the rules say.
    #[error("constraint encoding disagrees with the puzzle rules: {0}")]
    EncoderMismatch(Violation),
}

/// The result of a solve which ran to completion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// A placement satisfying every rule.
    Solved(Solution),
    /// No placement satisfies every rule.
    Unsatisfiable,
}

impl Outcome {
    /// Whether a solution was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    /// The solution, if there is one.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            Self::Unsatisfiable => None,
        }
    }
}

/// Hand `constraints` to `engine` once and report its verdict.
///
/// All `var_count` variables are registered before any clause is added. No retries are made.
pub fn submit<E: SatEngine>(engine: &mut E, constraints: &ConstraintSet) -> Result<Verdict, SolverFailure> {
    for expected in 0..constraints.var_count() {
        let var = engine.add_var();
        if var.index() != expected {
            return Err(SolverFailure::Fault(format!("engine numbered variable {expected} as {}", var.index())));
        }
    }

    for clause in constraints.formula().iter() {
        engine.add_clause(clause);
    }

    let verdict = engine.solve()?;
    if let Verdict::Satisfiable(model) = &verdict {
        if model.len() < constraints.var_count() {
            return Err(SolverFailure::IncompleteModel { variable: model.len() });
        }
    }

    Ok(verdict)
}

/// Runs the whole pipeline on one grid: encode, solve, decode, validate.
/// Use [`Self::solve`] for the default engine or [`Self::solve_using`] to supply one.
pub struct GridSolver<'a> {
    grid: &'a Grid,
    options: SolveOptions,
}

impl<'a> From<&'a Grid> for GridSolver<'a> {
    fn from(grid: &'a Grid) -> Self {
        Self { grid, options: SolveOptions::default() }
    }
}

impl GridSolver<'_> {
    /// Replace the options used for this solve.
    pub fn with_options(mut self, options: SolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Encode the grid without solving it.
    pub fn encode(&self) -> ConstraintSet {
        Encoder::new(self.grid, self.options).encode()
    }

    /// Solve with a fresh [`VarisatEngine`].
    pub fn solve(&self) -> Result<Outcome, SolveError> {
        self.solve_using(VarisatEngine::new())
    }

    /// Solve with `engine`, which is consumed; every puzzle gets its own engine.
    pub fn solve_using<E: SatEngine>(&self, mut engine: E) -> Result<Outcome, SolveError> {
        let constraints = self.encode();

        let model = match submit(&mut engine, &constraints)? {
            Verdict::Unsatisfiable => {
                log::debug!("no assignment satisfies {} clauses", constraints.len());
                return Ok(Outcome::Unsatisfiable);
            }
            Verdict::Satisfiable(model) => model,
        };

        let solution = Solution::decode(self.grid, constraints.variables(), &model)?;
        if let Err(violation) = solution.validate() {
            log::error!("model rejected by validation: {violation}");
            return Err(SolveError::EncoderMismatch(violation));
        }

        log::debug!("solved with {} lights", solution.lights().len());
        Ok(Outcome::Solved(solution))
    }
}

impl Grid {
    /// Solve this grid with default options, deferring to a [`GridSolver`].
    pub fn solve(&self) -> Result<Outcome, SolveError> {
        GridSolver::from(self).solve()
    }
}
