//! The interface to SAT engines, and the engines shipped with this crate.

use varisat::{ExtendFormula, Lit, Solver, Var};

/// Reasons an engine may fail. Unsatisfiability is not among them; see [`Verdict::Unsatisfiable`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SolverFailure {
    /// The engine itself gave up, e.g. on resource exhaustion or an internal fault.
    #[error("SAT engine fault: {0}")]
    Fault(String),
    /// The engine claimed satisfiability but did not assign this variable.
    /// This should probably never happen.
    #[error("SAT engine returned no value for variable {variable}")]
    IncompleteModel {
        /// Index of the missing variable.
        variable: usize,
    },
    /// The brute-force engine was handed more variables than it is willing to enumerate.
    #[error("{count} variables exceed the brute-force limit of {limit}")]
    TooManyVariables {
        /// Variables registered.
        count: usize,
        /// [`BruteForceEngine::MAX_VARS`].
        limit: usize,
    },
}

/// The definitive answer of a finished solve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Verdict {
    /// A complete assignment, indexed by variable.
    Satisfiable(Vec<bool>),
    /// No assignment satisfies the clauses.
    Unsatisfiable,
}

/// The three capabilities this crate needs from a SAT engine.
pub trait SatEngine {
    /// Register a fresh variable. Variables are numbered from 0 in registration order.
    fn add_var(&mut self) -> Var;
    /// Add a clause over registered variables.
    fn add_clause(&mut self, clause: &[Lit]);
    /// Run the search to completion.
    fn solve(&mut self) -> Result<Verdict, SolverFailure>;
}

/// [`SatEngine`] backed by [`varisat`].
pub struct VarisatEngine {
    solver: Solver<'static>,
    var_count: usize,
}

impl VarisatEngine {
    /// A fresh engine with no variables or clauses.
    pub fn new() -> Self {
        Self { solver: Solver::new(), var_count: 0 }
    }
}

impl Default for VarisatEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SatEngine for VarisatEngine {
    fn add_var(&mut self) -> Var {
        self.var_count += 1;
        self.solver.new_var()
    }

    fn add_clause(&mut self, clause: &[Lit]) {
        self.solver.add_clause(clause);
    }

    fn solve(&mut self) -> Result<Verdict, SolverFailure> {
        if !self.solver.solve().map_err(|err| SolverFailure::Fault(err.to_string()))? {
            return Ok(Verdict::Unsatisfiable);
        }

        let model = self.solver.model()
            .ok_or_else(|| SolverFailure::Fault("satisfiable, but no model available".to_string()))?;

        let mut assignment = vec![None; self.var_count];
        for lit in model {
            if let Some(slot) = assignment.get_mut(lit.var().index()) {
                *slot = Some(lit.is_positive());
            }
        }

        assignment.into_iter()
            .enumerate()
            .map(|(variable, value)| value.ok_or(SolverFailure::IncompleteModel { variable }))
            .collect::<Result<Vec<_>, _>>()
            .map(Verdict::Satisfiable)
    }
}

/// A [`SatEngine`] which tries every assignment. Only useful for tiny formulas, mostly as a reference in tests.
#[derive(Clone, Debug, Default)]
pub struct BruteForceEngine {
    var_count: usize,
    clauses: Vec<Vec<Lit>>,
}

impl BruteForceEngine {
    /// The most variables [`Self::solve`](SatEngine::solve) will enumerate.
    pub const MAX_VARS: usize = 22;

    /// A fresh engine with no variables or clauses.
    pub fn new() -> Self {
        Self::default()
    }

    fn satisfies(&self, bits: u64) -> bool {
        self.clauses.iter().all(|clause| {
            clause.iter().any(|lit| {
                let value = u32::try_from(lit.var().index()).ok()
                    .and_then(|shift| bits.checked_shr(shift))
                    .is_some_and(|shifted| shifted & 1 == 1);
                value == lit.is_positive()
            })
        })
    }
}

impl SatEngine for BruteForceEngine {
    fn add_var(&mut self) -> Var {
        self.var_count += 1;
        Var::from_index(self.var_count - 1)
    }

    fn add_clause(&mut self, clause: &[Lit]) {
        self.clauses.push(clause.to_vec());
    }

    fn solve(&mut self) -> Result<Verdict, SolverFailure> {
        if self.var_count > Self::MAX_VARS {
            return Err(SolverFailure::TooManyVariables { count: self.var_count, limit: Self::MAX_VARS });
        }

        Ok((0..1u64 << self.var_count)
            .find(|bits| self.satisfies(*bits))
            .map_or(Verdict::Unsatisfiable, |bits| {
                Verdict::Satisfiable((0..self.var_count).map(|index| (bits >> index) & 1 == 1).collect())
            }))
    }
}
