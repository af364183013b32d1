//! Translation of a grid into CNF over one variable per white cell.

use itertools::Itertools;
use ndarray::Array2;
use varisat::{CnfFormula, ExtendFormula, Lit, Var};

use crate::grid::Grid;
use crate::location::Location;
use crate::logic::{at_least_one, at_most_one_pairwise, at_most_one_sequential, exactly};

/// How "at most one light per corridor" is written as clauses.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum AtMostOne {
    /// One binary clause per pair of cells; no auxiliary variables.
    #[default]
    Pairwise,
    /// A sequential counter; linear in corridor length, at the cost of auxiliary variables.
    Sequential,
}

/// Knobs for a single solve.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SolveOptions {
    /// Encoding of the mutual non-visibility constraints.
    pub at_most_one: AtMostOne,
}

/// The rule a clause was generated for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Family {
    /// Some light sees this white cell.
    Coverage,
    /// Coverage restated through one indicator per corridor: the indicator implies a light in its
    /// corridor, and every white cell needs one of its two indicators.
    Corridor,
    /// A clued cell has exactly its number of adjacent lights.
    Clue,
    /// No two lights share a corridor.
    Visibility,
}

/// Bidirectional mapping between white cells and their decision variables.
///
/// Variable `i` belongs to the `i`-th white cell in row-major order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariableMap {
    by_location: Array2<Option<Var>>,
    locations: Vec<Location>,
}

impl VariableMap {
    fn new(grid: &Grid) -> Self {
        let mut by_location = Array2::from_elem(grid.dims(), None);
        let locations = grid.white_cells().collect_vec();
        for (index, location) in locations.iter().enumerate() {
            by_location[location.as_index()] = Some(Var::from_index(index));
        }

        Self { by_location, locations }
    }

    /// The decision variable of the white cell at `location`.
    pub fn var(&self, location: Location) -> Option<Var> {
        self.by_location.get(location.as_index()).copied().flatten()
    }

    /// The white cell a decision variable stands for; `None` for auxiliary variables.
    pub fn location(&self, var: Var) -> Option<Location> {
        self.locations.get(var.index()).copied()
    }

    /// Number of decision variables.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the grid had no white cells.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// `(location, variable)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Location, Var)> + '_ {
        self.locations.iter().enumerate().map(|(index, location)| (*location, Var::from_index(index)))
    }

    fn lits(&self, locations: &[Location]) -> Vec<Lit> {
        locations.iter()
            .filter_map(|location| self.var(*location))
            .map(Var::positive)
            .collect_vec()
    }
}

/// Clause counts per rule.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FamilyCounts {
    /// Illumination coverage clauses.
    pub coverage: usize,
    /// Corridor indicator clauses.
    pub corridor: usize,
    /// Clue adjacency clauses.
    pub clue: usize,
    /// Mutual non-visibility clauses.
    pub visibility: usize,
}

/// The encoded form of a grid, ready to be handed to a [`SatEngine`](crate::engine::SatEngine).
#[derive(Debug)]
pub struct ConstraintSet {
    formula: CnfFormula,
    families: Vec<Family>,
    variables: VariableMap,
    var_count: usize,
}

impl ConstraintSet {
    /// The CNF formula.
    pub fn formula(&self) -> &CnfFormula {
        &self.formula
    }

    /// Every clause along with the rule it encodes, in generation order.
    pub fn clauses(&self) -> impl Iterator<Item = (Family, &[Lit])> {
        self.families.iter().copied().zip(self.formula.iter())
    }

    /// Only the clauses of one rule.
    pub fn clauses_of(&self, family: Family) -> impl Iterator<Item = &[Lit]> {
        self.clauses().filter(move |(f, _)| *f == family).map(|(_, clause)| clause)
    }

    /// The white cell to variable mapping.
    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    /// Decision plus auxiliary variables (corridor indicators, counter registers).
    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Whether there are no clauses at all, i.e. the grid has no white and no clued cells.
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Clause counts per rule.
    pub fn counts(&self) -> FamilyCounts {
        self.families.iter().fold(FamilyCounts::default(), |mut counts, family| {
            match family {
                Family::Coverage => counts.coverage += 1,
                Family::Corridor => counts.corridor += 1,
                Family::Clue => counts.clue += 1,
                Family::Visibility => counts.visibility += 1,
            }
            counts
        })
    }
}

/// Translates a [`Grid`] into a [`ConstraintSet`]. Encoding never fails and is deterministic.
pub struct Encoder<'a> {
    grid: &'a Grid,
    options: SolveOptions,
    formula: CnfFormula,
    families: Vec<Family>,
    next_var: usize,
}

impl<'a> Encoder<'a> {
    /// Prepare to encode `grid`.
    pub fn new(grid: &'a Grid, options: SolveOptions) -> Self {
        Self {
            grid,
            options,
            formula: CnfFormula::new(),
            families: Vec::new(),
            next_var: 0,
        }
    }

    fn push(&mut self, family: Family, clauses: impl IntoIterator<Item = Vec<Lit>>) {
        for clause in clauses {
            self.formula.add_clause(&clause);
            self.families.push(family);
        }
    }

    fn fresh_vars(&mut self, count: usize) -> Vec<Var> {
        let vars = (self.next_var..self.next_var + count).map(Var::from_index).collect_vec();
        self.next_var += count;
        vars
    }

    /// Emit every clause for the grid.
    ///
    /// # Logical setup
    /// Each white cell C has one variable, true when C holds a light. Black cells have none.
    ///
    /// ## Coverage
    /// C is lit if and only if some cell in its horizontal or vertical corridor (C included) holds a light,
    /// so the union of the two corridors forms one clause.
    ///
    /// The same rule is repeated through an indicator `y` per corridor of length two or more,
    /// with `¬y ∨ OR(corridor)` and then `y_h ∨ y_v` per white cell. A corridor of one cell uses
    /// that cell's own variable. The extra clauses are implied by the coverage family; they keep
    /// the search short on large open grids, where the long coverage clauses alone propagate poorly.
    ///
    /// ## Clues
    /// A clue N speaks only about the white cells among its up to four cardinal neighbours.
    /// Black and off-grid neighbours have no variable and never appear in the clause.
    ///
    /// ## Visibility
    /// Two lights see each other exactly when they share a corridor, so each corridor holds at most one light.
    pub fn encode(mut self) -> ConstraintSet {
        let grid = self.grid;
        let variables = VariableMap::new(grid);
        self.next_var = variables.len();
        let corridors = grid.corridors();

        for location in grid.white_cells() {
            let Some((horizontal, vertical)) = corridors.through(location) else {
                continue;
            };

            let mut lits = variables.lits(horizontal);
            // the vertical corridor contains this cell too
            lits.extend(variables.lits(vertical).into_iter().filter(|lit| Some(lit.var()) != variables.var(location)));
            self.push(Family::Coverage, [at_least_one(&lits)]);
        }

        let indicators = corridors.iter()
            .map(|corridor| match corridor {
                [single] => variables.var(*single).map(Var::positive),
                _ => {
                    let indicator = self.fresh_vars(1)[0];
                    let mut clause = vec![indicator.negative()];
                    clause.extend(variables.lits(corridor));
                    self.push(Family::Corridor, [clause]);
                    Some(indicator.positive())
                }
            })
            .collect_vec();

        for location in grid.white_cells() {
            let clause = corridors.indices_through(location)
                .into_iter()
                .flat_map(|(h, v)| [indicators[h], indicators[v]])
                .flatten()
                .dedup()
                .collect_vec();
            self.push(Family::Corridor, [clause]);
        }

        for (location, clue) in grid.clued_cells() {
            let neighbors = grid.cardinal_neighbors(location)
                .filter(|neighbor| grid.is_white(*neighbor))
                .collect_vec();
            let lits = variables.lits(&neighbors);
            log::trace!("clue {clue} at {location} over {} white neighbours", lits.len());
            self.push(Family::Clue, exactly(usize::from(clue), &lits));
        }

        for corridor in corridors.iter().filter(|corridor| corridor.len() > 1) {
            let lits = variables.lits(corridor);
            let clauses = match self.options.at_most_one {
                AtMostOne::Pairwise => at_most_one_pairwise(&lits),
                AtMostOne::Sequential => {
                    let aux = self.fresh_vars(lits.len() - 1);
                    at_most_one_sequential(&lits, &aux)
                }
            };
            self.push(Family::Visibility, clauses);
        }

        let var_count = self.next_var;
        self.formula.set_var_count(var_count);

        let constraints = ConstraintSet {
            formula: self.formula,
            families: self.families,
            variables,
            var_count,
        };
        let counts = constraints.counts();
        log::debug!(
            "encoded {}x{} grid: {} decision vars, {} total vars, {} coverage / {} corridor / {} clue / {} visibility clauses",
            grid.rows(),
            grid.cols(),
            constraints.variables.len(),
            var_count,
            counts.coverage,
            counts.corridor,
            counts.clue,
            counts.visibility,
        );

        constraints
    }
}
