use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;

use crate::cell::Glyph;
use crate::encoder::VariableMap;
use crate::engine::SolverFailure;
use crate::grid::{print, Grid, GridError, MalformedReason};
use crate::location::Location;
use crate::validate::{validate, Violation};

/// A light placement over a grid: `true` wherever a light stands.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    grid: Grid,
    lights: Array2<bool>,
}

impl Solution {
    /// Pair a placement with its grid. The placement is not checked against the rules; see [`Self::validate`].
    pub fn new(grid: Grid, lights: Array2<bool>) -> Result<Self, GridError> {
        if grid.dims() != lights.dim() {
            return Err(MalformedReason::DimensionMismatch { expected: grid.dims(), found: lights.dim() }.into());
        }

        Ok(Self { grid, lights })
    }

    /// Place lights at `locations` and nowhere else.
    pub fn from_lights(grid: Grid, locations: &[Location]) -> Result<Self, GridError> {
        let mut lights = Array2::from_elem(grid.dims(), false);
        for location in locations {
            let slot = lights.get_mut(location.as_index()).ok_or(GridError::OutOfBounds {
                location: *location,
                rows: grid.rows(),
                cols: grid.cols(),
            })?;
            *slot = true;
        }

        Self::new(grid, lights)
    }

    /// Map a model back onto the grid. Auxiliary variables past the decision variables are ignored.
    pub fn decode(grid: &Grid, variables: &VariableMap, model: &[bool]) -> Result<Self, SolverFailure> {
        let mut lights = Array2::from_elem(grid.dims(), false);
        for (location, var) in variables.iter() {
            let value = model.get(var.index())
                .ok_or(SolverFailure::IncompleteModel { variable: var.index() })?;
            lights[location.as_index()] = *value;
        }

        Ok(Self { grid: grid.clone(), lights })
    }

    /// The puzzle this placement belongs to.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The placement matrix, with the grid's dimensions.
    pub fn placement(&self) -> &Array2<bool> {
        &self.lights
    }

    /// Whether a light stands at `location`.
    pub fn is_lit(&self, location: Location) -> bool {
        self.lights.get(location.as_index()).copied().unwrap_or(false)
    }

    /// Every light, row-major.
    pub fn lights(&self) -> Vec<Location> {
        self.lights.indexed_iter()
            .filter(|(_, lit)| **lit)
            .map(|(index, _)| Location::from(index))
            .collect_vec()
    }

    /// Check the placement against all rules of the puzzle.
    pub fn validate(&self) -> Result<(), Violation> {
        validate(&self.grid, &self.lights)
    }

    /// A view of this solution which also draws the beams of every light.
    pub fn with_beams(&self) -> Beams<'_> {
        Beams(self)
    }

    fn glyphs(&self, beams: bool) -> Array2<Glyph> {
        let mut glyphs = self.grid.glyphs();
        for light in self.lights() {
            if beams {
                for location in self.grid.illumination(light) {
                    if glyphs[location.as_index()] == Glyph::Dark {
                        glyphs[location.as_index()] = Glyph::Beam;
                    }
                }
            }
            glyphs[light.as_index()] = Glyph::Light;
        }

        glyphs
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print(&self.glyphs(false)))
    }
}

/// See [`Solution::with_beams`].
pub struct Beams<'a>(&'a Solution);

impl Display for Beams<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print(&self.0.glyphs(true)))
    }
}
