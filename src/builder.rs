//! Cell-by-cell construction of [`Grid`]s.

use std::num::NonZero;

use ndarray::Array2;

use crate::cell::{CellKind, MAX_CLUE};
use crate::grid::Grid;
use crate::location::{Dimension, Location};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A cell was placed outside the bounds specified by `dims` on the builder.
    FeatureOutOfBounds(Location),
    /// A clue larger than four was requested; no cell has more than four neighbours.
    ClueOutOfRange(Location, u8),
}

/// A builder for [`Grid`]s. Every cell starts white.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone)]
pub struct GridBuilder {
    cells: Array2<CellKind>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::<usize>::MIN, NonZero::<usize>::MIN))
    }
}

impl GridBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(rows, cols)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            cells: Array2::from_elem((dims.0.get(), dims.1.get()), CellKind::White),
            invalid_reasons: Default::default(),
        }
    }

    fn place(&mut self, location: Location, kind: CellKind) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match self.cells.get_mut(location.as_index()) {
            Some(cell) => *cell = kind,
            None => self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds(location)),
        }

        self
    }

    /// Make the cell at `location` an unnumbered black cell.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn blacken(&mut self, location: Location) -> &mut Self {
        self.place(location, CellKind::BlackBlank)
    }

    /// Make the cell at `location` a black cell requiring exactly `clue` adjacent lights.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds)
    /// or [`ClueOutOfRange`](BuilderInvalidReason::ClueOutOfRange) invalid state.
    /// A clue larger than the number of white neighbours the cell ends up with is accepted; such a grid simply has no solution.
    pub fn add_clue(&mut self, location: Location, clue: u8) -> &mut Self {
        if clue > MAX_CLUE && self.invalid_reasons.is_empty() {
            self.invalid_reasons.push(BuilderInvalidReason::ClueOutOfRange(location, clue));
            return self;
        }

        self.place(location, CellKind::BlackClued(clue))
    }

    /// Turn the cell at `location` back into a white cell.
    pub fn whiten(&mut self, location: Location) -> &mut Self {
        self.place(location, CellKind::White)
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Grid`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Grid, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        Ok(Grid { cells: self.cells.clone() })
    }
}
