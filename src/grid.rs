use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;

use crate::cell::{CellKind, Glyph};
use crate::location::{Coord, Location};
use crate::step::SquareStep;

/// Reasons a grid definition is rejected before any solving happens.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MalformedReason {
    /// The matrix has no rows, or its first row has no columns.
    #[error("grid has no cells")]
    Empty,
    /// A row is not as long as the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: Coord,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A cell code is not one of `-2`, `-1` or `0..=4`.
    #[error("unrecognised cell code {code} at {location}")]
    UnknownCode {
        /// Where the code appeared.
        location: Location,
        /// The code itself.
        code: i64,
    },
    /// A light placement does not have the dimensions of its grid.
    #[error("placement is {found:?}, grid is {expected:?}")]
    DimensionMismatch {
        /// `(rows, cols)` of the grid.
        expected: (usize, usize),
        /// `(rows, cols)` of the placement.
        found: (usize, usize),
    },
    /// A line of a puzzle file is neither a header nor a row of integers.
    #[error("line {line}: {token:?} is not a cell code")]
    BadToken {
        /// 1-based line number.
        line: usize,
        /// The token which failed to parse.
        token: String,
    },
}

/// Errors raised by the grid model.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GridError {
    /// The input matrix does not describe a rectangular grid of known cell kinds.
    #[error("malformed grid: {0}")]
    Malformed(#[from] MalformedReason),
    /// A coordinate outside `[0, rows) x [0, cols)` was queried.
    #[error("location {location} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// The location asked for.
        location: Location,
        /// Number of rows in the grid.
        rows: usize,
        /// Number of columns in the grid.
        cols: usize,
    },
}

/// Maximal runs of white cells along each axis, computed once per grid.
///
/// Every white cell belongs to exactly one horizontal and one vertical corridor, possibly of length 1.
#[derive(Clone, Debug)]
pub struct Corridors {
    runs: Vec<Vec<Location>>,
    horizontal: Array2<Option<usize>>,
    vertical: Array2<Option<usize>>,
}

impl Corridors {
    /// All corridors, horizontal ones first, each in ascending (row-major) order.
    pub fn iter(&self) -> impl Iterator<Item = &[Location]> {
        self.runs.iter().map(Vec::as_slice)
    }

    /// Number of corridors, including those of length 1.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether the grid has no white cells at all.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Positions in [`Self::iter`] of the horizontal and vertical corridor through `location`.
    pub fn indices_through(&self, location: Location) -> Option<(usize, usize)> {
        let h = (*self.horizontal.get(location.as_index())?)?;
        let v = (*self.vertical.get(location.as_index())?)?;
        Some((h, v))
    }

    /// The horizontal and vertical corridor through `location`, or `None` if it is not white.
    pub fn through(&self, location: Location) -> Option<(&[Location], &[Location])> {
        let (h, v) = self.indices_through(location)?;
        Some((&self.runs[h], &self.runs[v]))
    }
}

/// A Light Up puzzle: a rectangular matrix of [`CellKind`]s which never changes after construction.
///
/// Build one from numeric codes with [`Grid::from_rows`] or cell by cell with a [`GridBuilder`](crate::builder::GridBuilder).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    pub(crate) cells: Array2<CellKind>,
}

impl Grid {
    /// Construct a grid from rows of numeric codes: `-1` white, `-2` black, `0..=4` a clue.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, GridError> {
        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(MalformedReason::Empty.into()),
        };

        let mut cells = Vec::with_capacity(rows.len() * width);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MalformedReason::Ragged { row: r, expected: width, found: row.len() }.into());
            }

            for (c, code) in row.iter().enumerate() {
                let kind = CellKind::try_from(*code)
                    .map_err(|code| MalformedReason::UnknownCode { location: Location(r, c), code })?;
                cells.push(kind);
            }
        }

        let cells = Array2::from_shape_vec((rows.len(), width), cells)
            .map_err(|_| MalformedReason::Empty)?;
        Ok(Self { cells })
    }

    /// Shorthand for [`Self::from_rows`] on borrowed slices.
    pub fn from_codes(rows: &[&[i64]]) -> Result<Self, GridError> {
        Self::from_rows(rows.iter().map(|row| row.to_vec()).collect_vec())
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Whether `location` lies inside the grid.
    #[inline]
    pub fn contains(&self, location: Location) -> bool {
        location.0 < self.rows() && location.1 < self.cols()
    }

    /// The kind of the cell at `location`.
    pub fn cell_kind(&self, location: Location) -> Result<CellKind, GridError> {
        self.cells.get(location.as_index()).copied().ok_or(GridError::OutOfBounds {
            location,
            rows: self.rows(),
            cols: self.cols(),
        })
    }

    #[inline]
    pub(crate) fn is_white(&self, location: Location) -> bool {
        self.cells.get(location.as_index()).is_some_and(CellKind::is_white)
    }

    /// The in-bounds cardinal neighbours of `location`, in the order up, down, left, right.
    pub fn cardinal_neighbors(&self, location: Location) -> impl Iterator<Item = Location> + '_ {
        SquareStep::VARIANTS.iter()
            .map(move |step| step.attempt_from(location))
            .filter(move |neighbor| self.contains(*neighbor))
    }

    /// Every white cell in row-major order.
    pub fn white_cells(&self) -> impl Iterator<Item = Location> + '_ {
        self.cells.indexed_iter()
            .filter(|(_, kind)| kind.is_white())
            .map(|(index, _)| Location::from(index))
    }

    /// Every clued black cell in row-major order, with its clue.
    pub fn clued_cells(&self) -> impl Iterator<Item = (Location, u8)> + '_ {
        self.cells.indexed_iter()
            .filter_map(|(index, kind)| kind.clue().map(|n| (Location::from(index), n)))
    }

    /// Compute the corridors of this grid.
    ///
    /// A corridor starts at a white cell whose backward neighbour (left for rows, up for columns) is opaque or off the grid,
    /// and extends forward over white cells.
    pub fn corridors(&self) -> Corridors {
        let mut runs = Vec::new();
        let mut horizontal = Array2::from_elem(self.dims(), None);
        let mut vertical = Array2::from_elem(self.dims(), None);

        for step in SquareStep::FORWARD_VARIANTS {
            let membership = if step.is_horizontal() { &mut horizontal } else { &mut vertical };

            for start in self.white_cells() {
                if self.is_white(step.invert().attempt_from(start)) {
                    continue;
                }

                let mut run = vec![start];
                let mut cursor = step.attempt_from(start);
                while self.is_white(cursor) {
                    run.push(cursor);
                    cursor = step.attempt_from(cursor);
                }

                for location in &run {
                    membership[location.as_index()] = Some(runs.len());
                }
                runs.push(run);
            }
        }

        // vertical runs are ordered by their starting cell, row-major
        Corridors { runs, horizontal, vertical }
    }

    /// Every cell a light at `location` would illuminate, including `location` itself.
    ///
    /// Returns an empty vector if `location` is not white.
    pub fn illumination(&self, location: Location) -> Vec<Location> {
        if !self.is_white(location) {
            return Vec::new();
        }

        let mut lit = vec![location];
        for step in SquareStep::VARIANTS {
            let mut cursor = step.attempt_from(location);
            while self.is_white(cursor) {
                lit.push(cursor);
                cursor = step.attempt_from(cursor);
            }
        }

        lit.sort();
        lit
    }

    pub(crate) fn glyphs(&self) -> Array2<Glyph> {
        self.cells.map(|kind| Glyph::from(*kind))
    }
}

pub(crate) fn print(glyphs: &Array2<Glyph>) -> String {
    glyphs.rows()
        .into_iter()
        .map(|row| row.iter().join(" ") + "\n")
        .collect()
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print(&self.glyphs()))
    }
}
