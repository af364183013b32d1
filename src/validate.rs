use std::fmt::{Display, Formatter};

use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::cell::CellKind;
use crate::grid::Grid;
use crate::location::Location;
use crate::step::SquareStep;

/// Wrapper so a pair of locations can be shown in error messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VisiblePair(pub UnorderedPair<Location>);

impl Display for VisiblePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let UnorderedPair(a, b) = self.0;
        write!(f, "{} and {}", a.min(b), a.max(b))
    }
}

/// A broken puzzle rule, naming the cells involved.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Violation {
    /// A light stands on a black cell.
    #[error("light placed on opaque cell {0}")]
    LightOnOpaque(Location),
    /// Two lights share a line of sight.
    #[error("lights at {0} see each other")]
    MutuallyVisible(VisiblePair),
    /// A clue is not met exactly.
    #[error("clue at {location} wants {expected} adjacent lights, found {found}")]
    ClueMismatch {
        /// The clued cell.
        location: Location,
        /// Its number.
        expected: u8,
        /// Lights actually adjacent.
        found: u8,
    },
    /// A white cell receives no light.
    #[error("white cell {0} is not lit")]
    Unlit(Location),
}

/// The "can see" relation between white cells: an edge joins two cells with nothing opaque between them on one line.
fn visibility(grid: &Grid) -> UnGraphMap<Location, ()> {
    let mut graph = UnGraphMap::new();

    for (index, kind) in grid.cells.indexed_iter() {
        if !kind.is_white() {
            continue;
        }

        let origin = Location::from(index);
        graph.add_node(origin);
        for step in SquareStep::VARIANTS {
            let mut cursor = step.attempt_from(origin);
            while let Ok(CellKind::White) = grid.cell_kind(cursor) {
                graph.add_edge(origin, cursor, ());
                cursor = step.attempt_from(cursor);
            }
        }
    }

    graph
}

/// Check `lights` against the rules of `grid` without reference to any clauses.
///
/// Violations are reported in this order: lights on black cells, lights seeing each other, unmet clues, unlit cells.
pub(crate) fn validate(grid: &Grid, lights: &Array2<bool>) -> Result<(), Violation> {
    let lit = |location: Location| lights.get(location.as_index()).copied().unwrap_or(false);

    if let Some((index, _)) = lights.indexed_iter().find(|(index, on)| **on && !grid.cells[*index].is_white()) {
        return Err(Violation::LightOnOpaque(Location::from(index)));
    }

    let graph = visibility(grid);

    if let Some((a, b, _)) = graph.all_edges().find(|(a, b, _)| lit(*a) && lit(*b)) {
        return Err(Violation::MutuallyVisible(VisiblePair(UnorderedPair(a, b))));
    }

    for (index, kind) in grid.cells.indexed_iter() {
        let CellKind::BlackClued(expected) = *kind else {
            continue;
        };

        let location = Location::from(index);
        let found = SquareStep::VARIANTS.iter()
            .map(|step| step.attempt_from(location))
            .filter(|neighbor| lit(*neighbor))
            .count();
        if found != usize::from(expected) {
            return Err(Violation::ClueMismatch { location, expected, found: found as u8 });
        }
    }

    if let Some(dark) = graph.nodes().find(|cell| !lit(*cell) && !graph.neighbors(*cell).any(lit)) {
        return Err(Violation::Unlit(dark));
    }

    log::trace!("placement of {} lights passes every rule", lights.iter().filter(|on| **on).count());
    Ok(())
}
