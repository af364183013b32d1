use strum::VariantArray;

use crate::location::Location;

/// The four cardinal directions of a rectangular grid.
///
/// [`VariantArray::VARIANTS`] lists them in the canonical order up, down, left, right.
/// Every neighbour walk in this crate follows that order so clause generation is reproducible.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl SquareStep {
    /// Directions which, upon stepping, lead to a location later in row-major order.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result is not bounds checked.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
            Self::Right => location.offset_by((0, 1)),
        }
    }

    /// Invert the direction specified by `self`.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether this step moves along a row.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Return the direction of a single step from `from` to `to`, if the two are cardinal neighbours.
    pub fn direction_to(from: Location, to: Location) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|step| step.attempt_from(from) == to)
    }
}
