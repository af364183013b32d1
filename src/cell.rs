use std::fmt::{Display, Formatter};

/// Numeric code for a white cell in the puzzle source format.
pub const WHITE_CODE: i64 = -1;
/// Numeric code for a black cell without a clue.
pub const BLACK_BLANK_CODE: i64 = -2;
/// The largest clue a black cell may carry.
pub const MAX_CLUE: u8 = 4;

/// The fixed kind of a grid cell.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CellKind {
    /// Illuminable; may host a light.
    #[default]
    White,
    /// Opaque, with no adjacency requirement.
    BlackBlank,
    /// Opaque, and exactly this many cardinal neighbours must host a light.
    BlackClued(u8),
}

impl CellKind {
    /// Whether light passes through (and may be placed on) this cell.
    #[inline]
    pub fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// The required adjacent light count, if this is a clued cell.
    #[inline]
    pub fn clue(&self) -> Option<u8> {
        match self {
            Self::BlackClued(n) => Some(*n),
            _ => None,
        }
    }

    /// The numeric code of this kind in the puzzle source format.
    pub fn code(&self) -> i64 {
        match self {
            Self::White => WHITE_CODE,
            Self::BlackBlank => BLACK_BLANK_CODE,
            Self::BlackClued(n) => i64::from(*n),
        }
    }
}

impl TryFrom<i64> for CellKind {
    /// The unrecognised code.
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            WHITE_CODE => Ok(Self::White),
            BLACK_BLANK_CODE => Ok(Self::BlackBlank),
            0..=4 => Ok(Self::BlackClued(code as u8)),
            _ => Err(code),
        }
    }
}

/// How a single cell is drawn when a grid or solution is printed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Glyph {
    Clue(u8),
    Black,
    Light,
    Beam,
    Dark,
}

impl Display for Glyph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Glyph::Clue(n) => write!(f, "{n}"),
            Glyph::Black => write!(f, "■"),
            Glyph::Light => write!(f, "★"),
            Glyph::Beam => write!(f, "·"),
            Glyph::Dark => write!(f, "□"),
        }
    }
}

impl From<CellKind> for Glyph {
    fn from(value: CellKind) -> Self {
        match value {
            CellKind::White => Glyph::Dark,
            CellKind::BlackBlank => Glyph::Black,
            CellKind::BlackClued(n) => Glyph::Clue(n),
        }
    }
}
