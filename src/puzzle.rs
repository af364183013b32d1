//! Reading and writing puzzles as text.

use std::str::FromStr;

use itertools::Itertools;

use crate::grid::{Grid, GridError, MalformedReason};

/// A puzzle as stored on disk: the grid, plus an optional link to a reference solver.
///
/// The text format has one grid row per line, cells as comma separated codes
/// (`-1` white, `-2` black, `0..=4` a clue). A line is a row when it contains a comma or is a single
/// integer. Lines holding a `key: value` header are metadata; of those only `link:` is kept.
/// Anything else (blank lines, `#` comments, bare seed or trailer lines) is skipped.
///
/// ```text
/// link: https://www.chiark.greenend.org.uk/~sgtatham/puzzles/js/lightup.html#3x3:a1a
/// game: 3x3
///
/// -1,-1,-1
/// -2,1,-1
/// -1,-1,-1
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PuzzleFile {
    /// The puzzle itself.
    pub grid: Grid,
    /// Where the puzzle can be checked against another solver.
    pub link: Option<String>,
}

impl PuzzleFile {
    /// Parse the text format described on [`PuzzleFile`].
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut link = None;
        let mut rows = Vec::new();

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(':') {
                if key.trim().eq_ignore_ascii_case("link") {
                    link = Some(value.trim().to_string());
                }
                continue;
            }

            if !line.contains(',') && line.parse::<i64>().is_err() {
                log::debug!("skipping line {}: {line:?}", number + 1);
                continue;
            }

            let row = line.split(',')
                .map(str::trim)
                .map(|token| token.parse::<i64>().map_err(|_| MalformedReason::BadToken {
                    line: number + 1,
                    token: token.to_string(),
                }))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        Ok(Self { grid: Grid::from_rows(rows)?, link })
    }
}

impl FromStr for PuzzleFile {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse a bare grid, or a whole puzzle file discarding its metadata.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PuzzleFile::parse(s).map(|file| file.grid)
    }
}

/// Write `grid` in the text format read by [`PuzzleFile::parse`].
pub fn to_text(grid: &Grid) -> String {
    grid.cells.rows()
        .into_iter()
        .map(|row| row.iter().map(|kind| kind.code()).join(",") + "\n")
        .collect()
}
