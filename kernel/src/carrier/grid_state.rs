//! `GridStateV1`: the validated 3×3 tile permutation.
//!
//! # Layout
//!
//! Nine cells in row-major order. Value `0` is the blank; `1..=8` are tiles.
//! A cell index `i` sits at `row = i / 3`, `col = i % 3`.
//!
//! # Ordering
//!
//! `Ord` is lexicographic over the nine cells. The search frontier uses it as
//! its final tie-break, so it must stay a pure function of the cell bytes.

use std::fmt;

use crate::proof::hash::{canonical_hash, ContentHash, DOMAIN_GRID_STATE};

/// Board side length.
pub const SIDE: usize = 3;

/// Number of cells on the board.
pub const CELL_COUNT: usize = SIDE * SIDE;

/// The blank cell value.
pub const BLANK: u8 = 0;

/// A cell coordinate on the 3×3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Position of a row-major cell index. Returns `None` past the last cell.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then(|| Self::at(index))
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn at(index: usize) -> Self {
        Self {
            row: (index / SIDE) as u8,
            col: (index % SIDE) as u8,
        }
    }

    /// Row-major cell index.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.row) * SIDE + usize::from(self.col)
    }

    /// Shift by `(d_row, d_col)`. Returns `None` if the result leaves the board.
    #[must_use]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = i16::from(self.row) + i16::from(d_row);
        let col = i16::from(self.col) + i16::from(d_col);
        let side = i16::try_from(SIDE).ok()?;
        if !(0..side).contains(&row) || !(0..side).contains(&col) {
            return None;
        }
        Some(Self {
            row: u8::try_from(row).ok()?,
            col: u8::try_from(col).ok()?,
        })
    }

    /// Absolute `(row, col)` differences to `other`.
    #[must_use]
    pub fn abs_diff(self, other: Self) -> (u8, u8) {
        (self.row.abs_diff(other.row), self.col.abs_diff(other.col))
    }
}

/// Why a cell sequence is not a valid puzzle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The sequence does not have exactly nine cells.
    WrongLength { len: usize },
    /// A cell value is outside `0..=8`.
    OutOfRange { index: usize, value: u8 },
    /// A value appears more than once.
    Duplicate { value: u8, first: usize, second: usize },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { len } => {
                write!(f, "invalid state: expected {CELL_COUNT} cells, got {len}")
            }
            Self::OutOfRange { index, value } => {
                write!(f, "invalid state: cell {index} holds {value}, expected 0..=8")
            }
            Self::Duplicate {
                value,
                first,
                second,
            } => write!(
                f,
                "invalid state: value {value} appears at cells {first} and {second}"
            ),
        }
    }
}

impl std::error::Error for StateError {}

/// An immutable, validated 3×3 puzzle state.
///
/// Construct via [`GridStateV1::new`] or [`GridStateV1::from_slice`]; both
/// reject anything that is not a permutation of `0..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridStateV1 {
    cells: [u8; CELL_COUNT],
}

impl GridStateV1 {
    /// Validate and wrap nine row-major cells.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] if the cells are not a permutation of `0..=8`.
    pub fn new(cells: [u8; CELL_COUNT]) -> Result<Self, StateError> {
        let mut seen: [Option<usize>; CELL_COUNT] = [None; CELL_COUNT];
        for (index, &value) in cells.iter().enumerate() {
            let slot = seen
                .get_mut(usize::from(value))
                .ok_or(StateError::OutOfRange { index, value })?;
            if let Some(first) = *slot {
                return Err(StateError::Duplicate {
                    value,
                    first,
                    second: index,
                });
            }
            *slot = Some(index);
        }
        // Nine distinct values in 0..=8 cover every value exactly once.
        Ok(Self { cells })
    }

    /// Validate a slice of arbitrary length.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::WrongLength`] unless the slice has nine cells,
    /// then any error from [`GridStateV1::new`].
    pub fn from_slice(cells: &[u8]) -> Result<Self, StateError> {
        let cells: [u8; CELL_COUNT] = cells
            .try_into()
            .map_err(|_| StateError::WrongLength { len: cells.len() })?;
        Self::new(cells)
    }

    /// The nine row-major cells.
    #[must_use]
    pub fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.cells
    }

    /// The value at `pos`.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> u8 {
        self.cells[pos.index()]
    }

    /// Cell index of the blank.
    #[must_use]
    pub fn blank_index(&self) -> usize {
        self.blank_position().index()
    }

    /// Position of the blank.
    #[must_use]
    pub fn blank_position(&self) -> Position {
        self.positions()[usize::from(BLANK)]
    }

    /// Position of `tile`, or `None` if `tile > 8`.
    #[must_use]
    pub fn position_of(&self, tile: u8) -> Option<Position> {
        self.positions().get(usize::from(tile)).copied()
    }

    /// Inverse permutation: `positions()[v]` is where value `v` sits.
    #[must_use]
    pub fn positions(&self) -> [Position; CELL_COUNT] {
        let mut out = [Position { row: 0, col: 0 }; CELL_COUNT];
        for (index, &value) in self.cells.iter().enumerate() {
            out[usize::from(value)] = Position::at(index);
        }
        out
    }

    /// A new state with the cells at `a` and `b` exchanged.
    ///
    /// Swapping two cells of a permutation yields a permutation, so no
    /// re-validation is needed.
    #[must_use]
    pub fn with_swapped(&self, a: Position, b: Position) -> Self {
        let mut cells = self.cells;
        cells.swap(a.index(), b.index());
        Self { cells }
    }

    /// Domain-separated content fingerprint of the cell bytes.
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        canonical_hash(DOMAIN_GRID_STATE, &self.cells)
    }
}

impl TryFrom<&[u8]> for GridStateV1 {
    type Error = StateError;

    fn try_from(cells: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(cells)
    }
}

impl fmt::Display for GridStateV1 {
    /// Three lines of three cells, `_` for the blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(SIDE).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, &value) in chunk.iter().enumerate() {
                if col > 0 {
                    f.write_str("  ")?;
                }
                if value == BLANK {
                    f.write_str("_")?;
                } else {
                    write!(f, "{value}")?;
                }
            }
        }
        Ok(())
    }
}
