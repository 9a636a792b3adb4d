//! Blank moves and successor generation.
//!
//! The blank may slide to any of its eight neighbours: four orthogonal moves
//! at [`ORTHOGONAL`] cost and four diagonal moves at [`DIAGONAL`] cost.
//! Enumeration order is fixed ([`BlankMove::ALL`]) so every caller sees the
//! same successor sequence for the same state.

use std::fmt;

use crate::carrier::grid_state::GridStateV1;
use crate::operators::cost::{Cost, DIAGONAL, ORTHOGONAL};

/// One of the eight directions the blank can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlankMove {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl BlankMove {
    /// Every move, in enumeration order: orthogonal first, then diagonal.
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
    ];

    /// `(d_row, d_col)` applied to the blank's position.
    #[must_use]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (-1, 1),
            Self::DownLeft => (1, -1),
            Self::DownRight => (1, 1),
        }
    }

    /// True for the four diagonal moves.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::UpLeft | Self::UpRight | Self::DownLeft | Self::DownRight
        )
    }

    /// Incremental path cost of this move.
    #[must_use]
    pub const fn cost(self) -> Cost {
        if self.is_diagonal() {
            DIAGONAL
        } else {
            ORTHOGONAL
        }
    }

    /// Stable `snake_case` name, used in traces and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::UpLeft => "up_left",
            Self::UpRight => "up_right",
            Self::DownLeft => "down_left",
            Self::DownRight => "down_right",
        }
    }
}

impl fmt::Display for BlankMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a move could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The blank would leave the 3×3 board.
    OutOfBounds { mv: BlankMove },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { mv } => write!(f, "move {mv} takes the blank off the board"),
        }
    }
}

impl std::error::Error for MoveError {}

/// A successor state together with the move that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Successor {
    pub state: GridStateV1,
    pub mv: BlankMove,
    pub cost: Cost,
}

/// Slide the blank one step in direction `mv`.
///
/// # Errors
///
/// Returns [`MoveError::OutOfBounds`] if the target cell is off the board.
pub fn apply_move(state: &GridStateV1, mv: BlankMove) -> Result<GridStateV1, MoveError> {
    let blank = state.blank_position();
    let (d_row, d_col) = mv.offset();
    let target = blank
        .offset(d_row, d_col)
        .ok_or(MoveError::OutOfBounds { mv })?;
    Ok(state.with_swapped(blank, target))
}

/// All successors of `state`, in [`BlankMove::ALL`] order.
///
/// Yields 3 successors for a corner blank, 5 for an edge blank, 8 for the
/// center.
#[must_use]
pub fn neighbors(state: &GridStateV1) -> Vec<Successor> {
    BlankMove::ALL
        .iter()
        .filter_map(|&mv| {
            apply_move(state, mv).ok().map(|next| Successor {
                state: next,
                mv,
                cost: mv.cost(),
            })
        })
        .collect()
}
