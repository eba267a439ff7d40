//! Two-click swap selection.
//!
//! The machine is `Idle` until a tile is picked, then holds that coordinate until a
//! second pick. A second pick on an orthogonal neighbour attempts a swap; any other
//! tile replaces the held one; the same tile again is ignored. Once frozen (round
//! over) every pick is refused.
use rand::Rng;
use tracing::{debug, trace};

use crate::config::Rules;
use crate::engine::{are_adjacent, Board, Coord};
use crate::error::MoveError;
use crate::resolver::{resolve, Resolution};

/// Selection state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    OneSelected(Coord),
}

/// Two neighbouring cells to exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Swap {
    pub from: Coord,
    pub to: Coord,
}

/// What a `select` call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// First pick; the coordinate is now held.
    Selected(Coord),
    /// The held tile was picked again. Nothing changed.
    Ignored(Coord),
    /// A non-adjacent tile replaced the held one.
    Reselected { previous: Coord, current: Coord },
    /// The swap produced at least one run and was kept.
    Swapped { swap: Swap, resolution: Resolution },
    /// The swap produced no run and was undone.
    Reverted { swap: Swap },
}

impl SelectOutcome {
    /// `true` only when a swap was kept on the board.
    pub fn applied_swap(&self) -> bool {
        matches!(self, SelectOutcome::Swapped { .. })
    }

    /// Points earned by this pick.
    pub fn score_delta(&self) -> u32 {
        match self {
            SelectOutcome::Swapped { resolution, .. } => resolution.score_delta,
            _ => 0,
        }
    }
}

/// Swaps two cells and resolves the result, undoing the swap if nothing matched.
///
/// Returns the resolution of a kept swap, or `None` if the board was restored.
/// Callers check bounds and adjacency first; `SelectionMachine::select` does.
///
/// # Panics
/// Panics if either cell of `swap` is off the board.
pub(crate) fn try_swap(
    board: &mut Board,
    swap: Swap,
    rules: &Rules,
    rng: &mut impl Rng,
) -> Option<Resolution> {
    board.swap(swap.from, swap.to);
    let resolution = resolve(board, rules, rng);
    if resolution.is_productive() {
        Some(resolution)
    } else {
        board.swap(swap.from, swap.to);
        None
    }
}

/// Selection state plus the frozen flag flipped by round expiry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionMachine {
    state: Selection,
    frozen: bool,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Selection {
        self.state
    }

    /// The held coordinate, if any.
    pub fn held(&self) -> Option<Coord> {
        match self.state {
            Selection::Idle => None,
            Selection::OneSelected(pos) => Some(pos),
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Refuses all further input and drops any held tile.
    pub fn freeze(&mut self) {
        self.frozen = true;
        self.state = Selection::Idle;
    }

    /// Back to `Idle` and accepting input.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Handles one tile pick.
    ///
    /// # Errors
    /// * `MoveError::RoundOver` while frozen.
    /// * `MoveError::InvalidCoordinate` if `pos` is off the board.
    ///
    /// Neither error changes the board or the selection.
    pub fn select(
        &mut self,
        board: &mut Board,
        pos: Coord,
        rules: &Rules,
        rng: &mut impl Rng,
    ) -> Result<SelectOutcome, MoveError> {
        if self.frozen {
            trace!(?pos, "pick ignored, round is over");
            return Err(MoveError::RoundOver);
        }
        if !board.in_bounds(pos.0, pos.1) {
            trace!(?pos, "pick ignored, out of bounds");
            return Err(MoveError::InvalidCoordinate {
                row: pos.0,
                col: pos.1,
                size: board.size(),
            });
        }

        let held = match self.state {
            Selection::Idle => {
                self.state = Selection::OneSelected(pos);
                return Ok(SelectOutcome::Selected(pos));
            }
            Selection::OneSelected(held) => held,
        };

        if held == pos {
            return Ok(SelectOutcome::Ignored(pos));
        }
        if !are_adjacent(held, pos) {
            self.state = Selection::OneSelected(pos);
            return Ok(SelectOutcome::Reselected {
                previous: held,
                current: pos,
            });
        }

        self.state = Selection::Idle;
        let swap = Swap {
            from: held,
            to: pos,
        };
        match try_swap(board, swap, rules, rng) {
            Some(resolution) => {
                debug!(
                    ?swap,
                    points = resolution.score_delta,
                    cascades = resolution.cascade_depth(),
                    "swap kept"
                );
                Ok(SelectOutcome::Swapped { swap, resolution })
            }
            None => {
                debug!(?swap, "swap reverted, no run formed");
                Ok(SelectOutcome::Reverted { swap })
            }
        }
    }
}
