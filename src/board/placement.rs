use std::fmt;

use crate::action::Action;
use crate::searcher::GameAction;

/// Values the opponent may spawn.
pub const SPAWN_VALUES: [u32; 2] = [2, 4];

/// The opponent drops a tile of `value` into an empty square.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

impl Placement {
    pub fn new(row: usize, col: usize, value: u32) -> Self {
        Self { row, col, value }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at ({}, {})", self.value, self.row, self.col)
    }
}

/// Either agent's action on a [`Board`](super::Board): the player slides, the
/// opponent places.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash)]
pub enum BoardAction {
    Slide(Action),
    Place(Placement),
}

impl BoardAction {
    /// The player action this represents, or `Stop` for placements.
    pub fn direction(&self) -> Action {
        match self {
            BoardAction::Slide(action) => *action,
            BoardAction::Place(_) => Action::Stop,
        }
    }
}

impl GameAction for BoardAction {
    #[inline]
    fn stop() -> Self {
        BoardAction::Slide(Action::Stop)
    }
}

impl From<Action> for BoardAction {
    fn from(action: Action) -> Self {
        BoardAction::Slide(action)
    }
}

impl From<Placement> for BoardAction {
    fn from(placement: Placement) -> Self {
        BoardAction::Place(placement)
    }
}

impl fmt::Display for BoardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardAction::Slide(action) => write!(f, "{}", action),
            BoardAction::Place(placement) => write!(f, "place {}", placement),
        }
    }
}
