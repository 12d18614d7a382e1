pub mod error;
pub mod placement;

mod display;
mod slide;


use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::action::Action;
use crate::agent::Agent;
use crate::searcher::{GameState, InvalidAction};
use error::BoardError;
pub use placement::{BoardAction, Placement, SPAWN_VALUES};

pub const BOARD_SIZE: usize = 4;

/// The largest tile a board can hold. Tiles of this value no longer merge.
pub const MAX_TILE: u32 = 1 << 31;

/// Chance that a random spawn is a 4 rather than a 2.
pub const SPAWN_FOUR_PROBABILITY: f64 = 0.1;

pub type Grid = [[u32; BOARD_SIZE]; BOARD_SIZE];

/// Represents a sliding-tile board. The grid holds tile values (0 for empty), and the
/// board also tracks the running score and the largest tile.
///
/// Two boards are equal when their grids are equal, whatever their scores.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    score: u32,
    max_tile: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            grid: [[0; BOARD_SIZE]; BOARD_SIZE],
            score: 0,
            max_tile: 0,
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grid.hash(state);
    }
}

fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

impl Board {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_grid(grid: Grid) -> Result<Self, BoardError> {
        if let Some(&value) = grid.iter().flatten().find(|&&value| !is_valid_tile(value)) {
            return Err(BoardError::InvalidTileValue { value });
        }

        let max_tile = grid.iter().flatten().copied().max().unwrap_or(0);
        Ok(Self {
            grid,
            score: 0,
            max_tile,
        })
    }

    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.grid[row][col]
    }

    pub fn points(&self) -> u32 {
        self.score
    }

    pub fn highest_tile(&self) -> u32 {
        self.max_tile
    }

    pub fn empty_squares(&self) -> Vec<(usize, usize)> {
        let mut squares = Vec::new();
        for (row, tiles) in self.grid.iter().enumerate() {
            for (col, &tile) in tiles.iter().enumerate() {
                if tile == 0 {
                    squares.push((row, col));
                }
            }
        }
        squares
    }

    /// Returns the board after sliding toward `direction`, or `None` if nothing moves.
    pub fn slide(&self, direction: Action) -> Option<Board> {
        let (grid, gained) = slide::slide_grid(&self.grid, direction);
        if grid == self.grid {
            return None;
        }

        let max_tile = grid.iter().flatten().copied().max().unwrap_or(0);
        Some(Self {
            grid,
            score: self.score.saturating_add(gained),
            max_tile,
        })
    }

    /// Returns the board with `placement` dropped into its square.
    pub fn place(&self, placement: Placement) -> Result<Board, BoardError> {
        if !SPAWN_VALUES.contains(&placement.value) {
            return Err(BoardError::InvalidTileValue {
                value: placement.value,
            });
        }
        if placement.row >= BOARD_SIZE || placement.col >= BOARD_SIZE {
            return Err(BoardError::OutOfBounds {
                row: placement.row,
                col: placement.col,
            });
        }
        if self.grid[placement.row][placement.col] != 0 {
            return Err(BoardError::SquareOccupied {
                row: placement.row,
                col: placement.col,
            });
        }

        let mut board = self.clone();
        board.grid[placement.row][placement.col] = placement.value;
        board.max_tile = board.max_tile.max(placement.value);
        Ok(board)
    }

    /// Directions that change the grid, in generation order.
    pub fn player_actions(&self) -> Vec<Action> {
        Action::DIRECTIONS
            .iter()
            .copied()
            .filter(|&direction| slide::slide_grid(&self.grid, direction).0 != self.grid)
            .collect()
    }

    /// Every 2 and 4 the opponent could drop into an empty square.
    pub fn placements(&self) -> Vec<Placement> {
        self.empty_squares()
            .into_iter()
            .flat_map(|(row, col)| {
                SPAWN_VALUES
                    .iter()
                    .map(move |&value| Placement::new(row, col, value))
            })
            .collect()
    }

    /// Drops a 2 (or, rarely, a 4) into a random empty square.
    /// Returns `None` if the board is full.
    pub fn with_random_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Board> {
        let &(row, col) = self.empty_squares().choose(rng)?;
        let value = if rng.gen_bool(SPAWN_FOUR_PROBABILITY) {
            4
        } else {
            2
        };
        self.place(Placement::new(row, col, value)).ok()
    }

    pub fn is_game_over(&self) -> bool {
        self.player_actions().is_empty()
    }

    pub fn apply(&self, agent: Agent, action: BoardAction) -> Result<Board, BoardError> {
        let invalid = BoardError::InvalidAction { agent, action };
        match (agent, action) {
            (Agent::Player, BoardAction::Slide(direction)) => self.slide(direction).ok_or(invalid),
            (Agent::Opponent, BoardAction::Place(placement)) => {
                self.place(placement).map_err(|_| invalid)
            }
            _ => Err(invalid),
        }
    }
}

impl GameState for Board {
    type Action = BoardAction;

    fn legal_actions(&self, agent: Agent) -> Vec<BoardAction> {
        match agent {
            Agent::Player => self
                .player_actions()
                .into_iter()
                .map(BoardAction::Slide)
                .collect(),
            Agent::Opponent => self
                .placements()
                .into_iter()
                .map(BoardAction::Place)
                .collect(),
        }
    }

    fn successor(&self, agent: Agent, action: &BoardAction) -> Result<Self, InvalidAction> {
        self.apply(agent, *action)
            .map_err(|_| InvalidAction::new(agent, action))
    }

    fn score(&self) -> f64 {
        f64::from(self.score)
    }

    fn max_tile(&self) -> u32 {
        self.max_tile
    }
}
