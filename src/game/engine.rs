use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::action::Action;
use crate::agent::Agent;
use crate::board::error::BoardError;
use crate::board::{Board, BoardAction};
use crate::evaluate::EvaluatorKind;
use crate::searcher::{reflex_action, search_best_action, SearchContext, SearchError, Strategy};

/// Number of tiles spawned onto an empty board before the first move.
pub const START_TILES: usize = 2;

/// How the engine picks the player's move.
#[derive(Clone, Copy, PartialEq, Debug, Eq)]
pub enum Policy {
    Search(Strategy),
    Reflex,
}

impl Default for Policy {
    fn default() -> Self {
        Policy::Search(Strategy::Expectimax)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Search(strategy) => write!(f, "{}", strategy),
            Policy::Reflex => write!(f, "reflex"),
        }
    }
}

type ParseError = &'static str;
impl FromStr for Policy {
    type Err = ParseError;
    fn from_str(policy: &str) -> Result<Self, Self::Err> {
        if policy.eq_ignore_ascii_case("reflex") {
            return Ok(Policy::Reflex);
        }

        policy.parse().map(Policy::Search).map_err(|_| {
            "invalid strategy; options are: minimax, alpha-beta, expectimax, reflex"
        })
    }
}

/// Core engine configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub search_depth: u8,
    pub strategy: Policy,
    pub evaluator: EvaluatorKind,
    /// Seeds both the tile spawns and the searcher's tie-breaks. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Time budget for each move's search.
    pub deadline: Option<Duration>,
    /// Board to start from. `None` starts a fresh game with two random tiles.
    pub starting_position: Option<Board>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 2,
            strategy: Policy::default(),
            evaluator: EvaluatorKind::default(),
            seed: None,
            deadline: None,
            starting_position: None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Board error: {error}")]
    BoardError {
        #[from]
        error: BoardError,
    },
    #[error("Search error: {error}")]
    SearchError {
        #[from]
        error: SearchError,
    },
}

/// The outcome of a self-play game.
#[derive(Clone, Copy, PartialEq, Debug, Eq)]
pub struct GameSummary {
    pub moves: usize,
    pub score: u32,
    pub max_tile: u32,
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "moves: {}, score: {}, max tile: {}",
            self.moves, self.score, self.max_tile
        )
    }
}

/// Drives a board with the configured move policy against a random tile spawner.
pub struct Engine {
    config: EngineConfig,
    board: Board,
    moves_played: usize,
    search_context: SearchContext,
    rng: StdRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let (search_context, mut rng) = match config.seed {
            Some(seed) => (SearchContext::with_seed(seed), StdRng::seed_from_u64(seed)),
            None => (SearchContext::new(), StdRng::from_entropy()),
        };

        let board = match &config.starting_position {
            Some(board) => board.clone(),
            None => {
                let mut board = Board::new();
                for _ in 0..START_TILES {
                    if let Some(spawned) = board.with_random_tile(&mut rng) {
                        board = spawned;
                    }
                }
                board
            }
        };

        Self {
            config,
            board,
            moves_played: 0,
            search_context,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn search_context(&self) -> &SearchContext {
        &self.search_context
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    /// Runs the configured policy on the current board. Returns `Action::Stop` when
    /// the player cannot move.
    pub fn best_action(&mut self) -> Result<Action, EngineError> {
        match self.config.deadline {
            Some(limit) => self.search_context.set_time_limit(limit),
            None => self.search_context.set_deadline(None),
        }

        let evaluator = self.config.evaluator;
        let chosen = match self.config.strategy {
            Policy::Search(strategy) => {
                search_best_action(
                    &mut self.search_context,
                    &self.board,
                    self.config.search_depth,
                    strategy,
                    &evaluator,
                )?
                .action
            }
            Policy::Reflex => reflex_action(&mut self.search_context, &self.board, &evaluator)?,
        };

        Ok(chosen.direction())
    }

    /// Plays the best action followed by one random spawn. Returns the action played,
    /// or `None` if the game is over.
    pub fn step(&mut self) -> Result<Option<Action>, EngineError> {
        let action = self.best_action()?;
        if action.is_stop() {
            return Ok(None);
        }

        let moved = self
            .board
            .apply(Agent::Player, BoardAction::Slide(action))?;
        self.board = match moved.with_random_tile(&mut self.rng) {
            Some(spawned) => spawned,
            None => moved,
        };
        self.moves_played += 1;

        debug!(
            "move {}: {} (score {}, max tile {})",
            self.moves_played,
            action,
            self.board.points(),
            self.board.highest_tile()
        );
        Ok(Some(action))
    }

    /// Plays until the player has no legal move or `max_moves` moves have been made.
    pub fn play(&mut self, max_moves: Option<usize>) -> Result<GameSummary, EngineError> {
        info!(
            "starting game: {} depth {} evaluator {}",
            self.config.strategy, self.config.search_depth, self.config.evaluator
        );

        while max_moves.map_or(true, |limit| self.moves_played < limit) {
            if self.step()?.is_none() {
                info!("no legal moves left after {} moves", self.moves_played);
                break;
            }
        }

        let summary = self.summary();
        info!("game finished: {}", summary);
        Ok(summary)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            moves: self.moves_played,
            score: self.board.points(),
            max_tile: self.board.highest_tile(),
        }
    }
}
