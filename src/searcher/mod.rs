//! Generic adversarial search over two-agent, alternating-turn games.

mod cutoff;
mod reflex;
mod search;
mod strategy;
mod traits;

#[cfg(test)]
mod tests;

pub use cutoff::is_cutoff;
pub use reflex::reflex_action;
pub use search::{choose_action, search_best_action, SearchContext, SearchError, SearchResult};
pub use strategy::{
    expected_value, AlphaBetaPolicy, ExpectimaxPolicy, MinimaxPolicy, OpponentModel,
    Propagation, Strategy, Window,
};
pub use traits::{Evaluator, GameAction, GameState, InvalidAction};
