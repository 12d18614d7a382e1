//! Core traits for generic adversarial search.

use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

use crate::action::Action;
use crate::agent::Agent;

/// Raised by [`GameState::successor`] when the action is not among the agent's legal actions.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{agent} cannot take action {action}")]
pub struct InvalidAction {
    pub agent: Agent,
    pub action: String,
}

impl InvalidAction {
    pub fn new<A: Debug>(agent: Agent, action: &A) -> Self {
        Self {
            agent,
            action: format!("{:?}", action),
        }
    }
}

/// An action either agent can take.
pub trait GameAction: Clone + PartialEq + Debug {
    /// The no-op returned from cutoff nodes.
    fn stop() -> Self;
}

impl GameAction for Action {
    #[inline]
    fn stop() -> Self {
        Action::Stop
    }
}

/// Represents a snapshot of a two-agent, alternating-turn game.
///
/// Equality and hashing should cover the board contents only, so that two states
/// reached through different histories compare equal.
pub trait GameState: Clone + Eq + Hash {
    type Action: GameAction;

    /// Returns the actions available to `agent`. An empty list means the agent is stuck.
    fn legal_actions(&self, agent: Agent) -> Vec<Self::Action>;

    /// Returns the state after `agent` takes `action`. Never mutates `self`.
    fn successor(&self, agent: Agent, action: &Self::Action) -> Result<Self, InvalidAction>;

    fn score(&self) -> f64;

    fn max_tile(&self) -> u32;
}

/// Scores a state for the maximizing player. Higher is better.
///
/// Implementations must be total and side-effect free. Any `Fn(&S) -> f64` closure
/// is an evaluator.
pub trait Evaluator<S: GameState> {
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    S: GameState,
    F: Fn(&S) -> f64,
{
    #[inline]
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}
