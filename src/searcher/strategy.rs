//! Propagation policies that turn the shared traversal into Minimax, Alpha-Beta or
//! Expectimax.
//!
//! The traversal in `search` asks its policy two things: how an opponent node
//! combines its children, and whether a node may stop expanding siblings given the
//! current `[alpha, beta]` window.

use std::fmt;
use std::str::FromStr;

/// The tree-search strategy used by the move selector.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash)]
pub enum Strategy {
    Minimax,
    AlphaBeta,
    Expectimax,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Minimax, Strategy::AlphaBeta, Strategy::Expectimax];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy_str = match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alpha-beta",
            Strategy::Expectimax => "expectimax",
        };
        write!(f, "{}", strategy_str)
    }
}

type ParseError = &'static str;
impl FromStr for Strategy {
    type Err = ParseError;
    fn from_str(strategy: &str) -> Result<Self, Self::Err> {
        match strategy.to_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alpha-beta" | "alphabeta" => Ok(Strategy::AlphaBeta),
            "expectimax" => Ok(Strategy::Expectimax),
            _ => Err("invalid strategy; options are: minimax, alpha-beta, expectimax"),
        }
    }
}

/// How the opponent's turn is modeled.
#[derive(Clone, Copy, PartialEq, Debug, Eq)]
pub enum OpponentModel {
    /// Picks the child with the lowest value.
    Adversary,
    /// Acts uniformly at random; the node is worth the mean of its children.
    Chance,
}

/// The search window. `alpha` is the value the maximizer can already guarantee on the
/// path to the root, `beta` the value the minimizer can.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Window {
    pub alpha: f64,
    pub beta: f64,
}

impl Window {
    pub fn full() -> Self {
        Self {
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
        }
    }

    #[inline]
    pub fn raise_alpha(&mut self, value: f64) {
        self.alpha = self.alpha.max(value);
    }

    #[inline]
    pub fn lower_beta(&mut self, value: f64) {
        self.beta = self.beta.min(value);
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::full()
    }
}

pub trait Propagation {
    fn opponent_model(&self) -> OpponentModel;

    /// Returns true if the remaining siblings at a node cannot affect the root.
    fn should_prune(&self, window: &Window) -> bool;
}

#[derive(Clone, Copy, Default, Debug)]
pub struct MinimaxPolicy;

impl Propagation for MinimaxPolicy {
    #[inline]
    fn opponent_model(&self) -> OpponentModel {
        OpponentModel::Adversary
    }

    #[inline(always)]
    fn should_prune(&self, _window: &Window) -> bool {
        false
    }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct AlphaBetaPolicy;

impl Propagation for AlphaBetaPolicy {
    #[inline]
    fn opponent_model(&self) -> OpponentModel {
        OpponentModel::Adversary
    }

    #[inline]
    fn should_prune(&self, window: &Window) -> bool {
        window.beta <= window.alpha
    }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct ExpectimaxPolicy;

impl Propagation for ExpectimaxPolicy {
    #[inline]
    fn opponent_model(&self) -> OpponentModel {
        OpponentModel::Chance
    }

    #[inline(always)]
    fn should_prune(&self, _window: &Window) -> bool {
        false
    }
}

/// The value of a chance node: the arithmetic mean of its children.
pub fn expected_value(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
