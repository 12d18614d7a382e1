//! Adversarial game-tree search for a sliding-tile game.
//!
//! The [`searcher`] module is generic over any two-agent game implementing
//! [`searcher::GameState`]; [`board`] provides the 4x4 tile board it is usually run on.

pub mod action;
pub mod agent;
pub mod board;
pub mod evaluate;
pub mod game;
pub mod searcher;
