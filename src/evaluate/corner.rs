//! Positional heuristic that rewards stacking large tiles toward one corner.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Grid, BOARD_SIZE};
use crate::searcher::{Evaluator, GameState};

/// Weights for the top-right corner, halving with each step of Manhattan distance.
#[rustfmt::skip]
const TOP_RIGHT_WEIGHTS: [[f64; BOARD_SIZE]; BOARD_SIZE] = [
    [32.0, 64.0, 128.0, 256.0],
    [16.0, 32.0,  64.0, 128.0],
    [ 8.0, 16.0,  32.0,  64.0],
    [ 4.0,  8.0,  16.0,  32.0],
];

#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// The corner square as `(row, col)`.
    pub fn square(&self) -> (usize, usize) {
        let last = BOARD_SIZE - 1;
        match self {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (0, last),
            Corner::BottomLeft => (last, 0),
            Corner::BottomRight => (last, last),
        }
    }

    /// The weight of `(row, col)` when tiles are gathered toward this corner.
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        let last = BOARD_SIZE - 1;
        let (row, col) = match self {
            Corner::TopRight => (row, col),
            Corner::TopLeft => (row, last - col),
            Corner::BottomRight => (last - row, col),
            Corner::BottomLeft => (last - row, last - col),
        };
        TOP_RIGHT_WEIGHTS[row][col]
    }
}

impl Default for Corner {
    fn default() -> Self {
        Corner::TopRight
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let corner_str = match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        };
        write!(f, "{}", corner_str)
    }
}

type ParseError = &'static str;
impl FromStr for Corner {
    type Err = ParseError;
    fn from_str(corner: &str) -> Result<Self, Self::Err> {
        match corner {
            "top-left" => Ok(Corner::TopLeft),
            "top-right" => Ok(Corner::TopRight),
            "bottom-left" => Ok(Corner::BottomLeft),
            "bottom-right" => Ok(Corner::BottomRight),
            _ => Err("invalid corner; options are: top-left, top-right, bottom-left, bottom-right"),
        }
    }
}

/// Running score plus `positional_weight` times the corner-weighted tile sum.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CornerEvaluator {
    pub corner: Corner,
    pub positional_weight: f64,
}

impl Default for CornerEvaluator {
    fn default() -> Self {
        Self {
            corner: Corner::default(),
            positional_weight: 1.0,
        }
    }
}

impl CornerEvaluator {
    pub fn new(corner: Corner) -> Self {
        Self {
            corner,
            ..Self::default()
        }
    }

    pub fn positional_bonus(&self, grid: &Grid) -> f64 {
        let mut bonus = 0.0;
        for (row, tiles) in grid.iter().enumerate() {
            for (col, &tile) in tiles.iter().enumerate() {
                bonus += self.corner.weight(row, col) * f64::from(tile);
            }
        }
        bonus
    }
}

impl Evaluator<Board> for CornerEvaluator {
    fn evaluate(&self, board: &Board) -> f64 {
        board.score() + self.positional_weight * self.positional_bonus(board.grid())
    }
}
