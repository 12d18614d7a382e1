//! Evaluation functions scoring cutoff positions for the searcher.
//!
//! Any `Fn(&S) -> f64` already works as an evaluator; the types here are the
//! heuristics that ship with the tile board.

pub mod corner;

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Grid, BOARD_SIZE};
use crate::searcher::{Evaluator, GameState};

pub use corner::{Corner, CornerEvaluator};

/// Scores a state by its running score alone.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct ScoreEvaluator;

impl<S: GameState> Evaluator<S> for ScoreEvaluator {
    fn evaluate(&self, state: &S) -> f64 {
        state.score()
    }
}

/// Running score plus the number of equal neighbouring tiles along rows and columns.
/// Empty squares between two tiles do not separate them.
///
/// Every neighbouring pair counts, so a line of four equal tiles scores 3. Counting
/// each distinct value once per line would score it 1.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct MergeEvaluator;

impl MergeEvaluator {
    pub fn merge_pairs(grid: &Grid) -> usize {
        let mut pairs = 0;
        for index in 0..BOARD_SIZE {
            let row_tiles = (0..BOARD_SIZE).map(|col| grid[index][col]);
            let col_tiles = (0..BOARD_SIZE).map(|row| grid[row][index]);
            pairs += count_pairs(row_tiles) + count_pairs(col_tiles);
        }
        pairs
    }
}

fn count_pairs<I: Iterator<Item = u32>>(line: I) -> usize {
    let tiles: Vec<u32> = line.filter(|&tile| tile != 0).collect();
    tiles.windows(2).filter(|pair| pair[0] == pair[1]).count()
}

impl Evaluator<Board> for MergeEvaluator {
    fn evaluate(&self, board: &Board) -> f64 {
        board.score() + Self::merge_pairs(board.grid()) as f64
    }
}

/// A named evaluator, as picked on the command line.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum EvaluatorKind {
    Score,
    Corner(CornerEvaluator),
    Merge,
}

impl Default for EvaluatorKind {
    fn default() -> Self {
        EvaluatorKind::Corner(CornerEvaluator::default())
    }
}

impl Evaluator<Board> for EvaluatorKind {
    fn evaluate(&self, board: &Board) -> f64 {
        match self {
            EvaluatorKind::Score => ScoreEvaluator.evaluate(board),
            EvaluatorKind::Corner(corner) => corner.evaluate(board),
            EvaluatorKind::Merge => MergeEvaluator.evaluate(board),
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorKind::Score => write!(f, "score"),
            EvaluatorKind::Corner(evaluator) if evaluator.corner == Corner::default() => {
                write!(f, "corner")
            }
            EvaluatorKind::Corner(evaluator) => write!(f, "corner-{}", evaluator.corner),
            EvaluatorKind::Merge => write!(f, "merge"),
        }
    }
}

type ParseError = &'static str;
impl FromStr for EvaluatorKind {
    type Err = ParseError;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.to_lowercase();
        match name.as_str() {
            "score" => Ok(EvaluatorKind::Score),
            "corner" => Ok(EvaluatorKind::default()),
            "merge" => Ok(EvaluatorKind::Merge),
            _ => match name.strip_prefix("corner-") {
                Some(corner) => Ok(EvaluatorKind::Corner(CornerEvaluator::new(
                    corner.parse()?,
                ))),
                None => Err("invalid evaluator; options are: score, corner, corner-<corner>, merge"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(input: &str) -> Board {
        input.parse().unwrap()
    }

    #[test]
    fn test_score_evaluator() {
        let start = board("2,0,0,0/0,0,0,0/0,0,0,0/0,0,0,0").with_score(36);
        assert_eq!(ScoreEvaluator.evaluate(&start), 36.0);
    }

    #[test]
    fn test_merge_pairs_skip_empty_squares() {
        let start = board("2,0,0,2/0,0,0,0/0,0,0,0/2,0,0,0");
        // one pair along the top row, one down the first column
        assert_eq!(MergeEvaluator::merge_pairs(start.grid()), 2);
    }

    #[test]
    fn test_merge_pairs_broken_by_other_tiles() {
        let start = board("2,4,2,0/0,0,0,0/0,0,0,0/0,0,0,0");
        assert_eq!(MergeEvaluator::merge_pairs(start.grid()), 0);

        let stuck = board("2,4,2,4/4,2,4,2/2,4,2,4/4,2,4,2");
        assert_eq!(MergeEvaluator.evaluate(&stuck), 0.0);
    }

    #[test]
    fn test_merge_pairs_count_every_neighbouring_pair() {
        let start = board("2,2,2,2/0,0,0,0/0,0,0,0/0,0,0,0");
        assert_eq!(MergeEvaluator::merge_pairs(start.grid()), 3);

        let split = board("2,2,4,4/0,0,0,0/0,0,0,0/0,0,0,0");
        assert_eq!(MergeEvaluator::merge_pairs(split.grid()), 2);
    }

    #[test]
    fn test_merge_evaluator_adds_score() {
        let start = board("4,4,4,0/0,0,0,0/0,0,0,0/0,0,0,0").with_score(10);
        assert_eq!(MergeEvaluator.evaluate(&start), 12.0);
    }

    #[test]
    fn test_closure_is_an_evaluator() {
        let empty_squares = |board: &Board| board.empty_squares().len() as f64;
        assert_eq!(empty_squares.evaluate(&Board::new()), 16.0);
    }

    #[test]
    fn test_evaluator_kind_dispatch() {
        let start = board("0,0,0,2/0,0,0,0/0,0,0,0/0,0,0,2").with_score(4);

        assert_eq!(EvaluatorKind::Score.evaluate(&start), 4.0);
        assert_eq!(EvaluatorKind::Merge.evaluate(&start), 5.0);
        assert_eq!(
            EvaluatorKind::default().evaluate(&start),
            CornerEvaluator::default().evaluate(&start)
        );
    }

    #[test]
    fn test_parse_evaluator_kind() {
        assert_eq!("score".parse::<EvaluatorKind>(), Ok(EvaluatorKind::Score));
        assert_eq!("Merge".parse::<EvaluatorKind>(), Ok(EvaluatorKind::Merge));
        assert_eq!("corner".parse::<EvaluatorKind>(), Ok(EvaluatorKind::default()));
        assert_eq!(
            "corner-bottom-left".parse::<EvaluatorKind>(),
            Ok(EvaluatorKind::Corner(CornerEvaluator::new(Corner::BottomLeft)))
        );
        assert!("corner-middle".parse::<EvaluatorKind>().is_err());
        assert!("material".parse::<EvaluatorKind>().is_err());
    }

    #[test]
    fn test_evaluator_kind_display_parses_back() {
        let kinds = [
            EvaluatorKind::Score,
            EvaluatorKind::Merge,
            EvaluatorKind::default(),
            EvaluatorKind::Corner(CornerEvaluator::new(Corner::TopLeft)),
        ];
        for kind in kinds.iter() {
            assert_eq!(kind.to_string().parse::<EvaluatorKind>(), Ok(*kind));
        }
    }
}
