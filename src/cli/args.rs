//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{best_move::BestMoveArgs, play::PlayArgs};

#[derive(StructOpt)]
#[structopt(
    name = "tile-search",
    about = "Minimax, alpha-beta and expectimax search for a sliding-tile game"
)]
pub enum TileSearch {
    #[structopt(
        name = "best-move",
        about = "Determine the best move from a given `--board` (required), written as rows separated by `/` with cells separated by `,`. The search runs `--depth` rounds (default: 2) with the chosen `--strategy` (default: expectimax) and `--evaluator` (default: corner)."
    )]
    BestMove(BestMoveArgs),
    #[structopt(
        name = "play",
        about = "Watch the computer play a game against random tile spawns at the given `--depth` (default: 2). Use `--seed` for a reproducible game, `--max-moves` to stop early, and `--time-limit-ms` to bound each move's search."
    )]
    Play(PlayArgs),
}

impl crate::cli::commands::Command for TileSearch {
    fn execute(self) {
        match self {
            Self::BestMove(cmd) => cmd.execute(),
            Self::Play(cmd) => cmd.execute(),
        }
    }
}
