//! Best move command - determine the player's best move from a board.

use std::process;

use structopt::StructOpt;
use tile_search::board::Board;
use tile_search::evaluate::EvaluatorKind;
use tile_search::game::engine::{Engine, EngineConfig, Policy};

use super::Command;

#[derive(StructOpt)]
pub struct BestMoveArgs {
    #[structopt(short, long, default_value = "2")]
    pub depth: u8,
    #[structopt(short, long, default_value = "expectimax")]
    pub strategy: Policy,
    #[structopt(short, long, default_value = "corner")]
    pub evaluator: EvaluatorKind,
    #[structopt(short, long)]
    pub board: Board,
}

impl Command for BestMoveArgs {
    fn execute(self) {
        let config = EngineConfig {
            search_depth: self.depth,
            strategy: self.strategy,
            evaluator: self.evaluator,
            starting_position: Some(self.board),
            ..EngineConfig::default()
        };
        let mut engine = Engine::with_config(config);

        match engine.best_action() {
            Ok(action) => {
                println!("{}", action);
                if let Some(value) = engine.search_context().last_score() {
                    eprintln!(
                        "value: {}, positions searched: {}",
                        value,
                        engine.search_context().searched_position_count()
                    );
                }
            }
            Err(err) => {
                eprintln!("Failed to calculate best move: {}", err);
                process::exit(1);
            }
        }
    }
}
