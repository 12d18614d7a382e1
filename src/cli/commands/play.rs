//! Play command - the computer plays a full game against random tile spawns.

use std::process;
use std::time::Duration;

use structopt::StructOpt;
use tile_search::evaluate::EvaluatorKind;
use tile_search::game::engine::{Engine, EngineConfig, Policy};

use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(short, long, default_value = "2")]
    pub depth: u8,
    #[structopt(short, long, default_value = "expectimax")]
    pub strategy: Policy,
    #[structopt(short, long, default_value = "corner")]
    pub evaluator: EvaluatorKind,
    #[structopt(long)]
    pub seed: Option<u64>,
    #[structopt(long = "max-moves")]
    pub max_moves: Option<usize>,
    #[structopt(long = "time-limit-ms")]
    pub time_limit_ms: Option<u64>,
}

impl Command for PlayArgs {
    fn execute(self) {
        let config = EngineConfig {
            search_depth: self.depth,
            strategy: self.strategy,
            evaluator: self.evaluator,
            seed: self.seed,
            deadline: self.time_limit_ms.map(Duration::from_millis),
            starting_position: None,
        };
        let mut engine = Engine::with_config(config);

        match engine.play(self.max_moves) {
            Ok(summary) => {
                println!("{}", engine.board());
                println!("{}", summary);
            }
            Err(err) => {
                println!("{}", engine.board());
                eprintln!("Game stopped after {} moves: {}", engine.moves_played(), err);
                process::exit(1);
            }
        }
    }
}
