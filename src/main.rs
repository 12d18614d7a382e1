mod cli;

use cli::commands::Command;
use cli::TileSearch;
use structopt::StructOpt;

fn main() {
    env_logger::init();
    TileSearch::from_args().execute();
}
