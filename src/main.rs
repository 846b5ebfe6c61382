use std::env;

use mappower::{cli, logging};

fn main() {
    logging::init_logging();
    let args: Vec<String> = env::args().collect();
    std::process::exit(cli::run_with_args(&args));
}
