mod cli;

use std::process::ExitCode;

use clap::Parser;
use log::debug;

use cli::Args;
use dam_tiles::{pipeline, Config};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from(Args::parse());
    debug!("{:?}", config);

    let result = pipeline::run(&config).await;
    if let Err(err) = &result {
        eprintln!("error: {}", err);
    }
    ExitCode::from(pipeline::exit_code(&result))
}
