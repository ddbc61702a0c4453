use clap::Parser;
use grayrle::config::Cli;
use log::{error, LevelFilter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(LevelFilter::Info),
    };
    builder.init();

    let cli = Cli::parse();
    match cli.into_job().and_then(|job| job.run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
