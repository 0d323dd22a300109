mod audio;
mod cli;
mod fixture;
mod logger;
mod metadata;

use crate::{
    cli::{Cli, LogConfig},
    logger::Logger,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logger = Logger::new(LogConfig::from_cli(&cli));

    match run(&cli, &logger) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger.error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, logger: &Logger) -> anyhow::Result<()> {
    let request = cli.request();
    logger.info(&format!("Generating {}", request.path.display()));

    fixture::generate(&request, logger)?;

    let tags = if cli.verify {
        let tags = fixture::verify(&request)?;
        logger.success("Tag read-back matches request");
        tags
    } else {
        request.expected_tags()
    };

    logger.fixture_complete(&request.path.display().to_string(), &tags);
    Ok(())
}
