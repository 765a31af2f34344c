// src/bin/cli.rs
use clap::Parser;
use juso_scrape::{cli, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = cli::Cli::parse();
    log::init(args.log_level.as_deref(), args.log_file.as_deref())?;

    let summary = cli::run(args)?;
    if summary.failed > 0 {
        eprintln!("{} of {} addresses could not be read", summary.failed, summary.processed);
    }
    Ok(())
}
