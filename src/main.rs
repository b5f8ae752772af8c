use clap::Parser;
use rocopy::config::Cli;
use rocopy::{commands, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli)?;

    let report = commands::run(&config)?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", commands::format_summary(&report));
    }

    // Per-entry failures are non-fatal but must be visible to scripts.
    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
