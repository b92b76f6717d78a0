use clap::Parser;
use ipcalc::cli::{summarize, CliArgs};
use ipcalc::config::Config;
use ipcalc::output::print_summary;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let cli = CliArgs::parse();
    dotenv::dotenv().ok();
    let config = Config::from_env();
    if let Err(e) = log4rs::init_file(&config.log_config, Default::default()) {
        eprintln!("Logging disabled, cannot load {}: {e}", config.log_config);
    }
    log::info!("#Start main()");

    let summary = summarize(&cli, &config).map_err(|e| {
        log::error!("Error calculating {}: {e}", cli.address);
        e
    })?;

    print_summary(&summary, cli.output_format(&config))?;
    Ok(())
}
