use std::fs::{self, File};
use std::process::ExitCode;

use clap::Parser;
use datagrid::preferences::Preferences;
use proxyadmin_cli::args::Cli;
use proxyadmin_cli::error::CliError;
use proxyadmin_cli::preferences::JsonFilePreferences;
use proxyadmin_cli::{paths, session};
use simplelog::{Config, LevelFilter, WriteLogger};

fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let rotated = paths::rotate_logs();

    let log_file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), log_file)?;
    if let Err(e) = rotated {
        log::warn!("Log rotation failed: {}", e);
    }
    Ok(())
}

fn open_preferences(cli: &Cli) -> Option<Preferences> {
    if cli.no_persist {
        return None;
    }
    let path = paths::preferences_file()?;
    match JsonFilePreferences::open(path) {
        Ok(store) => Some(Preferences::new(store)),
        Err(e) => {
            log::warn!("Preferences unavailable, continuing without: {}", e);
            None
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.log_level) {
        eprintln!("Warning: {}", e);
    }
    log::info!("proxyadmin {} showing {}", env!("CARGO_PKG_VERSION"), cli.entity);

    match session::run(&cli, open_preferences(&cli)) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
