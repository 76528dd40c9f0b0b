use std::process::exit;

use clap::Parser;
use log::{debug, error, info};
use noteboard::{App, Cli, Config, OutputFormat, Result, TerminalSurface};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    debug!("Logger initialized");
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let mut app = App::new(config, cli.config, TerminalSurface::new(format));
    app.run(cli.command)
}

fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    info!("Application starting up");
    if let Err(e) = run(cli) {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        exit(1);
    }
    info!("Application shutting down");
}
