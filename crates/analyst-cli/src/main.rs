//! Analyst CLI - statistical insights and chart data for tabular files.

mod cli;
mod commands;
mod config;
mod logging;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use config::Settings;
use logging::{init_logging, LogConfig};

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format);
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let settings = Settings::from_env();

    let result = match cli.command {
        Commands::Analyze {
            file,
            llm,
            model,
            json,
            output,
        } => commands::analyze::run(
            file,
            llm.unwrap_or(settings.llm),
            model.or_else(|| settings.llm_model.clone()),
            settings.llm_timeout_secs,
            json,
            output,
        ),

        Commands::Chart {
            file,
            chart_type,
            x,
            y,
            json,
        } => commands::chart::run(file, chart_type, x, y, json),

        Commands::Serve {
            port,
            host,
            llm,
            model,
        } => commands::serve::run(settings, host, port, llm, model),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
