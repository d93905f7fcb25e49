//! Shipment manifest analysis CLI.

use clap::{ColorChoice, Parser};
use ship_cli::config::Settings;
use ship_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_alerts, run_ask, run_carriers, run_compliance, run_config, run_geocode, run_inspect,
    run_routes, run_summarize, run_timeline,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let settings = Settings::load(Some(settings_path.as_path()));

    let result = match &cli.command {
        Command::Inspect(args) => run_inspect(settings, args).map(|()| 0),
        Command::Ask(args) => run_ask(settings, args).map(|()| 0),
        Command::Summarize(args) => run_summarize(settings, args).map(|()| 0),
        Command::Compliance(args) => {
            run_compliance(settings, args).map(|clean| if clean { 0 } else { 1 })
        }
        Command::Carriers(args) => run_carriers(&settings, args).map(|()| 0),
        Command::Geocode(args) => run_geocode(settings, args).map(|()| 0),
        Command::Routes(args) => run_routes(settings, args).map(|()| 0),
        Command::Timeline(args) => run_timeline(settings, args).map(|()| 0),
        Command::Alerts(args) => run_alerts(settings, args).map(|()| 0),
        Command::Config(args) => run_config(&settings_path, &settings, args).map(|()| 0),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            2
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
