//! CLI argument definitions for the shipment manifest tools.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ship_compliance::AlertTone;
use ship_model::StandardField;

#[derive(Parser)]
#[command(
    name = "ship-insight",
    version,
    about = "Shipment manifest analysis - ask questions, check carriers, map routes",
    long_about = "Analyze logistics shipment manifests (CSV or XLSX).\n\n\
                  Columns are matched to standard fields automatically. Statistical\n\
                  questions are answered from the data; other questions go to an\n\
                  OpenAI-compatible model when OPENAI_API_KEY is set."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow manifest values and questions to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show column mapping, suggestions and a data quality report.
    Inspect(InspectArgs),

    /// Answer questions about a manifest.
    Ask(AskArgs),

    /// Ask the language model for a manifest summary.
    Summarize(ManifestArgs),

    /// Check tracking numbers and carrier approval.
    Compliance(ComplianceArgs),

    /// Manage the approved carrier list.
    Carriers(CarriersArgs),

    /// Add origin and destination coordinates.
    Geocode(GeocodeArgs),

    /// Route distances and cost per mile.
    Routes(RoutesArgs),

    /// Transit times between ship and delivery dates.
    Timeline(ManifestArgs),

    /// Render an alert for delayed shipments.
    Alerts(AlertArgs),

    /// Show or initialize the settings file.
    Config(ConfigArgs),
}

/// Manifest input shared by every analysis command.
#[derive(Args)]
pub struct ManifestArgs {
    /// Manifest file (.csv or .xlsx).
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Saved mapping (JSON) to apply instead of automatic matching.
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    /// Map a field to a column, e.g. `--map carrier=shipping_company`.
    #[arg(long = "map", value_name = "FIELD=COLUMN", value_parser = parse_override)]
    pub overrides: Vec<(StandardField, String)>,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: ManifestArgs,

    /// Write the final mapping to a JSON file.
    #[arg(long = "save-mapping", value_name = "FILE")]
    pub save_mapping: Option<PathBuf>,

    /// Skip the per-column profile table.
    #[arg(long = "no-profile")]
    pub no_profile: bool,
}

#[derive(Args)]
pub struct AskArgs {
    #[command(flatten)]
    pub input: ManifestArgs,

    /// Questions to answer, in order.
    #[arg(value_name = "QUESTION", required = true)]
    pub questions: Vec<String>,

    /// Export the questions and answers to a CSV file.
    #[arg(long = "history", value_name = "FILE")]
    pub history: Option<PathBuf>,
}

#[derive(Args)]
pub struct ComplianceArgs {
    #[command(flatten)]
    pub input: ManifestArgs,

    /// Approved carriers file (overrides settings).
    #[arg(long = "carriers", value_name = "FILE")]
    pub carriers: Option<PathBuf>,
}

#[derive(Args)]
pub struct CarriersArgs {
    #[command(subcommand)]
    pub action: CarrierAction,

    /// Approved carriers file (overrides settings).
    #[arg(long = "carriers", value_name = "FILE", global = true)]
    pub carriers: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum CarrierAction {
    /// List approved carriers.
    List,
    /// Approve carriers.
    Add {
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },
    /// Withdraw approval.
    Remove {
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },
    /// Replace the list with the default carriers.
    Reset,
}

#[derive(Args)]
pub struct GeocodeArgs {
    #[command(flatten)]
    pub input: ManifestArgs,

    /// Only use the built-in city table.
    #[arg(long = "offline")]
    pub offline: bool,

    /// Write the enriched manifest to a CSV file.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub input: ManifestArgs,

    /// Only use the built-in city table.
    #[arg(long = "offline")]
    pub offline: bool,

    /// Number of routes listed in the route table.
    #[arg(long = "top", value_name = "N", default_value_t = 10)]
    pub top: usize,
}

#[derive(Args)]
pub struct AlertArgs {
    #[command(flatten)]
    pub input: ManifestArgs,

    /// Alert wording.
    #[arg(long = "tone", value_enum, default_value = "standard")]
    pub tone: ToneArg,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the settings in effect.
    Show,
    /// Print the settings file location.
    Path,
    /// Write default settings to the settings file.
    Init {
        /// Replace an existing file.
        #[arg(long = "force")]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ToneArg {
    Standard,
    Urgent,
    Formal,
}

impl From<ToneArg> for AlertTone {
    fn from(tone: ToneArg) -> Self {
        match tone {
            ToneArg::Standard => AlertTone::Standard,
            ToneArg::Urgent => AlertTone::Urgent,
            ToneArg::Formal => AlertTone::Formal,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_override(raw: &str) -> Result<(StandardField, String), String> {
    let (field, column) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=COLUMN, got '{raw}'"))?;
    let field = field.parse::<StandardField>().map_err(|e| e.to_string())?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name for {field}"));
    }
    Ok((field, column.to_string()))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(
            parse_override("delivery date=eta").unwrap(),
            (StandardField::DeliveryDate, "eta".to_string())
        );
        assert!(parse_override("carrier").is_err());
        assert!(parse_override("carrier= ").is_err());
        assert!(parse_override("vessel=ship").is_err());
    }

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from([
            "ship-insight",
            "ask",
            "manifest.csv",
            "--map",
            "carrier=company",
            "How many shipments?",
        ])
        .unwrap();
        let Command::Ask(args) = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(args.questions, vec!["How many shipments?"]);
        assert_eq!(args.input.overrides.len(), 1);
    }
}
