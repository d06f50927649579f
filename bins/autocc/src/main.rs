//! autocc CLI - hosted-iframe request signing and brand detection
//!
//! Produces the signed request and widget configuration the payment page
//! embeds, verifies signed requests, and replays detection scenarios against
//! the detection controller.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use autocc_cli::output::Status;
use autocc_core::error::exit_codes;
use autocc_telemetry::TelemetryConfig;

mod commands;

/// Hosted-iframe request signing and card brand detection
#[derive(Parser)]
#[command(name = "autocc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Additional .env file to load (the working directory's .env is always tried)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Presentation settings file (defaults to autocc.toml when present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the signed credit card check request
    Sign {
        /// Extra request field as key=value (repeatable)
        #[arg(short, long = "field", value_parser = commands::request::parse_field)]
        fields: Vec<(String, String)>,

        /// Payment mode, overriding PAYONE_MODE
        #[arg(short, long)]
        mode: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the supported card types as a JSON array
    CardTypes {
        /// Comma-separated list, overriding PAYONE_CC_TYPES
        #[arg(long)]
        card_types: Option<String>,
    },

    /// Print the full widget initialization object
    PageConfig {
        /// Payment mode, overriding PAYONE_MODE
        #[arg(short, long)]
        mode: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Verify a signed request against PAYONE_KEY
    Verify {
        /// File containing the signed request JSON, or - for stdin
        input: String,
    },

    /// Replay a detection scenario against the controller
    ///
    /// Steps: detect:CODE, click:CODE, complete, incomplete, check,
    /// result:STATUS[:ERRORCODE[:MESSAGE]], raw:JSON
    Simulate {
        /// Comma-separated list, overriding PAYONE_CC_TYPES
        #[arg(long)]
        card_types: Option<String>,

        /// Print the UI as JSON commands instead of text
        #[arg(long)]
        json: bool,

        /// Scenario steps, applied in order
        #[arg(required = true, value_parser = commands::simulate::parse_step)]
        steps: Vec<commands::simulate::Step>,
    },
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = autocc_telemetry::init_with_config(TelemetryConfig::new(
        cli.log_level.clone(),
        cli.json_logs,
    )) {
        Status::warning(&format!("Logging disabled: {}", e));
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = match e.downcast_ref::<autocc_core::Error>() {
                Some(err) => {
                    if err.code.is_fatal() {
                        tracing::error!(code = %err.code, category = err.code.category(), "{}", err.message);
                    } else {
                        tracing::warn!(code = %err.code, category = err.code.category(), "{}", err.message);
                    }
                    exit_codes::for_code(err.code)
                }
                None => exit_codes::FAILURE,
            };
            Status::error(&format!("{:#}", e));
            ExitCode::from(code as u8)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.env_file {
        dotenvy::from_path(path)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))?;
    }

    let config = autocc_core::config::Config::load(cli.config.as_deref())?;
    if let Some(path) = &config.path {
        tracing::debug!(path = %path, "Loaded settings");
    }

    match cli.command {
        Commands::Sign { fields, mode, pretty } => {
            commands::request::sign(&fields, mode.as_deref(), pretty)
        }
        Commands::CardTypes { card_types } => commands::request::card_types(card_types.as_deref()),
        Commands::PageConfig { mode, pretty } => {
            commands::request::page_config(&config.schema, mode.as_deref(), pretty)
        }
        Commands::Verify { input } => commands::request::verify(&input),
        Commands::Simulate { card_types, json, steps } => {
            commands::simulate::run(&config.schema, card_types.as_deref(), &steps, json)
        }
    }
}
