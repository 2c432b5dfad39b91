//! Command implementation for the scooter telemetry CLI
//!
//! This module contains the command execution logic: logging setup, layered
//! configuration, reading the input file once, parsing it and rendering the
//! records as JSON.

use crate::app::services::packet_parser::{PacketParser, ParseResult, ParseStats};
use crate::cli::args::{Args, OutputFormat};
use crate::config::{Config, OutputConfig};
use crate::constants::LOG_TARGET;
use crate::{Error, Result};
use colored::*;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main command runner
///
/// This function orchestrates the whole workflow:
/// 1. Set up logging and configuration
/// 2. Read and parse the input file
/// 3. Write the records (and optionally statistics) to stdout
pub fn run(args: Args) -> Result<ParseStats> {
    let start_time = Instant::now();

    setup_logging(&args)?;

    info!("Starting scooter telemetry parser");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let result = parse_file(&args.input, &config)?;

    let rendered = render_output(&result, &config.output, args.output_format)?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .map_err(|e| Error::io("Failed to write output", e))?;

    if result.stats.total_lines > 0 && !result.stats.is_successful() {
        warn!(
            "Only {:.1}% of lines produced records ({} of {})",
            result.stats.success_rate(),
            result.stats.records_parsed,
            result.stats.total_lines
        );
    }

    if !args.quiet {
        print_summary(&result.stats);
    }

    info!("Finished in {:.2?}", start_time.elapsed());
    Ok(result.stats)
}

/// Print a human-readable parse summary to stderr
///
/// Stdout carries only the JSON output, so the summary never mixes with it.
fn print_summary(stats: &ParseStats) {
    eprintln!("\n{}", "Parse Summary".bright_green().bold());
    eprintln!(
        "  {} {}",
        "Lines read:".bright_cyan(),
        stats.total_lines.to_string().bright_white().bold()
    );
    eprintln!(
        "  {} {}",
        "Records parsed:".bright_cyan(),
        stats.records_parsed.to_string().bright_white().bold()
    );
    for (packet_type, count) in &stats.records_by_type {
        eprintln!("    {} {}", format!("{}:", packet_type).cyan(), count);
    }
    if stats.lines_skipped > 0 {
        eprintln!(
            "  {} {}",
            "Lines skipped:".bright_cyan(),
            stats.lines_skipped.to_string().bright_yellow().bold()
        );
    }

    let rate = format!("{:.1}%", stats.success_rate());
    let rate = if stats.is_successful() {
        rate.bright_green()
    } else {
        rate.bright_red()
    };
    eprintln!("  {} {}", "Success rate:".bright_cyan(), rate);
}

/// Read a telemetry file and parse it with the given configuration
pub fn parse_file(path: &Path, config: &Config) -> Result<ParseResult> {
    info!("Parsing telemetry file: {}", path.display());

    let payload = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;

    let parser = PacketParser::new(config.parser.clone());
    Ok(parser.parse(&payload))
}

/// Render parse results according to the output configuration
pub fn render_output(
    result: &ParseResult,
    output: &OutputConfig,
    format: OutputFormat,
) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json if output.include_stats => to_json(result, output.pretty)?,
        OutputFormat::Json => to_json(&result.records, output.pretty)?,
        OutputFormat::JsonLines => {
            let mut lines = result
                .records
                .iter()
                .map(|record| to_json(record, false))
                .collect::<Result<Vec<_>>>()?;
            if output.include_stats {
                lines.push(to_json(&result.stats, false)?);
            }
            lines.join("\n")
        }
    };
    Ok(rendered)
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(|e| Error::serialization("Failed to serialize output", e))
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (defaults -> file -> args)
pub fn load_configuration(args: &Args) -> Result<Config> {
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        debug!("No config file found, using defaults");
    }

    let mut config = Config::load(config_file)?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(packet_types) = args.get_packet_types() {
        config.parser.accepted_packet_types = packet_types;
    }
    if args.pretty {
        config.output.pretty = true;
    }
    if args.stats {
        config.output.include_stats = true;
    }
}
