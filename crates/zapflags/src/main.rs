use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use serde_json::json;

use zapflags_core::{InvalidValue, LegacyVerbosity, OptionValue, ZapOptions};
use zapflags_logging::{build_logger, Logger};

mod config;

use config::FileConfig;

#[derive(Parser, Debug)]
#[command(
    name = "zapflags",
    about = "Build a structured logger from command-line flags",
    version,
    author
)]
struct Cli {
    /// Config file with default flag values (default: ./zapflags.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the resolved logger options as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Number of demo rounds to log
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    #[command(flatten)]
    zap: ZapOptions,
}

/// Report a bad flag or config value the same way clap reports parse errors.
fn exit_invalid(err: InvalidValue) -> ! {
    Cli::command().error(ErrorKind::ValueValidation, err).exit()
}

/// Flags as collected; anything neither given nor filled from the config file
/// is reported as `null`.
fn flags_report(zap: &ZapOptions) -> serde_json::Value {
    let given = |set: bool, text: String| set.then_some(text);
    json!({
        "devel": zap.devel,
        "encoder": given(zap.encoder.is_set(), zap.encoder.to_string()),
        "level": given(zap.level.is_set(), zap.level.to_string()),
        "sample": zap.sample.sample(),
        "timeformat": given(zap.timeformat.is_set(), zap.timeformat.to_string()),
    })
}

fn load_file_config(cli: &Cli) -> Result<Option<FileConfig>> {
    match &cli.config {
        Some(path) => FileConfig::load(path).map(Some),
        None => {
            let working_dir =
                std::env::current_dir().context("Failed to get current directory")?;
            FileConfig::discover(&working_dir)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Flags win; the config file only fills what was not given.
    let mut zap = cli.zap.clone();
    if let Some(file) = load_file_config(&cli)? {
        let fallback = file.to_options().unwrap_or_else(|err| exit_invalid(err));
        zap.fill_unset(&fallback);
    }

    if let Err(err) = zap.apply_verbosity(&LegacyVerbosity) {
        exit_invalid(err);
    }

    let logger = build_logger(&zap);

    if cli.print_config {
        let report = json!({
            "flags": flags_report(&zap),
            "resolved": logger.options(),
            "legacy_verbosity": LegacyVerbosity::verbosity(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    run_demo(logger, cli.count)
}

fn run_demo(logger: Logger, rounds: usize) -> Result<()> {
    logger.install().context("Failed to install logger")?;

    for round in 0..rounds {
        let span = tracing::info_span!("round", round);
        let _guard = span.enter();

        tracing::trace!("trace record");
        tracing::debug!("debug record");
        tracing::info!(rounds, "info record");
        tracing::warn!("warn record");
        tracing::error!("error record");
        log::debug!("legacy debug record");
        log::trace!("legacy trace record");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zapflags_core::Severity;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_flattens_zap_flags() {
        let cli = Cli::try_parse_from([
            "zapflags",
            "--print-config",
            "--zap-level",
            "error",
            "--zap-devel",
        ])
        .unwrap();
        assert!(cli.print_config);
        assert_eq!(cli.count, 1);
        assert_eq!(cli.zap.level.severity(), Some(Severity::ERROR));
        assert!(cli.zap.is_devel());
    }

    #[test]
    fn test_flags_report_leaves_unset_flags_null() {
        let cli = Cli::try_parse_from(["zapflags", "--zap-level", "1000"]).unwrap();
        let report = flags_report(&cli.zap);
        assert_eq!(report["level"], "1000");
        assert!(report["devel"].is_null());
        assert!(report["encoder"].is_null());
        assert!(report["sample"].is_null());
        assert!(report["timeformat"].is_null());
    }

    #[test]
    fn test_flags_report_shows_explicit_false() {
        let cli = Cli::try_parse_from([
            "zapflags",
            "--zap-sample=false",
            "--zap-devel=false",
            "--zap-encoder",
            "console",
        ])
        .unwrap();
        let report = flags_report(&cli.zap);
        assert_eq!(report["sample"], false);
        assert_eq!(report["devel"], false);
        assert_eq!(report["encoder"], "console");
    }
}
