//! testsummary - summarize a test-result tree
//!
//! Reads a JSON result tree, counts test cases by outcome, and prints a
//! text or JSON summary.
//!
//! Exit codes:
//!   0 - Success (overall result below --fail-on, or no --fail-on set)
//!   1 - Runtime error (unreadable input, invalid tree, bad config, etc.)
//!   2 - Overall result at or above the --fail-on threshold

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use testsummary::analysis;
use testsummary::cli::{self, Args, OutputFormat};
use testsummary::config::{Config, DEFAULT_CONFIG_FILE};
use testsummary::input;
use testsummary::report::{self, SummaryReport};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Configuration is read before logging so `general.verbose` can raise the level.
    let loaded = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&args, &loaded.config);

    debug!("testsummary v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match loaded.origin {
        ConfigOrigin::File(ref path) => info!("Loaded config from {}", path.display()),
        ConfigOrigin::Defaults => debug!("No config file found, using defaults"),
        ConfigOrigin::Fallback(ref reason) => warn!("Failed to load config: {}", reason),
    }

    match run(args, loaded.config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Summary failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .testsummary.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!("{} already exists. Remove it first or edit it manually.", DEFAULT_CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so stdout stays clean for the report.
fn init_logging(args: &Args, config: &Config) {
    let level = if config.general.verbose && !args.quiet {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Summarize the input and emit the report. Returns exit code (0 or 2).
fn run(args: Args, mut config: Config) -> Result<i32> {
    config.merge_with_args(&args);

    let input_path = input::input_path(args.input.as_deref());
    let tree = input::load_result_tree(&input_path)
        .with_context(|| format!("Failed to load result tree from {}", input_path.display()))?;

    let summary = analysis::summarize(&tree);
    info!(
        "{} tests: {} run, {} not run, overall {}",
        summary.test_count(),
        summary.run_count(),
        summary.not_run_count(),
        summary.overall_result()
    );

    let summary_report = SummaryReport::new(input::source_name(&input_path), &summary);

    let output = match config.report.format {
        OutputFormat::Json => report::generate_json_report(&summary_report)?,
        OutputFormat::Text => report::generate_text_report(&summary_report),
    };

    match config.report.output {
        Some(ref path) => {
            report::write_report(&output, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
        }
        None => print!("{}", output),
    }

    // Check --fail-on threshold
    let code = cli::exit_code(config.thresholds.fail_on, summary.overall_result());
    if code == cli::EXIT_THRESHOLD_REACHED {
        warn!(
            "Overall result {} is at or above {:?}. Failing (exit code {}).",
            summary.overall_result(),
            config.thresholds.fail_on,
            code
        );
    }

    Ok(code)
}

/// Where the effective configuration came from.
enum ConfigOrigin {
    File(PathBuf),
    Defaults,
    /// The default config file exists but could not be used.
    Fallback(String),
}

struct LoadedConfig {
    config: Config,
    origin: ConfigOrigin,
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` must load; a broken default file only warns.
fn load_config(args: &Args) -> Result<LoadedConfig> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Ok(LoadedConfig {
            config: Config::load(config_path)?,
            origin: ConfigOrigin::File(config_path.clone()),
        });
    }

    // Try default location
    let loaded = match Config::load_default() {
        Ok(Some(config)) => LoadedConfig {
            config,
            origin: ConfigOrigin::File(PathBuf::from(DEFAULT_CONFIG_FILE)),
        },
        Ok(None) => LoadedConfig {
            config: Config::default(),
            origin: ConfigOrigin::Defaults,
        },
        Err(e) => LoadedConfig {
            config: Config::default(),
            origin: ConfigOrigin::Fallback(format!("{:#}", e)),
        },
    };

    Ok(loaded)
}
